use regex::Regex;
use std::sync::LazyLock;

use crate::types::internal::ValidationErrors;

pub const NAME_MAX_LENGTH: usize = 50;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const MICROPOST_MAX_LENGTH: usize = 140;

// user@domain.tld shape: dotted lowercase domain labels, no consecutive
// dots, local part allows word characters plus + - .
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+$")
        .expect("email regex is valid")
});

/// Whether the candidate email has a valid `user@domain.tld` shape
pub fn email_format_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn validate_name(errors: &mut ValidationErrors, name: &str) {
    if is_blank(name) {
        errors.add("name", "can't be blank");
    } else if name.chars().count() > NAME_MAX_LENGTH {
        errors.add("name", "is too long (maximum is 50 characters)");
    }
}

fn validate_email(errors: &mut ValidationErrors, email: &str) {
    if is_blank(email) {
        errors.add("email", "can't be blank");
    } else if email.chars().count() > EMAIL_MAX_LENGTH {
        errors.add("email", "is too long (maximum is 255 characters)");
    } else if !email_format_valid(email) {
        errors.add("email", "is invalid");
    }
}

fn validate_password(errors: &mut ValidationErrors, password: &str, confirmation: &str) {
    if is_blank(password) {
        errors.add("password", "can't be blank");
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add("password", "is too short (minimum is 6 characters)");
    }

    if password != confirmation {
        errors.add("password_confirmation", "doesn't match Password");
    }
}

/// Validate a candidate new user record, collecting every field problem
///
/// Email uniqueness is not checked here; the store layer appends that
/// failure since it needs the database.
pub fn validate_new_user(
    name: &str,
    email: &str,
    password: &str,
    password_confirmation: &str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validate_name(&mut errors, name);
    validate_email(&mut errors, email);
    validate_password(&mut errors, password, password_confirmation);

    errors
}

/// Validate a profile update, checking only the fields being changed
///
/// An omitted password keeps the current digest, so unlike signup it is
/// not required here.
pub fn validate_profile_update(
    name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    password_confirmation: Option<&str>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(name) = name {
        validate_name(&mut errors, name);
    }

    if let Some(email) = email {
        validate_email(&mut errors, email);
    }

    if let Some(password) = password {
        validate_password(&mut errors, password, password_confirmation.unwrap_or(""));
    }

    errors
}

/// Validate micropost content
pub fn validate_micropost(content: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(content) {
        errors.add("content", "can't be blank");
    } else if content.chars().count() > MICROPOST_MAX_LENGTH {
        errors.add("content", "is too long (maximum is 140 characters)");
    }

    errors
}
