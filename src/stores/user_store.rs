use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::services::validation;
use crate::stores::fetch_page;
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::{Page, ValidationErrors};

/// A candidate account as submitted at signup
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Fields a user may change about their own profile
///
/// The admin flag has no representation here, so a self-service update can
/// never elevate privileges.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// UserStore manages user accounts, credentials, and persistent-token
/// digests in the database
pub struct UserStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl UserStore {
    /// Create a new UserStore with the given database connection and
    /// password pepper
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, StoreError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| StoreError::crypto("argon2 init", e.to_string()))
    }

    fn hash_password(&self, password: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::crypto("password hashing", e.to_string()))?
            .to_string();
        Ok(digest)
    }

    /// Create a new account from a signup submission
    ///
    /// Collects every validation failure (including a taken email) before
    /// rejecting. The email is lowercased before the write, and the account
    /// starts out unactivated with the supplied activation digest.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(StoreError::Validation)` - One or more fields failed
    pub async fn create_user(
        &self,
        new_user: NewUser,
        activation_digest: String,
    ) -> Result<user::Model, StoreError> {
        let mut errors = validation::validate_new_user(
            &new_user.name,
            &new_user.email,
            &new_user.password,
            &new_user.password_confirmation,
        );

        // Invariant: emails are persisted lowercased, so a lowercase
        // lookup is a case-insensitive collision check
        let email = new_user.email.to_lowercase();

        let collision = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await?;
        if collision.is_some() {
            errors.add("email", "has already been taken");
        }

        errors.into_result()?;

        let password_digest = self.hash_password(&new_user.password)?;
        let now = Utc::now().timestamp();

        let model = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new_user.name),
            email: Set(email),
            password_digest: Set(password_digest),
            remember_digest: Set(None),
            activation_digest: Set(Some(activation_digest)),
            activated: Set(false),
            activated_at: Set(None),
            admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await.map_err(|e| {
            // A racing signup can beat the pre-check; the database unique
            // constraint reports it the same way
            if e.to_string().contains("UNIQUE") {
                let mut errors = ValidationErrors::new();
                errors.add("email", "has already been taken");
                StoreError::Validation(errors)
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(created)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, StoreError> {
        let user = User::find_by_id(user_id).one(&self.db).await?;
        Ok(user)
    }

    /// Find a user by email, matching case-insensitively
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, StoreError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Verify an email/password pair and return the account on success
    ///
    /// Fails with InvalidCredentials whether the email is unknown or the
    /// password wrong; callers cannot distinguish the two.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, StoreError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(StoreError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_digest)
            .map_err(|_| StoreError::InvalidCredentials)?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| StoreError::InvalidCredentials)?;

        Ok(user)
    }

    /// Apply a profile update, validating only the supplied fields
    ///
    /// An omitted password keeps the current digest. The email collision
    /// check excludes the user's own row so re-submitting an unchanged
    /// email passes. The admin flag is never written here.
    pub async fn update_profile(
        &self,
        user_id: &str,
        changes: ProfileChanges,
    ) -> Result<user::Model, StoreError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::not_found("user"))?;

        let mut errors = validation::validate_profile_update(
            changes.name.as_deref(),
            changes.email.as_deref(),
            changes.password.as_deref(),
            changes.password_confirmation.as_deref(),
        );

        let new_email = changes.email.as_deref().map(str::to_lowercase);

        if let Some(email) = new_email.as_deref() {
            let collision = User::find()
                .filter(user::Column::Email.eq(email))
                .filter(user::Column::Id.ne(user_id))
                .one(&self.db)
                .await?;
            if collision.is_some() {
                errors.add("email", "has already been taken");
            }
        }

        errors.into_result()?;

        let mut model: user::ActiveModel = user.into();

        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(email) = new_email {
            model.email = Set(email);
        }
        if let Some(password) = changes.password {
            model.password_digest = Set(self.hash_password(&password)?);
        }
        model.updated_at = Set(Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                let mut errors = ValidationErrors::new();
                errors.add("email", "has already been taken");
                StoreError::Validation(errors)
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(updated)
    }

    /// Mark an account as activated
    pub async fn activate(&self, user_id: &str) -> Result<user::Model, StoreError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::not_found("user"))?;

        let now = Utc::now().timestamp();
        let mut model: user::ActiveModel = user.into();
        model.activated = Set(true);
        model.activated_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model.update(&self.db).await?;
        Ok(updated)
    }

    /// Store or clear the remember-token digest for a user
    ///
    /// `None` forgets the persistent login; the raw token in the client's
    /// cookie stops authenticating immediately.
    pub async fn set_remember_digest(
        &self,
        user_id: &str,
        digest: Option<String>,
    ) -> Result<(), StoreError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::not_found("user"))?;

        let mut model: user::ActiveModel = user.into();
        model.remember_digest = Set(digest);
        model.updated_at = Set(Utc::now().timestamp());
        model.update(&self.db).await?;

        Ok(())
    }

    /// Delete a user account
    ///
    /// Microposts and follow edges go with it via foreign-key cascade.
    pub async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        let result = User::delete_by_id(user_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("user"));
        }
        Ok(())
    }

    /// One page of activated users, oldest account first
    ///
    /// Unactivated accounts are never listed.
    pub async fn list_activated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<user::Model>, StoreError> {
        let paginator = User::find()
            .filter(user::Column::Activated.eq(true))
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}
