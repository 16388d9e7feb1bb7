use clap::Args;
use sea_orm::{ActiveModelTrait, Set};

use crate::app_data::AppData;
use crate::errors::StoreError;
use crate::services::crypto;
use crate::stores::NewUser;
use crate::types::db::user;

/// Options for the seed subcommand
#[derive(Args)]
pub struct SeedArgs {
    /// How many generated accounts to create besides the primary one
    #[arg(long, default_value_t = 99)]
    pub count: u32,

    /// Make the primary account an admin
    #[arg(long)]
    pub admin: bool,
}

/// Populate the database with a primary sample account plus a batch of
/// generated ones, all activated and ready to log in
///
/// Safe to re-run: accounts whose email is already taken are skipped.
pub async fn seed_database(
    app_data: &AppData,
    args: &SeedArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Seeding sample users...");

    let primary = NewUser {
        name: "Example User".to_string(),
        email: "example@railstutorial.org".to_string(),
        password: "foobar".to_string(),
        password_confirmation: "foobar".to_string(),
    };
    if let Some(user_id) = seed_user(app_data, primary).await? {
        if args.admin {
            let user = app_data
                .user_store
                .find_by_id(&user_id)
                .await?
                .ok_or_else(|| StoreError::not_found("user"))?;
            let mut model: user::ActiveModel = user.into();
            model.admin = Set(true);
            model.update(&app_data.db).await?;
            tracing::info!("Primary account is an admin");
        }
    }

    for n in 1..=args.count {
        let candidate = NewUser {
            name: format!("Example User {}", n),
            email: format!("example-{}@railstutorial.org", n),
            password: "password".to_string(),
            password_confirmation: "password".to_string(),
        };
        seed_user(app_data, candidate).await?;
    }

    tracing::info!("Seeding complete");
    Ok(())
}

/// Create and activate one seed account, skipping it if the email is taken
async fn seed_user(
    app_data: &AppData,
    candidate: NewUser,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let email = candidate.email.clone();

    // The activation token is digested and discarded; the account is
    // activated directly below instead of through the confirmation link
    let activation_digest = app_data.session_service.digest(&crypto::generate_token());

    match app_data.user_store.create_user(candidate, activation_digest).await {
        Ok(created) => {
            app_data.user_store.activate(&created.id).await?;
            Ok(Some(created.id))
        }
        Err(StoreError::Validation(errors))
            if errors
                .errors
                .iter()
                .any(|e| e.message == "has already been taken") =>
        {
            tracing::info!(email = %email, "account already exists, skipping");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
