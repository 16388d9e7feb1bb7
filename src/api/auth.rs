use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::AuthError;
use crate::types::dto::auth::{LoginRequest, LoginResponse, LogoutResponse, RememberLoginRequest};

/// Session lifecycle API endpoints
pub struct SessionsApi {
    app_data: Arc<AppData>,
}

impl SessionsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for session endpoints
#[derive(Tags)]
enum AuthTags {
    /// Login and logout
    Sessions,
}

#[OpenApi]
impl SessionsApi {
    /// Log in with email and password
    ///
    /// Rejects unactivated accounts. A pre-login session token presented as
    /// the Bearer credential is consumed for its remembered destination,
    /// which comes back as redirect_to. With remember_me set, a raw
    /// remember token is issued and only its digest stored server-side.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Sessions")]
    pub async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<LoginResponse>, AuthError> {
        let user = self
            .app_data
            .user_store
            .verify_credentials(&body.email, &body.password)
            .await?;

        if !user.activated {
            return Err(AuthError::account_not_activated());
        }

        // Consume the pre-login session, if the client presented one
        let forwarding_url = match helpers::extract_bearer(req) {
            Some(bearer) => {
                self.app_data
                    .session_service
                    .take_forwarding_url(&bearer.token)
                    .await
            }
            None => None,
        };

        let session_token = self.app_data.session_service.log_in(&user.id).await;

        let remember_token = if body.remember_me.unwrap_or(false) {
            let raw = self.app_data.session_service.new_remember_token();
            let digest = self.app_data.session_service.digest(&raw);
            self.app_data
                .user_store
                .set_remember_digest(&user.id, Some(digest))
                .await?;
            Some(raw)
        } else {
            self.app_data
                .user_store
                .set_remember_digest(&user.id, None)
                .await?;
            None
        };

        let redirect_to = forwarding_url.unwrap_or_else(|| format!("/users/{}", user.id));

        Ok(Json(LoginResponse {
            session_token,
            remember_token,
            redirect_to,
            user: user.into(),
        }))
    }

    /// Log in from a persistent remember token
    ///
    /// Exchanges (user id, raw remember token) for a fresh session when the
    /// token's digest matches the one on file. An account with no stored
    /// digest never authenticates this way.
    #[oai(path = "/login/remember", method = "post", tag = "AuthTags::Sessions")]
    pub async fn remember_login(
        &self,
        body: Json<RememberLoginRequest>,
    ) -> Result<Json<LoginResponse>, AuthError> {
        let user = self
            .app_data
            .user_store
            .find_by_id(&body.user_id)
            .await?
            .ok_or_else(AuthError::invalid_credentials)?;

        if !self
            .app_data
            .session_service
            .authenticated(user.remember_digest.as_deref(), &body.remember_token)
        {
            return Err(AuthError::invalid_credentials());
        }

        if !user.activated {
            return Err(AuthError::account_not_activated());
        }

        let session_token = self.app_data.session_service.log_in(&user.id).await;
        let redirect_to = format!("/users/{}", user.id);

        Ok(Json(LoginResponse {
            session_token,
            remember_token: None,
            redirect_to,
            user: user.into(),
        }))
    }

    /// Log out
    ///
    /// Clears the session and forgets the remember digest. Idempotent:
    /// logging out of a dead or missing session still succeeds.
    #[oai(path = "/logout", method = "delete", tag = "AuthTags::Sessions")]
    pub async fn logout(&self, req: &Request) -> Result<Json<LogoutResponse>, AuthError> {
        if let Some(bearer) = helpers::extract_bearer(req) {
            if let Some(user_id) = self
                .app_data
                .session_service
                .current_user_id(&bearer.token)
                .await
            {
                if let Err(e) = self
                    .app_data
                    .user_store
                    .set_remember_digest(&user_id, None)
                    .await
                {
                    tracing::warn!("failed to forget remember digest on logout: {}", e);
                }
            }
            self.app_data.session_service.log_out(&bearer.token).await;
        }

        Ok(Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}
