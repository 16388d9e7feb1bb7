use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{helpers, PER_PAGE};
use crate::app_data::AppData;
use crate::errors::UserError;
use crate::services::crypto;
use crate::stores::{NewUser, ProfileChanges};
use crate::types::dto::common::PageMeta;
use crate::types::dto::micropost::MicropostResponse;
use crate::types::dto::user::{
    ActivateRequest, ActivateResponse, DeleteUserResponse, SignupRequest, SignupResponse,
    UpdateUserRequest, UpdateUserResponse, UserListResponse, UserProfileResponse, UserResponse,
};

/// User management API endpoints
pub struct UsersApi {
    app_data: Arc<AppData>,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for user endpoints
#[derive(Tags)]
enum UserTags {
    /// Account and profile management
    Users,
}

#[OpenApi]
impl UsersApi {
    /// Sign up a new account
    ///
    /// The account starts out unactivated; an activation email goes out
    /// through the mailer and login stays blocked until it is confirmed.
    #[oai(path = "/users", method = "post", tag = "UserTags::Users")]
    pub async fn create(&self, body: Json<SignupRequest>) -> Result<Json<SignupResponse>, UserError> {
        let activation_token = crypto::generate_token();
        let activation_digest = self.app_data.session_service.digest(&activation_token);

        let user = self
            .app_data
            .user_store
            .create_user(
                NewUser {
                    name: body.0.name,
                    email: body.0.email,
                    password: body.0.password,
                    password_confirmation: body.0.password_confirmation,
                },
                activation_digest,
            )
            .await?;

        self.app_data
            .mailer
            .send_activation_email(&user.email, &user.name, &activation_token)
            .await;

        Ok(Json(SignupResponse {
            message: "Please check your email to activate your account.".to_string(),
            user: user.into(),
        }))
    }

    /// Confirm an activation token
    ///
    /// Unknown emails, wrong tokens, and repeat confirmations all fail the
    /// same way; the activation digest is only ever consumed once.
    #[oai(path = "/users/activate", method = "post", tag = "UserTags::Users")]
    pub async fn activate(
        &self,
        body: Json<ActivateRequest>,
    ) -> Result<Json<ActivateResponse>, UserError> {
        let user = self.app_data.user_store.find_by_email(&body.email).await?;

        let Some(user) = user else {
            return Err(UserError::forbidden_with("Invalid activation link"));
        };

        if user.activated
            || !self
                .app_data
                .session_service
                .authenticated(user.activation_digest.as_deref(), &body.token)
        {
            return Err(UserError::forbidden_with("Invalid activation link"));
        }

        let activated = self.app_data.user_store.activate(&user.id).await?;

        Ok(Json(ActivateResponse {
            message: "Account activated!".to_string(),
            user: activated.into(),
        }))
    }

    /// Paginated index of activated users
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    pub async fn index(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, UserError> {
        helpers::require_login(&self.app_data, req).await?;

        let users = self
            .app_data
            .user_store
            .list_activated(page.0.unwrap_or(1), PER_PAGE)
            .await?;

        Ok(Json(UserListResponse {
            page: PageMeta::from(&users),
            users: users.items.into_iter().map(UserResponse::from).collect(),
        }))
    }

    /// Profile of one user with a page of their microposts
    ///
    /// Unactivated profiles are not shown.
    #[oai(path = "/users/:user_id", method = "get", tag = "UserTags::Users")]
    pub async fn show(
        &self,
        user_id: Path<String>,
        page: Query<Option<u64>>,
    ) -> Result<Json<UserProfileResponse>, UserError> {
        let user = self
            .app_data
            .user_store
            .find_by_id(&user_id.0)
            .await?
            .ok_or_else(UserError::not_found)?;

        if !user.activated {
            return Err(UserError::forbidden());
        }

        let posts = self
            .app_data
            .micropost_store
            .list_for_user(&user.id, page.0.unwrap_or(1), PER_PAGE)
            .await?;

        let following_count = self
            .app_data
            .relationship_store
            .following_count(&user.id)
            .await?;
        let followers_count = self
            .app_data
            .relationship_store
            .followers_count(&user.id)
            .await?;

        Ok(Json(UserProfileResponse {
            user: user.into(),
            micropost_count: posts.total_items,
            following_count,
            followers_count,
            page: PageMeta::from(&posts),
            microposts: posts
                .items
                .into_iter()
                .map(MicropostResponse::from)
                .collect(),
        }))
    }

    /// Update your own profile
    ///
    /// Guards run in order: logged-in, then correct-user. The payload type
    /// has no admin field, so privilege elevation is impossible here.
    #[oai(path = "/users/:user_id", method = "patch", tag = "UserTags::Users")]
    pub async fn update(
        &self,
        req: &Request,
        user_id: Path<String>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UpdateUserResponse>, UserError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;
        helpers::require_correct_user(&current, &user_id.0)?;

        let UpdateUserRequest {
            name,
            email,
            password,
            password_confirmation,
        } = body.0;

        let updated = self
            .app_data
            .user_store
            .update_profile(
                &user_id.0,
                ProfileChanges {
                    name,
                    email,
                    password,
                    password_confirmation,
                },
            )
            .await?;

        Ok(Json(UpdateUserResponse {
            message: "Profile updated".to_string(),
            user: updated.into(),
        }))
    }

    /// Delete a user account (admin only)
    ///
    /// Guards run in order: logged-in, then admin.
    #[oai(path = "/users/:user_id", method = "delete", tag = "UserTags::Users")]
    pub async fn delete(
        &self,
        req: &Request,
        user_id: Path<String>,
    ) -> Result<Json<DeleteUserResponse>, UserError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;
        helpers::require_admin(&current)?;

        self.app_data
            .user_store
            .find_by_id(&user_id.0)
            .await?
            .ok_or_else(UserError::not_found)?;

        self.app_data.user_store.delete(&user_id.0).await?;

        Ok(Json(DeleteUserResponse {
            message: "User deleted".to_string(),
        }))
    }

    /// Users this user follows
    #[oai(
        path = "/users/:user_id/following",
        method = "get",
        tag = "UserTags::Users"
    )]
    pub async fn following(
        &self,
        req: &Request,
        user_id: Path<String>,
        page: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, UserError> {
        helpers::require_login(&self.app_data, req).await?;

        self.app_data
            .user_store
            .find_by_id(&user_id.0)
            .await?
            .ok_or_else(UserError::not_found)?;

        let users = self
            .app_data
            .relationship_store
            .following_of(&user_id.0, page.0.unwrap_or(1), PER_PAGE)
            .await?;

        Ok(Json(UserListResponse {
            page: PageMeta::from(&users),
            users: users.items.into_iter().map(UserResponse::from).collect(),
        }))
    }

    /// Users following this user
    #[oai(
        path = "/users/:user_id/followers",
        method = "get",
        tag = "UserTags::Users"
    )]
    pub async fn followers(
        &self,
        req: &Request,
        user_id: Path<String>,
        page: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, UserError> {
        helpers::require_login(&self.app_data, req).await?;

        self.app_data
            .user_store
            .find_by_id(&user_id.0)
            .await?
            .ok_or_else(UserError::not_found)?;

        let users = self
            .app_data
            .relationship_store
            .followers_of(&user_id.0, page.0.unwrap_or(1), PER_PAGE)
            .await?;

        Ok(Json(UserListResponse {
            page: PageMeta::from(&users),
            users: users.items.into_iter().map(UserResponse::from).collect(),
        }))
    }
}
