use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::RelationshipError;
use crate::types::dto::relationship::{FollowRequest, FollowResponse};

/// Follow relationship API endpoints
pub struct RelationshipsApi {
    app_data: Arc<AppData>,
}

impl RelationshipsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for relationship endpoints
#[derive(Tags)]
enum RelationshipTags {
    /// Following and unfollowing
    Relationships,
}

#[OpenApi]
impl RelationshipsApi {
    /// Follow a user
    ///
    /// Following yourself or someone you already follow is a no-op.
    #[oai(
        path = "/relationships",
        method = "post",
        tag = "RelationshipTags::Relationships"
    )]
    pub async fn follow(
        &self,
        req: &Request,
        body: Json<FollowRequest>,
    ) -> Result<Json<FollowResponse>, RelationshipError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;

        self.app_data
            .user_store
            .find_by_id(&body.followed_id)
            .await?
            .ok_or_else(RelationshipError::not_found)?;

        self.app_data
            .relationship_store
            .follow(&current.id, &body.followed_id)
            .await?;

        let following = self
            .app_data
            .relationship_store
            .following(&current.id, &body.followed_id)
            .await?;
        let followers_count = self
            .app_data
            .relationship_store
            .followers_count(&body.followed_id)
            .await?;

        Ok(Json(FollowResponse {
            following,
            followers_count,
        }))
    }

    /// Unfollow a user
    ///
    /// Unfollowing someone you do not follow is a no-op.
    #[oai(
        path = "/relationships/:followed_id",
        method = "delete",
        tag = "RelationshipTags::Relationships"
    )]
    pub async fn unfollow(
        &self,
        req: &Request,
        followed_id: Path<String>,
    ) -> Result<Json<FollowResponse>, RelationshipError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;

        self.app_data
            .relationship_store
            .unfollow(&current.id, &followed_id.0)
            .await?;

        let followers_count = self
            .app_data
            .relationship_store
            .followers_count(&followed_id.0)
            .await?;

        Ok(Json(FollowResponse {
            following: false,
            followers_count,
        }))
    }
}
