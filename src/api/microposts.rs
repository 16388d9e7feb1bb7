use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{helpers, PER_PAGE};
use crate::app_data::AppData;
use crate::errors::MicropostError;
use crate::types::dto::common::PageMeta;
use crate::types::dto::micropost::{
    CreateMicropostRequest, DeleteMicropostResponse, MicropostListResponse, MicropostResponse,
};

/// Micropost and feed API endpoints
pub struct MicropostsApi {
    app_data: Arc<AppData>,
}

impl MicropostsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for micropost endpoints
#[derive(Tags)]
enum MicropostTags {
    /// Posts and the personalized feed
    Microposts,
}

#[OpenApi]
impl MicropostsApi {
    /// Compose a micropost
    #[oai(path = "/microposts", method = "post", tag = "MicropostTags::Microposts")]
    pub async fn create(
        &self,
        req: &Request,
        body: Json<CreateMicropostRequest>,
    ) -> Result<Json<MicropostResponse>, MicropostError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;

        let post = self
            .app_data
            .micropost_store
            .create(&current.id, &body.content)
            .await?;

        Ok(Json(post.into()))
    }

    /// Delete one of your own microposts
    ///
    /// Guards run in order: logged-in, then correct-user against the
    /// post's author.
    #[oai(
        path = "/microposts/:micropost_id",
        method = "delete",
        tag = "MicropostTags::Microposts"
    )]
    pub async fn delete(
        &self,
        req: &Request,
        micropost_id: Path<String>,
    ) -> Result<Json<DeleteMicropostResponse>, MicropostError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;

        let post = self
            .app_data
            .micropost_store
            .find_by_id(&micropost_id.0)
            .await?
            .ok_or_else(MicropostError::not_found)?;

        helpers::require_correct_user(&current, &post.user_id)?;

        self.app_data.micropost_store.delete(&post.id).await?;

        Ok(Json(DeleteMicropostResponse {
            message: "Micropost deleted".to_string(),
        }))
    }

    /// Your personalized feed: your own posts plus posts by everyone you
    /// follow, newest first
    #[oai(path = "/feed", method = "get", tag = "MicropostTags::Microposts")]
    pub async fn feed(
        &self,
        req: &Request,
        page: Query<Option<u64>>,
    ) -> Result<Json<MicropostListResponse>, MicropostError> {
        let (current, _) = helpers::require_login(&self.app_data, req).await?;

        let posts = self
            .app_data
            .micropost_store
            .feed(&current.id, page.0.unwrap_or(1), PER_PAGE)
            .await?;

        Ok(Json(MicropostListResponse {
            page: PageMeta::from(&posts),
            microposts: posts
                .items
                .into_iter()
                .map(MicropostResponse::from)
                .collect(),
        }))
    }
}
