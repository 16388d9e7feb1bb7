use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::micropost;
use crate::types::dto::common::PageMeta;

/// Request model for composing a micropost
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateMicropostRequest {
    /// Post body (at most 140 characters)
    pub content: String,
}

/// One micropost
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MicropostResponse {
    /// Micropost ID (UUID)
    pub id: String,

    /// Author's user ID
    pub user_id: String,

    pub content: String,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<micropost::Model> for MicropostResponse {
    fn from(post: micropost::Model) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// Paginated listing of microposts, newest first
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MicropostListResponse {
    pub microposts: Vec<MicropostResponse>,

    pub page: PageMeta,
}

/// Response model for micropost deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteMicropostResponse {
    pub message: String,
}
