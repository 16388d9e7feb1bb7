use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for following a user
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FollowRequest {
    /// User ID to follow
    pub followed_id: String,
}

/// Response model for follow/unfollow actions
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FollowResponse {
    /// Whether the acting user now follows the target
    pub following: bool,

    /// The target's follower count after the action
    pub followers_count: u64,
}
