use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::StoreError;
use crate::stores::fetch_page;
use crate::types::db::relationship::{self, Entity as Relationship};
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::Page;

/// RelationshipStore manages the directed follow edges between users
///
/// Both follow and unfollow are idempotent-checked: repeating either is a
/// no-op, not an error, and a self-follow is never created.
pub struct RelationshipStore {
    db: DatabaseConnection,
}

impl RelationshipStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert the follow edge unless it exists or the target is the
    /// follower itself
    pub async fn follow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError> {
        // Self-follow is forbidden; silently refuse
        if follower_id == followed_id {
            return Ok(());
        }

        if self.following(follower_id, followed_id).await? {
            return Ok(());
        }

        let edge = relationship::ActiveModel {
            follower_id: Set(follower_id.to_string()),
            followed_id: Set(followed_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        match edge.insert(&self.db).await {
            Ok(_) => Ok(()),
            // A racing follow can beat the pre-check; the unique pair
            // constraint makes the duplicate a no-op as well
            Err(e) if e.to_string().contains("UNIQUE") => Ok(()),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    /// Delete the follow edge if present
    pub async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError> {
        Relationship::delete_many()
            .filter(relationship::Column::FollowerId.eq(follower_id))
            .filter(relationship::Column::FollowedId.eq(followed_id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Whether follower_id currently follows followed_id
    ///
    /// An indexed existence check on the edge pair, not a scan.
    pub async fn following(
        &self,
        follower_id: &str,
        followed_id: &str,
    ) -> Result<bool, StoreError> {
        let count = Relationship::find()
            .filter(relationship::Column::FollowerId.eq(follower_id))
            .filter(relationship::Column::FollowedId.eq(followed_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// One page of the users this user follows
    pub async fn following_of(
        &self,
        user_id: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Page<user::Model>, StoreError> {
        let paginator = User::find()
            .filter(
                user::Column::Id.in_subquery(
                    Query::select()
                        .column(relationship::Column::FollowedId)
                        .from(relationship::Entity)
                        .and_where(relationship::Column::FollowerId.eq(user_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// One page of the users following this user
    pub async fn followers_of(
        &self,
        user_id: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Page<user::Model>, StoreError> {
        let paginator = User::find()
            .filter(
                user::Column::Id.in_subquery(
                    Query::select()
                        .column(relationship::Column::FollowerId)
                        .from(relationship::Entity)
                        .and_where(relationship::Column::FollowedId.eq(user_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// How many users this user follows
    pub async fn following_count(&self, user_id: &str) -> Result<u64, StoreError> {
        let count = Relationship::find()
            .filter(relationship::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// How many users follow this user
    pub async fn followers_count(&self, user_id: &str) -> Result<u64, StoreError> {
        let count = Relationship::find()
            .filter(relationship::Column::FollowedId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::{NewUser, UserStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> (DatabaseConnection, RelationshipStore, UserStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let relationships = RelationshipStore::new(db.clone());
        let users = UserStore::new(db.clone(), "test-pepper-for-unit-tests".to_string());
        (db, relationships, users)
    }

    async fn create_user(users: &UserStore, name: &str) -> String {
        let user = users
            .create_user(
                NewUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    password: "password".to_string(),
                    password_confirmation: "password".to_string(),
                },
                "digest".to_string(),
            )
            .await
            .expect("Failed to create user");
        user.id
    }

    #[tokio::test]
    async fn test_follow_then_following_is_true() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        assert!(!store.following(&alice, &bob).await.unwrap());

        store.follow(&alice, &bob).await.expect("Follow failed");

        assert!(store.following(&alice, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_follow_is_directed() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        store.follow(&alice, &bob).await.expect("Follow failed");

        // The reverse edge does not exist
        assert!(!store.following(&bob, &alice).await.unwrap());
    }

    #[tokio::test]
    async fn test_unfollow_then_following_is_false() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        store.follow(&alice, &bob).await.expect("Follow failed");
        store.unfollow(&alice, &bob).await.expect("Unfollow failed");

        assert!(!store.following(&alice, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_self_follow_is_a_noop() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;

        store.follow(&alice, &alice).await.expect("Should be a no-op");

        assert!(!store.following(&alice, &alice).await.unwrap());
        assert_eq!(store.following_count(&alice).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_follow_is_a_noop() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        store.follow(&alice, &bob).await.expect("Follow failed");
        store.follow(&alice, &bob).await.expect("Duplicate should be a no-op");

        assert_eq!(store.following_count(&alice).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unfollow_without_edge_is_a_noop() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        store
            .unfollow(&alice, &bob)
            .await
            .expect("Missing edge should be a no-op");
    }

    #[tokio::test]
    async fn test_counts_track_both_directions() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;
        let carol = create_user(&users, "carol").await;

        store.follow(&alice, &bob).await.unwrap();
        store.follow(&alice, &carol).await.unwrap();
        store.follow(&carol, &bob).await.unwrap();

        assert_eq!(store.following_count(&alice).await.unwrap(), 2);
        assert_eq!(store.followers_count(&alice).await.unwrap(), 0);
        assert_eq!(store.followers_count(&bob).await.unwrap(), 2);
        assert_eq!(store.following_count(&bob).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_following_listing_returns_followed_users() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;
        let carol = create_user(&users, "carol").await;

        store.follow(&alice, &bob).await.unwrap();
        store.follow(&alice, &carol).await.unwrap();

        let page = store.following_of(&alice, 1, 30).await.unwrap();

        assert_eq!(page.total_items, 2);
        let ids: Vec<&str> = page.items.iter().map(|u| u.id.as_str()).collect();
        assert!(ids.contains(&bob.as_str()));
        assert!(ids.contains(&carol.as_str()));
    }

    #[tokio::test]
    async fn test_followers_listing_returns_following_users() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;
        let carol = create_user(&users, "carol").await;

        store.follow(&bob, &alice).await.unwrap();
        store.follow(&carol, &alice).await.unwrap();

        let page = store.followers_of(&alice, 1, 30).await.unwrap();

        assert_eq!(page.total_items, 2);
        let ids: Vec<&str> = page.items.iter().map(|u| u.id.as_str()).collect();
        assert!(ids.contains(&bob.as_str()));
        assert!(ids.contains(&carol.as_str()));
    }

    #[tokio::test]
    async fn test_deleting_a_user_cascades_their_edges() {
        let (_db, store, users) = setup_test_db().await;
        let alice = create_user(&users, "alice").await;
        let bob = create_user(&users, "bob").await;

        store.follow(&alice, &bob).await.unwrap();
        store.follow(&bob, &alice).await.unwrap();

        users.delete(&bob).await.expect("Delete failed");

        assert_eq!(store.following_count(&alice).await.unwrap(), 0);
        assert_eq!(store.followers_count(&alice).await.unwrap(), 0);
    }
}
