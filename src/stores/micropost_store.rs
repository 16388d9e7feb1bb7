use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::services::validation;
use crate::stores::fetch_page;
use crate::types::db::micropost::{self, Entity as Micropost};
use crate::types::db::relationship;
use crate::types::internal::Page;

/// MicropostStore manages posts and the personalized feed query
pub struct MicropostStore {
    db: DatabaseConnection,
}

impl MicropostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a micropost for the given author
    ///
    /// Posts are immutable once written; there is no update operation.
    pub async fn create(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<micropost::Model, StoreError> {
        validation::validate_micropost(content).into_result()?;

        let model = micropost::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            content: Set(content.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let created = model.insert(&self.db).await?;
        Ok(created)
    }

    /// Find a micropost by ID
    pub async fn find_by_id(
        &self,
        micropost_id: &str,
    ) -> Result<Option<micropost::Model>, StoreError> {
        let post = Micropost::find_by_id(micropost_id).one(&self.db).await?;
        Ok(post)
    }

    /// Delete a micropost
    ///
    /// Ownership is the caller's concern; the correct-user guard runs at
    /// the API boundary before this is reached.
    pub async fn delete(&self, micropost_id: &str) -> Result<(), StoreError> {
        let result = Micropost::delete_by_id(micropost_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("micropost"));
        }
        Ok(())
    }

    /// One page of a single user's posts, newest first
    pub async fn list_for_user(
        &self,
        user_id: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Page<micropost::Model>, StoreError> {
        let paginator = Micropost::find()
            .filter(micropost::Column::UserId.eq(user_id))
            .order_by_desc(micropost::Column::CreatedAt)
            .order_by_desc(micropost::Column::Id)
            .paginate(&self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// One page of the personalized feed: the user's own posts plus posts
    /// by everyone the user follows, newest first
    ///
    /// A single set-membership query; the followed-id set stays inside the
    /// database as a subquery on the edge table rather than being fetched
    /// per followed user.
    pub async fn feed(
        &self,
        user_id: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Page<micropost::Model>, StoreError> {
        let followed_ids = Query::select()
            .column(relationship::Column::FollowedId)
            .from(relationship::Entity)
            .and_where(relationship::Column::FollowerId.eq(user_id))
            .to_owned();

        let paginator = Micropost::find()
            .filter(
                Condition::any()
                    .add(micropost::Column::UserId.in_subquery(followed_ids))
                    .add(micropost::Column::UserId.eq(user_id)),
            )
            .order_by_desc(micropost::Column::CreatedAt)
            .order_by_desc(micropost::Column::Id)
            .paginate(&self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// Total posts authored by this user
    pub async fn count_for_user(&self, user_id: &str) -> Result<u64, StoreError> {
        let count = Micropost::find()
            .filter(micropost::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::relationship_store::RelationshipStore;
    use crate::stores::user_store::{NewUser, UserStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    struct Stores {
        db: DatabaseConnection,
        microposts: MicropostStore,
        relationships: RelationshipStore,
        users: UserStore,
    }

    async fn setup_test_db() -> Stores {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        Stores {
            microposts: MicropostStore::new(db.clone()),
            relationships: RelationshipStore::new(db.clone()),
            users: UserStore::new(db.clone(), "test-pepper-for-unit-tests".to_string()),
            db,
        }
    }

    async fn create_user(stores: &Stores, name: &str) -> String {
        let user = stores
            .users
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

    /// Insert a post with an explicit timestamp so ordering is deterministic
    async fn post_at(stores: &Stores, user_id: &str, content: &str, created_at: i64) -> String {
        let id = Uuid::new_v4().to_string();
        let model = micropost::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(user_id.to_string()),
            content: Set(content.to_string()),
            created_at: Set(created_at),
        };
        model.insert(&stores.db).await.expect("Failed to insert post");
        id
    }

    #[tokio::test]
    async fn test_create_persists_post() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        let post = stores
            .microposts
            .create(&alice, "first post")
            .await
            .expect("Create failed");

        assert_eq!(post.user_id, alice);
        assert_eq!(post.content, "first post");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_content() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        let result = stores.microposts.create(&alice, "   ").await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_content_over_140_characters() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        let result = stores.microposts.create(&alice, &"a".repeat(141)).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        let post = stores
            .microposts
            .create(&alice, "short lived")
            .await
            .expect("Create failed");

        stores.microposts.delete(&post.id).await.expect("Delete failed");

        assert!(stores
            .microposts
            .find_by_id(&post.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_feed_contains_own_and_followed_posts_only() {
        let stores = setup_test_db().await;
        let user = create_user(&stores, "user").await;
        let lana = create_user(&stores, "lana").await;
        let archer = create_user(&stores, "archer").await;

        stores.relationships.follow(&user, &lana).await.unwrap();

        let own = post_at(&stores, &user, "own post", 100).await;
        let followed = post_at(&stores, &lana, "lana post", 200).await;
        let unfollowed = post_at(&stores, &archer, "archer post", 300).await;

        let feed = stores.microposts.feed(&user, 1, 30).await.expect("Feed failed");
        let ids: Vec<&str> = feed.items.iter().map(|p| p.id.as_str()).collect();

        assert!(ids.contains(&own.as_str()));
        assert!(ids.contains(&followed.as_str()));
        assert!(!ids.contains(&unfollowed.as_str()));
        assert_eq!(feed.total_items, 2);
    }

    #[tokio::test]
    async fn test_feed_is_ordered_newest_first() {
        let stores = setup_test_db().await;
        let user = create_user(&stores, "user").await;
        let lana = create_user(&stores, "lana").await;

        stores.relationships.follow(&user, &lana).await.unwrap();

        post_at(&stores, &user, "oldest", 100).await;
        post_at(&stores, &lana, "middle", 200).await;
        post_at(&stores, &user, "newest", 300).await;

        let feed = stores.microposts.feed(&user, 1, 30).await.expect("Feed failed");
        let contents: Vec<&str> = feed.items.iter().map(|p| p.content.as_str()).collect();

        assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_feed_excludes_posts_after_unfollow() {
        let stores = setup_test_db().await;
        let user = create_user(&stores, "user").await;
        let lana = create_user(&stores, "lana").await;

        stores.relationships.follow(&user, &lana).await.unwrap();
        post_at(&stores, &lana, "lana post", 100).await;

        stores.relationships.unfollow(&user, &lana).await.unwrap();

        let feed = stores.microposts.feed(&user, 1, 30).await.expect("Feed failed");
        assert!(feed.items.is_empty());
    }

    #[tokio::test]
    async fn test_feed_pagination_windows_the_union() {
        let stores = setup_test_db().await;
        let user = create_user(&stores, "user").await;
        let lana = create_user(&stores, "lana").await;

        stores.relationships.follow(&user, &lana).await.unwrap();

        for n in 0..5 {
            let author = if n % 2 == 0 { &user } else { &lana };
            post_at(&stores, author, &format!("post {}", n), 100 + n).await;
        }

        let first = stores.microposts.feed(&user, 1, 2).await.expect("Feed failed");
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total_items, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items[0].content, "post 4");

        let last = stores.microposts.feed(&user, 3, 2).await.expect("Feed failed");
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].content, "post 0");
    }

    #[tokio::test]
    async fn test_list_for_user_only_returns_their_posts() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;
        let bob = create_user(&stores, "bob").await;

        post_at(&stores, &alice, "alice post", 100).await;
        post_at(&stores, &bob, "bob post", 200).await;

        let page = stores
            .microposts
            .list_for_user(&alice, 1, 30)
            .await
            .expect("Listing failed");

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].content, "alice post");
    }

    #[tokio::test]
    async fn test_count_for_user() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        post_at(&stores, &alice, "one", 100).await;
        post_at(&stores, &alice, "two", 200).await;

        assert_eq!(stores.microposts.count_for_user(&alice).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deleting_a_user_cascades_their_posts() {
        let stores = setup_test_db().await;
        let alice = create_user(&stores, "alice").await;

        let post = post_at(&stores, &alice, "doomed", 100).await;

        stores.users.delete(&alice).await.expect("Delete failed");

        assert!(stores.microposts.find_by_id(&post).await.unwrap().is_none());
    }
}
