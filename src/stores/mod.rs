use sea_orm::{DatabaseConnection, Paginator, SelectorTrait};

use crate::errors::StoreError;
use crate::types::internal::Page;

pub mod micropost_store;
pub mod relationship_store;
pub mod session_store;
pub mod user_store;

pub use micropost_store::MicropostStore;
pub use relationship_store::RelationshipStore;
pub use session_store::{MemorySessionStore, SessionStore};
pub use user_store::{NewUser, ProfileChanges, UserStore};

/// Fetch one 1-based page from a prepared paginator along with the
/// metadata needed to render navigation controls
pub(crate) async fn fetch_page<S>(
    paginator: Paginator<'_, DatabaseConnection, S>,
    page: u64,
    per_page: u64,
) -> Result<Page<S::Item>, StoreError>
where
    S: SelectorTrait,
{
    let counts = paginator.num_items_and_pages().await?;
    let current = page.max(1);

    // Pages past the end yield an empty window, not an error
    let items = paginator.fetch_page(current - 1).await?;

    Ok(Page {
        items,
        page: current,
        per_page,
        total_items: counts.number_of_items,
        total_pages: counts.number_of_pages,
    })
}
