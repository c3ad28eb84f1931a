use std::time::Instant;

use color_eyre::Result;

use crate::db::models::{CourseCard, WishlistItem, WishlistStats};
use crate::db::Db;
use crate::models::WishlistExport;
use crate::services::resource::Resource;

// ---------------------------------------------------------------------------
// WishlistStore trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait WishlistStore: Send + Sync {
    fn fetch_wishlist(
        &self,
        user_id: i32,
    ) -> impl std::future::Future<Output = Result<Vec<WishlistItem>>> + Send;

    fn create_wishlist_item(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> impl std::future::Future<Output = Result<WishlistItem>> + Send;

    fn delete_wishlist_item(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn check_wishlist(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn count_wishlist(&self, user_id: i32)
        -> impl std::future::Future<Output = Result<i64>> + Send;

    fn clear_wishlist(&self, user_id: i32)
        -> impl std::future::Future<Output = Result<u64>> + Send;

    fn reorder_wishlist(
        &self,
        user_id: i32,
        course_id: i32,
        new_position: i32,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl WishlistStore for Db {
    async fn fetch_wishlist(&self, user_id: i32) -> Result<Vec<WishlistItem>> {
        self.wishlist_items(user_id).await
    }

    async fn create_wishlist_item(&self, user_id: i32, course_id: i32) -> Result<WishlistItem> {
        self.add_wishlist_item(user_id, course_id).await
    }

    async fn delete_wishlist_item(&self, user_id: i32, course_id: i32) -> Result<bool> {
        self.remove_wishlist_item(user_id, course_id).await
    }

    async fn check_wishlist(&self, user_id: i32, course_id: i32) -> Result<bool> {
        self.wishlist_contains(user_id, course_id).await
    }

    async fn count_wishlist(&self, user_id: i32) -> Result<i64> {
        self.wishlist_count(user_id).await
    }

    async fn clear_wishlist(&self, user_id: i32) -> Result<u64> {
        Db::clear_wishlist(self, user_id).await
    }

    async fn reorder_wishlist(
        &self,
        user_id: i32,
        course_id: i32,
        new_position: i32,
    ) -> Result<bool> {
        self.move_wishlist_item(user_id, course_id, new_position).await
    }
}

// ---------------------------------------------------------------------------
// WishlistCache
// ---------------------------------------------------------------------------

const NOT_SIGNED_IN: &str = "not signed in";

/// A user's wishlist as locally held state over the remote store.
///
/// Mutations apply optimistically before the store confirms them; a failed
/// mutation restores the exact pre-operation state and records the error
/// instead of propagating it. Concurrent mutations are not serialized, so
/// two in-flight adds produce two optimistic entries and two requests.
pub struct WishlistCache<S: WishlistStore = Db> {
    store: S,
    user_id: Option<i32>,
    resource: Resource<Vec<WishlistItem>>,
    last_updated: Option<Instant>,
    // Synthesized entries count down from -1 so they can never collide
    // with a stored row id.
    next_temp_id: i32,
}

impl<S: WishlistStore> WishlistCache<S> {
    pub fn new(store: S, user_id: Option<i32>) -> Self {
        Self {
            store,
            user_id,
            resource: Resource::new(),
            last_updated: None,
            next_temp_id: -1,
        }
    }

    pub fn items(&self) -> &[WishlistItem] {
        self.resource.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.resource.error()
    }

    pub fn is_loading(&self) -> bool {
        self.resource.is_loading()
    }

    pub fn last_updated(&self) -> Option<Instant> {
        self.last_updated
    }

    /// Replace local state with the server's snapshot, wholesale. Without
    /// `force_refresh` a previously completed fetch is reused. A failed
    /// fetch keeps showing the previous list instead of flickering to
    /// empty.
    pub async fn fetch(&mut self, force_refresh: bool) {
        if !force_refresh && self.last_updated.is_some() {
            return;
        }

        let Some(user_id) = self.user_id else {
            self.resource.set_data(Vec::new());
            self.resource.fail(NOT_SIGNED_IN);
            return;
        };

        self.resource.start_loading();
        match self.store.fetch_wishlist(user_id).await {
            Ok(items) => {
                self.resource.resolve(items);
                self.last_updated = Some(Instant::now());
            }
            Err(err) => self.resource.fail(err.to_string()),
        }
    }

    /// Optimistic append. A synthesized entry becomes visible before the
    /// create request resolves; on success a full refetch replaces it with
    /// the stored row, on failure it is removed again.
    pub async fn add(&mut self, course: &CourseCard) -> bool {
        let Some(user_id) = self.user_id else {
            self.resource.fail(NOT_SIGNED_IN);
            return false;
        };

        let temp_id = self.next_temp_id;
        self.next_temp_id -= 1;

        let items = self.resource.data_or_default();
        items.push(WishlistItem {
            id: temp_id,
            course_id: course.id,
            position: items.len() as i32 + 1,
            added_date: String::new(),
            course_public_id: course.public_id.clone(),
            course_title: course.title.clone(),
            course_category: course.category.clone(),
            course_status: course.status.clone(),
            price_type: course.price_type.clone(),
            price_cents: course.price_cents,
            image_url: course.image_url.clone(),
        });

        match self.store.create_wishlist_item(user_id, course.id).await {
            Ok(_) => {
                self.fetch(true).await;
                true
            }
            Err(err) => {
                self.resource
                    .data_or_default()
                    .retain(|item| item.id != temp_id);
                self.resource.fail(err.to_string());
                false
            }
        }
    }

    /// Optimistic delete. The removed row is kept aside and reinserted at
    /// its old index if the store rejects the delete. Removing a course
    /// that is not in local state still issues the delete; its rollback
    /// then has nothing to restore.
    pub async fn remove(&mut self, course_id: i32) -> bool {
        let Some(user_id) = self.user_id else {
            self.resource.fail(NOT_SIGNED_IN);
            return false;
        };

        let items = self.resource.data_or_default();
        let removed = items
            .iter()
            .position(|item| item.course_id == course_id)
            .map(|idx| (idx, items.remove(idx)));

        match self.store.delete_wishlist_item(user_id, course_id).await {
            Ok(_) => true,
            Err(err) => {
                if let Some((idx, item)) = removed {
                    let items = self.resource.data_or_default();
                    items.insert(idx.min(items.len()), item);
                }
                self.resource.fail(err.to_string());
                false
            }
        }
    }

    /// Dispatch to add or remove based on the caller's view of current
    /// membership, without a server round trip to verify it first.
    pub async fn toggle(&mut self, course: &CourseCard, is_currently_in_wishlist: bool) -> bool {
        if is_currently_in_wishlist {
            self.remove(course.id).await
        } else {
            self.add(course).await
        }
    }

    /// Membership against local state only; may lag the server.
    pub fn contains(&self, course_id: i32) -> bool {
        self.items().iter().any(|item| item.course_id == course_id)
    }

    /// Server-confirmed membership, bypassing local state. Any failure
    /// reads as "not wishlisted".
    pub async fn check_status(&self, course_id: i32) -> bool {
        let Some(user_id) = self.user_id else {
            return false;
        };

        self.store
            .check_wishlist(user_id, course_id)
            .await
            .unwrap_or(false)
    }

    /// Server count when reachable, local length otherwise.
    pub async fn count(&self) -> i64 {
        let Some(user_id) = self.user_id else {
            return self.items().len() as i64;
        };

        match self.store.count_wishlist(user_id).await {
            Ok(count) => count,
            Err(_) => self.items().len() as i64,
        }
    }

    /// Derived aggregation over local state. No store access.
    pub fn stats(&self) -> WishlistStats {
        let items = self.items();

        let mut categories: Vec<&str> = items
            .iter()
            .map(|item| item.course_category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();

        WishlistStats {
            total: items.len(),
            active: items
                .iter()
                .filter(|item| item.course_status == "active")
                .count(),
            inactive: items
                .iter()
                .filter(|item| item.course_status == "inactive")
                .count(),
            draft: items
                .iter()
                .filter(|item| item.course_status == "draft")
                .count(),
            free: items.iter().filter(|item| item.price_type == "free").count(),
            paid: items.iter().filter(|item| item.price_type == "paid").count(),
            categories: categories.len(),
        }
    }

    /// No optimistic pre-clear: local state empties only after the store
    /// confirms. Clearing an already-empty wishlist succeeds.
    pub async fn clear(&mut self) -> bool {
        let Some(user_id) = self.user_id else {
            self.resource.fail(NOT_SIGNED_IN);
            return false;
        };

        match self.store.clear_wishlist(user_id).await {
            Ok(_) => {
                self.resource.resolve(Vec::new());
                self.last_updated = Some(Instant::now());
                true
            }
            Err(err) => {
                self.resource.fail(err.to_string());
                false
            }
        }
    }

    /// Reordering happens server-side; the full list is refetched
    /// afterwards instead of duplicating the position rules locally.
    pub async fn move_item(&mut self, course_id: i32, new_position: i32) -> bool {
        let Some(user_id) = self.user_id else {
            self.resource.fail(NOT_SIGNED_IN);
            return false;
        };

        match self
            .store
            .reorder_wishlist(user_id, course_id, new_position)
            .await
        {
            Ok(moved) => {
                self.fetch(true).await;
                moved
            }
            Err(err) => {
                self.resource.fail(err.to_string());
                false
            }
        }
    }

    /// Plain serializable snapshot of current local state.
    pub fn export(&self) -> WishlistExport {
        WishlistExport {
            total: self.items().len(),
            items: self.items().to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;

    const USER_ID: i32 = 7;

    fn cache(mock: MockWishlistStore) -> WishlistCache<MockWishlistStore> {
        WishlistCache::new(mock, Some(USER_ID))
    }

    fn item(id: i32, course_id: i32) -> WishlistItem {
        WishlistItem {
            id,
            course_id,
            position: 1,
            added_date: "2026-01-15".to_string(),
            course_public_id: format!("course-{course_id}"),
            course_title: format!("Course {course_id}"),
            course_category: "rust".to_string(),
            course_status: "active".to_string(),
            price_type: "free".to_string(),
            price_cents: 0,
            image_url: None,
        }
    }

    fn card(course_id: i32) -> CourseCard {
        CourseCard {
            id: course_id,
            public_id: format!("course-{course_id}"),
            title: format!("Course {course_id}"),
            category: "rust".to_string(),
            price_type: "free".to_string(),
            price_cents: 0,
            image_url: None,
            status: "active".to_string(),
            enrollment_count: 0,
            rating_avg: None,
            rating_count: 0,
        }
    }

    // ----- fetch tests -----

    #[tokio::test]
    async fn fetch_replaces_never_merges() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(2, 20), item(3, 30)]) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;
        assert!(cache.contains(10));

        cache.fetch(true).await;
        let ids: Vec<i32> = cache.items().iter().map(|i| i.course_id).collect();
        assert_eq!(ids, vec![20, 30]);
        assert!(!cache.contains(10));
    }

    #[tokio::test]
    async fn fetch_without_force_reuses_loaded_list() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;
        // Second unforced fetch must not hit the store (times(1) above).
        cache.fetch(false).await;

        assert!(cache.contains(10));
    }

    #[tokio::test]
    async fn fetch_without_user_is_empty_with_error() {
        let mut cache = WishlistCache::new(MockWishlistStore::new(), None);
        cache.fetch(true).await;

        assert!(cache.items().is_empty());
        assert_eq!(cache.error(), Some(NOT_SIGNED_IN));
    }

    #[tokio::test]
    async fn fetch_failure_preserves_items() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Err(eyre!("server unreachable")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;
        cache.fetch(true).await;

        assert!(cache.contains(10));
        assert_eq!(cache.error(), Some("server unreachable"));
    }

    // ----- add tests -----

    #[tokio::test]
    async fn add_reconciles_temp_entry_after_success() {
        let mut mock = MockWishlistStore::new();
        mock.expect_create_wishlist_item()
            .returning(|_, course_id| Box::pin(async move { Ok(item(42, course_id)) }));
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(42, 10)]) }));

        let mut cache = cache(mock);
        assert!(cache.add(&card(10)).await);

        assert_eq!(cache.items().len(), 1);
        assert_eq!(cache.items()[0].id, 42);
        assert!(cache.contains(10));
    }

    #[tokio::test]
    async fn add_keeps_optimistic_entry_when_refetch_fails() {
        let mut mock = MockWishlistStore::new();
        mock.expect_create_wishlist_item()
            .returning(|_, course_id| Box::pin(async move { Ok(item(42, course_id)) }));
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Err(eyre!("server unreachable")) }));

        let mut cache = cache(mock);
        assert!(cache.add(&card(10)).await);

        // The synthesized entry is still showing, with its temporary id.
        assert!(cache.contains(10));
        assert!(cache.items()[0].id < 0);
    }

    #[tokio::test]
    async fn add_failure_rolls_back_and_sets_error() {
        let mut mock = MockWishlistStore::new();
        mock.expect_create_wishlist_item()
            .returning(|_, _| Box::pin(async { Err(eyre!("could not add course")) }));

        let mut cache = cache(mock);
        assert!(!cache.add(&card(10)).await);

        assert!(!cache.contains(10));
        assert!(cache.items().is_empty());
        assert_eq!(cache.error(), Some("could not add course"));
    }

    #[tokio::test]
    async fn add_without_user_sets_error() {
        let mut cache = WishlistCache::new(MockWishlistStore::new(), None);
        assert!(!cache.add(&card(10)).await);

        assert!(cache.items().is_empty());
        assert_eq!(cache.error(), Some(NOT_SIGNED_IN));
    }

    #[tokio::test]
    async fn two_adds_produce_two_optimistic_entries() {
        let mut mock = MockWishlistStore::new();
        mock.expect_create_wishlist_item()
            .returning(|_, _| Box::pin(async { Err(eyre!("down")) }));

        let mut cache = cache(mock);
        cache.add(&card(10)).await;
        cache.add(&card(20)).await;

        // Both rolled back; temp ids never repeat within one cache.
        assert!(cache.items().is_empty());
    }

    // ----- remove tests -----

    #[tokio::test]
    async fn remove_success_drops_item_locally() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));
        mock.expect_delete_wishlist_item()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(cache.remove(10).await);
        assert!(!cache.contains(10));
        assert!(cache.contains(20));
        assert!(cache.error().is_none());
    }

    #[tokio::test]
    async fn remove_failure_restores_original_fields() {
        let mut original = item(1, 10);
        original.course_title = "Advanced Ownership".to_string();
        original.added_date = "2026-02-02".to_string();
        original.position = 3;

        let seed = original.clone();
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(move |_| {
                let seed = seed.clone();
                Box::pin(async move { Ok(vec![seed]) })
            });
        mock.expect_delete_wishlist_item()
            .returning(|_, _| Box::pin(async { Err(eyre!("network down")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(!cache.remove(10).await);
        assert!(cache.contains(10));
        assert_eq!(cache.items()[0], original);
        assert_eq!(cache.error(), Some("network down"));
    }

    #[tokio::test]
    async fn remove_missing_item_is_noop_rollback() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));
        mock.expect_delete_wishlist_item()
            .returning(|_, _| Box::pin(async { Err(eyre!("network down")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(!cache.remove(10).await);
        assert!(cache.items().is_empty());
        assert_eq!(cache.error(), Some("network down"));
    }

    // ----- toggle tests -----

    #[tokio::test]
    async fn toggle_removes_when_caller_reports_membership() {
        let mut mock = MockWishlistStore::new();
        mock.expect_delete_wishlist_item()
            .withf(|user_id, course_id| *user_id == USER_ID && *course_id == 10)
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let mut cache = cache(mock);
        assert!(cache.toggle(&card(10), true).await);
    }

    #[tokio::test]
    async fn toggle_adds_when_caller_reports_absence() {
        let mut mock = MockWishlistStore::new();
        mock.expect_create_wishlist_item()
            .times(1)
            .returning(|_, course_id| Box::pin(async move { Ok(item(42, course_id)) }));
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(42, 10)]) }));

        let mut cache = cache(mock);
        assert!(cache.toggle(&card(10), false).await);
        assert!(cache.contains(10));
    }

    // ----- membership tests -----

    #[tokio::test]
    async fn contains_checks_local_state_only() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(cache.contains(10));
        assert!(!cache.contains(99));
    }

    #[tokio::test]
    async fn check_status_asks_the_server() {
        let mut mock = MockWishlistStore::new();
        mock.expect_check_wishlist()
            .withf(|user_id, course_id| *user_id == USER_ID && *course_id == 10)
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let cache = cache(mock);
        // Local state is empty, but the server's answer wins.
        assert!(cache.check_status(10).await);
    }

    #[tokio::test]
    async fn check_status_false_on_error() {
        let mut mock = MockWishlistStore::new();
        mock.expect_check_wishlist()
            .returning(|_, _| Box::pin(async { Err(eyre!("boom")) }));

        let cache = cache(mock);
        assert!(!cache.check_status(10).await);
    }

    #[tokio::test]
    async fn check_status_false_without_user() {
        let cache = WishlistCache::new(MockWishlistStore::new(), None);
        assert!(!cache.check_status(10).await);
    }

    // ----- count tests -----

    #[tokio::test]
    async fn count_prefers_server_value() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));
        mock.expect_count_wishlist()
            .returning(|_| Box::pin(async { Ok(99) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert_eq!(cache.count().await, 99);
    }

    #[tokio::test]
    async fn count_falls_back_to_local_length() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));
        mock.expect_count_wishlist()
            .returning(|_| Box::pin(async { Err(eyre!("boom")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert_eq!(cache.count().await, 2);
        // The fallback is silent.
        assert!(cache.error().is_none());
    }

    // ----- stats tests -----

    fn mixed_items() -> Vec<WishlistItem> {
        let mut a = item(1, 10);
        a.course_status = "active".to_string();
        a.price_type = "free".to_string();
        a.course_category = "rust".to_string();

        let mut b = item(2, 20);
        b.course_status = "inactive".to_string();
        b.price_type = "paid".to_string();
        b.price_cents = 4900;
        b.course_category = "go".to_string();

        let mut c = item(3, 30);
        c.course_status = "draft".to_string();
        c.price_type = "paid".to_string();
        c.price_cents = 9900;
        c.course_category = "rust".to_string();

        vec![a, b, c]
    }

    #[tokio::test]
    async fn stats_count_by_status_price_and_category() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist().returning(|_| {
            let items = mixed_items();
            Box::pin(async move { Ok(items) })
        });

        let mut cache = cache(mock);
        cache.fetch(false).await;

        let stats = cache.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.free, 1);
        assert_eq!(stats.paid, 2);
        assert_eq!(stats.categories, 2);
    }

    #[tokio::test]
    async fn stats_are_pure() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist().returning(|_| {
            let items = mixed_items();
            Box::pin(async move { Ok(items) })
        });

        let mut cache = cache(mock);
        cache.fetch(false).await;

        let first = cache.stats();
        let second = cache.stats();
        assert_eq!(first, second);
        assert_eq!(first.total, cache.items().len());
    }

    #[tokio::test]
    async fn stats_on_empty_cache_are_zero() {
        let cache = cache(MockWishlistStore::new());
        assert_eq!(cache.stats(), WishlistStats::default());
    }

    // ----- clear tests -----

    #[tokio::test]
    async fn clear_empty_wishlist_succeeds() {
        let mut mock = MockWishlistStore::new();
        mock.expect_clear_wishlist()
            .returning(|_| Box::pin(async { Ok(0) }));

        let mut cache = cache(mock);
        assert!(cache.clear().await);
        assert!(cache.items().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_local_state_after_confirmation() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));
        mock.expect_clear_wishlist()
            .returning(|_| Box::pin(async { Ok(2) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(cache.clear().await);
        assert!(cache.items().is_empty());
    }

    #[tokio::test]
    async fn clear_failure_keeps_items() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10)]) }));
        mock.expect_clear_wishlist()
            .returning(|_| Box::pin(async { Err(eyre!("boom")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(!cache.clear().await);
        assert!(cache.contains(10));
        assert_eq!(cache.error(), Some("boom"));
    }

    // ----- move tests -----

    #[tokio::test]
    async fn move_item_reorders_remotely_then_refetches() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));
        mock.expect_reorder_wishlist()
            .withf(|user_id, course_id, position| {
                *user_id == USER_ID && *course_id == 10 && *position == 2
            })
            .returning(|_, _, _| Box::pin(async { Ok(true) }));
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(2, 20), item(1, 10)]) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(cache.move_item(10, 2).await);
        let ids: Vec<i32> = cache.items().iter().map(|i| i.course_id).collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[tokio::test]
    async fn move_item_failure_leaves_order_untouched() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));
        mock.expect_reorder_wishlist()
            .returning(|_, _, _| Box::pin(async { Err(eyre!("boom")) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        assert!(!cache.move_item(10, 2).await);
        let ids: Vec<i32> = cache.items().iter().map(|i| i.course_id).collect();
        assert_eq!(ids, vec![10, 20]);
        assert_eq!(cache.error(), Some("boom"));
    }

    // ----- export tests -----

    #[tokio::test]
    async fn export_snapshot_matches_local_state() {
        let mut mock = MockWishlistStore::new();
        mock.expect_fetch_wishlist()
            .returning(|_| Box::pin(async { Ok(vec![item(1, 10), item(2, 20)]) }));

        let mut cache = cache(mock);
        cache.fetch(false).await;

        let export = cache.export();
        assert_eq!(export.total, 2);
        assert_eq!(export.items.len(), cache.items().len());
    }
}
