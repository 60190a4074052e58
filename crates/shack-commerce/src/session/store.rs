//! Session store over the key-value cache.

use shack_cache::{Cache, KvStore};
use tracing::{debug, warn};

use super::record::{OrderMode, OrderSession, OrderSessionRef, SessionHeader, SESSION_VERSION};
use crate::cart::LineItem;
use crate::clock::Clock;

/// Storage key of the order session.
pub const SESSION_KEY: &str = "pizza-order-session:v1";

/// Age after which a saved session is discarded (2 hours).
pub const SESSION_TTL_MS: i64 = 2 * 60 * 60 * 1000;

/// Best-effort persistence for the order session.
///
/// None of the methods fail: storage problems degrade to "nothing saved".
pub trait SessionStore {
    /// Load the saved session, or `None` if there is no usable one.
    fn load(&self) -> Option<OrderSession>;

    /// Replace the saved session, stamping version and save time.
    fn save(&self, mode: OrderMode, line_items: &[LineItem], notes: &str);

    /// Remove the saved session.
    fn clear(&self);
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self) -> Option<OrderSession> {
        (**self).load()
    }

    fn save(&self, mode: OrderMode, line_items: &[LineItem], notes: &str) {
        (**self).save(mode, line_items, notes)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// [`SessionStore`] keeping the record as JSON in a [`Cache`].
#[derive(Debug, Clone)]
pub struct KvSessionStore<S, C> {
    cache: Cache<S>,
    clock: C,
    key: String,
    ttl_ms: i64,
}

impl<S: KvStore, C: Clock> KvSessionStore<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            cache: Cache::new(store),
            clock,
            key: SESSION_KEY.to_string(),
            ttl_ms: SESSION_TTL_MS,
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use a different time-to-live.
    pub fn with_ttl(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }
}

impl<S: KvStore, C: Clock> SessionStore for KvSessionStore<S, C> {
    fn load(&self) -> Option<OrderSession> {
        let raw = match self.cache.get_raw(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read order session");
                return None;
            }
        };

        let header: SessionHeader = match serde_json::from_slice(&raw) {
            Ok(header) => header,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable order session");
                return None;
            }
        };
        if header.version != f64::from(SESSION_VERSION) {
            debug!(version = header.version, "ignoring order session with unknown version");
            return None;
        }

        let age = self.clock.now_millis() as f64 - header.updated_at;
        if age > self.ttl_ms as f64 {
            debug!(age_ms = age, "order session expired");
            self.clear();
            return None;
        }

        match serde_json::from_slice::<OrderSession>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!(error = %e, "ignoring malformed order session");
                None
            }
        }
    }

    fn save(&self, mode: OrderMode, line_items: &[LineItem], notes: &str) {
        let record = OrderSessionRef {
            version: SESSION_VERSION,
            updated_at: self.clock.now_millis(),
            mode,
            line_items,
            notes,
        };
        if let Err(e) = self.cache.set(&self.key, &record) {
            warn!(key = %self.key, error = %e, "failed to save order session");
        }
    }

    fn clear(&self) {
        if let Err(e) = self.cache.delete(&self.key) {
            warn!(key = %self.key, error = %e, "failed to clear order session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, PizzaCustomization};
    use crate::catalog::Catalog;
    use crate::clock::ManualClock;
    use crate::ids::{ItemId, ToppingId};
    use shack_cache::{CacheError, FileStore, MemoryStore};
    use std::sync::Arc;

    const T0: i64 = 1_700_000_000_000;

    fn store() -> (KvSessionStore<Arc<MemoryStore>, ManualClock>, Arc<MemoryStore>, ManualClock) {
        let mem = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(T0);
        (KvSessionStore::new(mem.clone(), clock.clone()), mem, clock)
    }

    fn sample_cart() -> Cart {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        let margherita = catalog.find_item(&ItemId::new("margherita")).unwrap().clone();
        cart.add_pizza(
            margherita,
            PizzaCustomization::new("lg", [ToppingId::new("basil")]),
        );
        cart.add_other(catalog.find_item(&ItemId::new("water")).unwrap().clone());
        cart
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::StoreError("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("quota exceeded".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disabled".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Err(CacheError::StoreError("disabled".to_string()))
        }
    }

    #[test]
    fn test_save_then_load() {
        let (sessions, _, _) = store();
        let cart = sample_cart();
        sessions.save(OrderMode::Delivery, cart.items(), "leave at door");

        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.updated_at, T0);
        assert_eq!(loaded.mode, OrderMode::Delivery);
        assert_eq!(loaded.line_items, cart.items());
        assert_eq!(loaded.notes, "leave at door");
    }

    #[test]
    fn test_absent_is_none() {
        let (sessions, _, _) = store();
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_clear_removes_record() {
        let (sessions, mem, _) = store();
        sessions.save(OrderMode::Pickup, &[], "");
        sessions.clear();
        assert!(sessions.load().is_none());
        assert!(mem.is_empty());
    }

    #[test]
    fn test_expired_session_is_deleted() {
        let (sessions, mem, clock) = store();
        sessions.save(OrderMode::Pickup, sample_cart().items(), "");

        clock.advance(SESSION_TTL_MS + 1);
        assert!(sessions.load().is_none());
        assert!(!mem.exists(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_session_at_exact_ttl_is_kept() {
        let (sessions, _, clock) = store();
        sessions.save(OrderMode::Pickup, &[], "");
        clock.advance(SESSION_TTL_MS);
        assert!(sessions.load().is_some());
    }

    #[test]
    fn test_expired_and_malformed_is_still_deleted() {
        let (sessions, mem, _) = store();
        let raw = format!(
            r#"{{"version":1,"updatedAt":{},"mode":"pickup","lineItems":{{}},"notes":""}}"#,
            T0 - SESSION_TTL_MS - 5
        );
        mem.set(SESSION_KEY, raw.as_bytes()).unwrap();

        assert!(sessions.load().is_none());
        assert!(mem.is_empty());
    }

    #[test]
    fn test_malformed_records_are_left_in_place() {
        let (sessions, mem, _) = store();
        let fresh = T0 - 1_000;
        let cases = [
            "not json".to_string(),
            "null".to_string(),
            format!(r#"{{"version":2,"updatedAt":{fresh},"mode":"pickup","lineItems":[],"notes":""}}"#),
            r#"{"version":1,"updatedAt":"yesterday","mode":"pickup","lineItems":[],"notes":""}"#
                .to_string(),
            format!(r#"{{"version":1,"updatedAt":{fresh},"mode":"pickup","lineItems":"none","notes":""}}"#),
            format!(r#"{{"version":1,"updatedAt":{fresh},"mode":7,"lineItems":[],"notes":""}}"#),
            format!(r#"{{"version":1,"updatedAt":{fresh},"mode":"pickup","lineItems":[],"notes":false}}"#),
        ];

        for raw in cases {
            mem.set(SESSION_KEY, raw.as_bytes()).unwrap();
            assert!(sessions.load().is_none(), "accepted: {raw}");
            assert!(mem.exists(SESSION_KEY).unwrap(), "deleted: {raw}");
        }
    }

    #[test]
    fn test_numeric_header_fields_are_loose() {
        let (sessions, mem, _) = store();
        let fresh = T0 - 1_000;
        let cases = [
            format!(r#"{{"version":1,"updatedAt":{fresh}.5,"mode":"pickup","lineItems":[],"notes":"hi"}}"#),
            format!(r#"{{"version":1.0,"updatedAt":{fresh},"mode":"pickup","lineItems":[],"notes":"hi"}}"#),
        ];

        for raw in cases {
            mem.set(SESSION_KEY, raw.as_bytes()).unwrap();
            let loaded = sessions.load().unwrap_or_else(|| panic!("rejected: {raw}"));
            assert_eq!(loaded.notes, "hi");
            assert_eq!(loaded.updated_at, fresh);
        }
    }

    #[test]
    fn test_out_of_range_price_is_malformed() {
        let (sessions, mem, _) = store();
        sessions.save(OrderMode::Pickup, sample_cart().items(), "");

        let mut record: serde_json::Value =
            serde_json::from_slice(&mem.get(SESSION_KEY).unwrap().unwrap()).unwrap();
        record["lineItems"][0]["data"]["base"]["price"] = serde_json::json!(1e300);
        mem.set(SESSION_KEY, record.to_string().as_bytes()).unwrap();

        assert!(sessions.load().is_none());
        assert!(mem.exists(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let (sessions, mem, _) = store();
        sessions.save(OrderMode::Pickup, sample_cart().items(), "");

        let mut record: serde_json::Value =
            serde_json::from_slice(&mem.get(SESSION_KEY).unwrap().unwrap()).unwrap();
        record["lineItems"][1]["data"]["item"]["price"] = serde_json::json!(-4);
        mem.set(SESSION_KEY, record.to_string().as_bytes()).unwrap();

        assert!(sessions.load().is_none());
        assert!(mem.exists(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_save_replaces_and_restamps() {
        let (sessions, _, clock) = store();
        sessions.save(OrderMode::Pickup, sample_cart().items(), "first");
        clock.advance(60_000);
        sessions.save(OrderMode::Delivery, &[], "second");

        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.updated_at, T0 + 60_000);
        assert!(loaded.line_items.is_empty());
        assert_eq!(loaded.notes, "second");
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let sessions = KvSessionStore::new(BrokenStore, ManualClock::new(T0));
        sessions.save(OrderMode::Pickup, sample_cart().items(), "x");
        sessions.clear();
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_custom_key_and_ttl() {
        let mem = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(T0);
        let sessions = KvSessionStore::new(mem.clone(), clock.clone())
            .with_key("other")
            .with_ttl(10);
        sessions.save(OrderMode::Pickup, &[], "");
        assert!(mem.exists("other").unwrap());

        clock.advance(11);
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_file_backed_record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(T0);
        let cart = sample_cart();
        KvSessionStore::new(FileStore::open(dir.path()).unwrap(), clock.clone()).save(
            OrderMode::Pickup,
            cart.items(),
            "",
        );

        let reopened = KvSessionStore::new(FileStore::open(dir.path()).unwrap(), clock);
        assert_eq!(reopened.load().unwrap().line_items, cart.items());
    }
}
