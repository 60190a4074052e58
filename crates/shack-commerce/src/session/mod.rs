//! Order session persistence.
//!
//! The in-progress order (mode, line items, notes) is saved as one versioned
//! record with a two hour time-to-live, so a reload picks up where the
//! customer left off.

mod record;
mod store;

pub use record::{OrderMode, OrderSession, SESSION_VERSION};
pub use store::{KvSessionStore, SessionStore, SESSION_KEY, SESSION_TTL_MS};
