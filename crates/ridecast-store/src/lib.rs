//! Revisioned storage for Ridecast weather searches.
//!
//! This crate provides SQLite-based storage for search records with
//! document-style optimistic concurrency: each write returns a new revision,
//! and a write that names an outdated revision is rejected.
//!
//! # Features
//!
//! - Fetch, insert and conditionally replace records by identifier
//! - Numbered identifiers for manually entered searches
//! - Listing in insertion order, newest first by default
//!
//! # Example
//!
//! ```no_run
//! use ridecast_store::{ListOrder, Store};
//!
//! let store = Store::open_default()?;
//!
//! for record in store.list(ListOrder::NewestFirst)? {
//!     println!("{} {}: {}", record.id, record.location, record.rideability_score);
//! }
//! # Ok::<(), ridecast_store::Error>(())
//! ```

mod error;
mod schema;
mod store;

pub use error::{Error, Result};
pub use store::{ListOrder, Store};

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/ridecast/searches.db`
/// - macOS: `~/Library/Application Support/ridecast/searches.db`
/// - Windows: `C:\Users\<user>\AppData\Local\ridecast\searches.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("ridecast")
        .join("searches.db")
}
