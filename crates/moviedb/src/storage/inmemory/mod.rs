//! In-memory storage backend.
//!
//! Stores all items in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Used as the
//! default backend with the demo catalog, and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use moviedb::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::with_items(demo_catalog())?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
