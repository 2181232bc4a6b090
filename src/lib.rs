//! # favicon-dl
//!
//! Cancellable batch favicon downloader for embedding in password managers,
//! bookmark tools, and other applications that keep a list of sites.
//!
//! ## Design Philosophy
//!
//! favicon-dl is designed to be:
//! - **Sequential and predictable** - One request at a time, progress in item order
//! - **Cooperatively cancellable** - The host's cancel check is polled before every item
//! - **Library-first** - No CLI or UI; hosts render progress however they like
//! - **Single commit** - Downloaded icons reach the host's store in one bulk call
//!
//! Every item ends up in exactly one bucket: downloaded, not found (HTTP 404),
//! or failed for any other reason. Per-item failures never stop a batch.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use favicon_dl::{BatchRunner, Config, MemoryIconStore, WorkItem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryIconStore::new());
//!     let runner = BatchRunner::from_config(&Config::default(), store.clone())?;
//!
//!     // Subscribe to events
//!     let (events, mut rx) = tokio::sync::broadcast::channel::<favicon_dl::Event>(64);
//!     tokio::spawn(async move {
//!         while let Ok(event) = rx.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let items = vec![
//!         WorkItem::new(1, "https://www.rust-lang.org/").with_title("Rust"),
//!         WorkItem::new(2, "https://crates.io/").with_title("crates.io"),
//!     ];
//!     let result = runner.spawn(items, || false, events).await?;
//!     println!("{} ({})", result.progress, result.status.label());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch coordination, cancellation, and observers
pub mod batch;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Single-item fetching and classification
pub mod fetch;
/// Progress counters
pub mod progress;
/// Icon commit interface
pub mod store;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use batch::{BatchObserver, BatchRunner, CancelCheck, NoopObserver, cancel_on_signal};
pub use config::{Config, FetchConfig};
pub use error::{Error, Result};
pub use fetch::{HttpIconFetcher, IconFetcher};
pub use store::{IconStore, MemoryIconStore};
pub use types::{
    BatchResult, BatchStatus, Event, FetchOutcome, FetchedIcon, IconId, ItemId, ProgressState,
    WorkItem,
};
