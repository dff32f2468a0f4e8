//! # Orelax
//!
//! Real-estate marketplace demo - a local-first rental and sale catalog
//! with bookings, purchases, chat threads and a map view, persisted as
//! JSON records behind a pluggable key-value store.
//!
//! ## Features
//!
//! - **Pluggable persistence**: file-backed or in-memory record store
//! - **Versioned seed data**: demo listings loaded once, upgraded in place
//! - **Catalog**: rent/buy search, featured listings, owner submissions
//! - **Bookings and purchases**: quotes with a checkout discount
//! - **Map view**: Web Mercator markers with drag, wheel and pinch zoom
//!
//! ## Modules
//!
//! - [`store`]: record store and storage backends
//! - [`seed`]: versioned demo dataset loader
//! - [`catalog`]: listing search and submission
//! - [`booking`]: bookings, checkout quotes and purchases
//! - [`map`]: projection, viewport and marker grouping
//!
//! ## Quick Start
//!
//! ```rust
//! use orelax::store::{MemoryBackend, RecordStore};
//! use orelax::{booking, catalog, seed};
//! use orelax::model::RentType;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open a store and load the demo dataset
//!     let mut store = RecordStore::new(MemoryBackend::new());
//!     seed::ensure_seeded(&mut store);
//!
//!     // Browse the catalog
//!     let featured = catalog::featured(&store);
//!     println!("{} featured listings", featured.len());
//!
//!     // Book a stay and price the checkout
//!     let listing = catalog::property(&store, "1")?;
//!     let booking = booking::create_booking(
//!         &mut store,
//!         &listing.id,
//!         "2026-09-01",
//!         2,
//!         RentType::Monthly,
//!     )?;
//!     let quote = booking::checkout_quote(&store, &booking.id)?;
//!     println!("Total due: {}", quote.total);
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod booking;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod map;
pub mod model;
pub mod seed;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    FileBackend, MemoryBackend, RecordStore, StorageBackend, StoreError, StoreResult, keys,
};

pub use model::{
    Booking, BookingStatus, Chat, GeoPoint, Message, Property, PropertyKind, Purchase, RentType,
    User,
};

pub use error::{MarketError, MarketResult};

pub use booking::Quote;

pub use catalog::{PropertyDraft, SearchFilter};

pub use map::{MarkerGroup, MarkerPosition, Viewport};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
