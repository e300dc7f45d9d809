// Stay Catalog - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod entities;   // Entity Models - validation and atomic updates
pub mod error;      // Error taxonomy shared by every layer
pub mod facade;     // Integrity Facade - cross-entity rules and cascades
pub mod repository; // In-memory storage with stable iteration order

// Re-export commonly used types
pub use entities::{Account, Amenity, Entity, Patch, Place, Review};
pub use error::{CatalogError, EntityKind, Result};
pub use facade::{AmenityRef, CatalogFacade, OwnerSummary, PlaceView, ReviewSummary};
pub use repository::InMemoryRepository;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
