//! Surface-transit catalogue.
//!
//! Bus stops and per-direction route stop sequences for each operator, read
//! from a snapshot file produced elsewhere and shared through a
//! [`CatalogHandle`] that can be reloaded in place.

mod error;
mod handle;
mod model;
mod snapshot;

pub use error::CatalogError;
pub use handle::CatalogHandle;
pub use model::{CatalogBuilder, SurfaceCatalog};
pub use snapshot::{CatalogConfig, is_stale, load_snapshot, parse_snapshot};
