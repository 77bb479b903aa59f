//! vtree-core — virtual browsing tree layout for media servers.
//!
//! One media object in, zero or more placements out. The host owns the
//! content directory; this crate only decides where an item shows up.
//!
//! # Layout
//!
//! ```text
//! Audio/     All Audio, Artists/<artist>/..., Albums, Genres, Year, Composers
//! Pictures/  Date/<year>/<month>, Directories/..., Places/<country>/<city>
//! Video/     All Video, Directories/...
//! Online Services/Apple Trailers/  All Trailers, Genres, Release Date, Post Date
//! ```

pub mod classify;
pub mod error;
pub mod host;
pub mod models;
pub mod paths;

pub use classify::classify;
pub use error::{ClassifyError, ClassifyResult};
pub use host::{Geocoder, HostServices, LayoutOptions, Place, PlacementLog};
pub use models::*;
