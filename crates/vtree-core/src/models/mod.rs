//! vtree data models.
//!
//! The object comes from the host and is never mutated here. Placements
//! carry their own display title, so one object can be labelled
//! differently in each folder without touching shared state.

pub mod media;
pub mod placement;

pub use media::{aux, res, MediaObject, MetaField, OnlineService};
pub use placement::{ContainerKind, Placement};
