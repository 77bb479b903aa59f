//! Host capabilities injected into the classifier.
//!
//! The media server owns the content directory; the classifier only asks
//! it to register placements and to read a few layout switches. All
//! methods take `&self` — hosts manage their own interior mutability.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::models::{MediaObject, Placement};

/// Layout switches. Everything is off unless the host turns it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Prefix album-view titles with the zero-padded track number.
    pub track_numbers: bool,
    /// Prefix album-view titles with `[MONO]`/`[STEREO]`/`[MULTI]`.
    pub channel_tags: bool,
    /// Place geotagged pictures under `Pictures/Places`.
    ///
    /// Has no effect unless the host also supplies a [`Geocoder`] and the
    /// object carries the four EXIF GPS aux fields. The bundled CLI and FFI
    /// hosts have no geocoder, so for them this switch is inert.
    pub geocoding: bool,
}

impl LayoutOptions {
    /// Parse options from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Result of a reverse-geocoding lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub country: String,
    pub city: String,
}

/// Reverse geocoding backend, supplied by the host when available.
pub trait Geocoder {
    fn geocode(&self, lat: f64, lng: f64) -> Option<Place>;
}

/// What the classifier may ask of its host.
pub trait HostServices {
    /// Show `obj` under `placement.chain`, labelled `placement.title`.
    fn register(&self, obj: &MediaObject, placement: Placement);

    fn options(&self) -> LayoutOptions {
        LayoutOptions::default()
    }

    fn geocoder(&self) -> Option<&dyn Geocoder> {
        None
    }
}

/// Host that records placements in order. Used by the CLI, the FFI layer
/// and tests.
#[derive(Default)]
pub struct PlacementLog {
    options: LayoutOptions,
    geocoder: Option<Box<dyn Geocoder + Send + Sync>>,
    placements: Mutex<Vec<Placement>>,
}

impl PlacementLog {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_geocoder(mut self, geocoder: impl Geocoder + Send + Sync + 'static) -> Self {
        self.geocoder = Some(Box::new(geocoder));
        self
    }

    /// Warn about switches this host cannot honour. Returns `false` when
    /// some enabled option will be ignored.
    pub fn check_options(&self) -> bool {
        if self.options.geocoding && self.geocoder.is_none() {
            log::warn!("vtree: geocoding enabled but no geocoder is available; Places is skipped");
            return false;
        }
        true
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Placement> {
        std::mem::take(&mut *self.placements.lock())
    }

    pub fn snapshot(&self) -> Vec<Placement> {
        self.placements.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.placements.lock().iter().map(Placement::path).collect()
    }

    pub fn len(&self) -> usize {
        self.placements.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.lock().is_empty()
    }
}

impl HostServices for PlacementLog {
    fn register(&self, _obj: &MediaObject, placement: Placement) {
        self.placements.lock().push(placement);
    }

    fn options(&self) -> LayoutOptions {
        self.options
    }

    fn geocoder(&self) -> Option<&dyn Geocoder> {
        self.geocoder.as_deref().map(|g| g as &dyn Geocoder)
    }
}
