//! Media object as handed over by the host.
//!
//! Metadata keys are a closed enum so lookups are typed; they serialize
//! to the host's own key names so JSON from the server maps 1:1.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metadata fields the classifier knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetaField {
    #[serde(rename = "dc:title")]
    Title,
    #[serde(rename = "upnp:artist")]
    Artist,
    #[serde(rename = "upnp:album")]
    Album,
    #[serde(rename = "dc:date")]
    Date,
    #[serde(rename = "upnp:genre")]
    Genre,
    #[serde(rename = "upnp:composer")]
    Composer,
    #[serde(rename = "upnp:conductor")]
    Conductor,
    #[serde(rename = "upnp:orchestra")]
    Orchestra,
    #[serde(rename = "dc:description")]
    Description,
    #[serde(rename = "upnp:originalTrackNumber")]
    TrackNumber,
}

impl MetaField {
    pub fn key(self) -> &'static str {
        match self {
            MetaField::Title => "dc:title",
            MetaField::Artist => "upnp:artist",
            MetaField::Album => "upnp:album",
            MetaField::Date => "dc:date",
            MetaField::Genre => "upnp:genre",
            MetaField::Composer => "upnp:composer",
            MetaField::Conductor => "upnp:conductor",
            MetaField::Orchestra => "upnp:orchestra",
            MetaField::Description => "dc:description",
            MetaField::TrackNumber => "upnp:originalTrackNumber",
        }
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Auxiliary data keys (free-form map on the object).
pub mod aux {
    /// Date a trailer was posted to the feed, `YYYY-MM-DD...`.
    pub const TRAILER_POST_DATE: &str = "T:postdate";

    pub const GPS_LATITUDE: &str = "Exif.GPSInfo.GPSLatitude";
    pub const GPS_LATITUDE_REF: &str = "Exif.GPSInfo.GPSLatitudeRef";
    pub const GPS_LONGITUDE: &str = "Exif.GPSInfo.GPSLongitude";
    pub const GPS_LONGITUDE_REF: &str = "Exif.GPSInfo.GPSLongitudeRef";
}

/// Resource attribute keys.
pub mod res {
    pub const AUDIO_CHANNELS: &str = "nrAudioChannels";
}

/// Special origin of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineService {
    #[default]
    None,
    Youtube,
    AppleTrailers,
    Sopcast,
}

/// One importable item plus its extracted metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaObject {
    pub mime_type: String,
    /// Display title; the host initialises it from the file name.
    pub title: String,
    pub location: PathBuf,
    #[serde(default)]
    pub meta: BTreeMap<MetaField, String>,
    #[serde(default)]
    pub aux: BTreeMap<String, String>,
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
    #[serde(default)]
    pub online_service: OnlineService,
    #[serde(default)]
    pub theora: bool,
}

impl MediaObject {
    pub fn new(mime_type: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        let title = location
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            mime_type: mime_type.into(),
            title,
            location,
            ..Default::default()
        }
    }

    pub fn with_meta(mut self, field: MetaField, value: impl Into<String>) -> Self {
        self.meta.insert(field, value.into());
        self
    }

    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aux.insert(key.into(), value.into());
        self
    }

    /// Metadata value, or `None` when the host did not extract it.
    pub fn meta(&self, field: MetaField) -> Option<&str> {
        self.meta.get(&field).map(String::as_str)
    }

    /// Metadata value with an explicit default.
    pub fn meta_or<'a>(&'a self, field: MetaField, default: &'a str) -> &'a str {
        self.meta(field).unwrap_or(default)
    }

    pub fn aux(&self, key: &str) -> Option<&str> {
        self.aux.get(key).map(String::as_str)
    }

    pub fn resource(&self, key: &str) -> Option<&str> {
        self.resources.get(key).map(String::as_str)
    }

    /// Top-level mime type (`audio` for `audio/mpeg`).
    pub fn media_kind(&self) -> &str {
        self.mime_type.split('/').next().unwrap_or_default()
    }
}
