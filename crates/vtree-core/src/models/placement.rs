//! Placement directives — what the classifier hands to the host.

use serde::{Deserialize, Serialize};

/// Renderer hint for the deepest folder of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    #[serde(rename = "object.container")]
    Generic,
    #[serde(rename = "object.container.album.musicAlbum")]
    MusicAlbum,
    #[serde(rename = "object.container.genre.musicGenre")]
    MusicGenre,
    #[serde(rename = "object.container.person.musicComposer")]
    MusicComposer,
}

impl ContainerKind {
    /// UPnP class string the host stores on the container.
    pub fn upnp_class(self) -> &'static str {
        match self {
            ContainerKind::Generic => "object.container",
            ContainerKind::MusicAlbum => "object.container.album.musicAlbum",
            ContainerKind::MusicGenre => "object.container.genre.musicGenre",
            ContainerKind::MusicComposer => "object.container.person.musicComposer",
        }
    }
}

/// Request to show the object under `chain` with label `title`.
///
/// `container: None` leaves the folder class to the host default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub title: String,
    pub chain: Vec<String>,
    pub container: Option<ContainerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Placement {
    pub fn new<I, S>(title: impl Into<String>, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            chain: chain.into_iter().map(Into::into).collect(),
            container: None,
            description: None,
        }
    }

    pub fn container(mut self, kind: ContainerKind) -> Self {
        self.container = Some(kind);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Slash-joined folder path with segment separators escaped.
    ///
    /// Unlike a plain `chain.join("/")`, an artist such as `AC/DC` stays a
    /// single folder: the result is `/Audio/Artists/AC\/DC`, not
    /// `/Audio/Artists/AC/DC`.
    pub fn path(&self) -> String {
        crate::paths::join_chain(&self.chain)
    }
}
