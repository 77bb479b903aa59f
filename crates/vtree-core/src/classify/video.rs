//! Video layout: one flat listing plus the source directory tree.

use std::path::Path;

use crate::classify::place;
use crate::host::HostServices;
use crate::models::{ContainerKind, MediaObject, Placement};
use crate::paths::{relative_dir, ALL_VIDEO, DIRECTORIES, VIDEO};

pub fn add_video<H: HostServices + ?Sized>(obj: &MediaObject, root: &Path, host: &H) {
    place(
        host,
        obj,
        Placement::new(&obj.title, [VIDEO, ALL_VIDEO]).container(ContainerKind::Generic),
    );

    let dir = relative_dir(&obj.location, root);
    if !dir.is_empty() {
        let chain = [VIDEO.to_string(), DIRECTORIES.to_string()]
            .into_iter()
            .chain(dir);
        place(
            host,
            obj,
            Placement::new(&obj.title, chain).container(ContainerKind::Generic),
        );
    }
}
