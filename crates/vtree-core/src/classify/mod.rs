//! Dispatcher — routes one object to the handlers for its media kind.

use std::path::Path;

use crate::error::ClassifyResult;
use crate::host::HostServices;
use crate::models::{MediaObject, OnlineService, Placement};

pub mod audio;
pub mod image;
pub mod trailer;
pub mod video;

/// Playlist formats are imported elsewhere and never placed here.
const PLAYLIST_MIME_TYPES: &[&str] = &["audio/x-mpegurl", "audio/x-scpls"];

const OGG_MIME_TYPE: &str = "application/ogg";

/// Register every placement of `obj` with `host`.
///
/// `root` is the library root the object was imported from. The first
/// handler error aborts the call; placements already registered stay.
///
/// The kind dispatch and the `application/ogg` check are independent, so
/// an object matching both would be placed by both handlers. Only the
/// exact mime string `application/ogg` takes the Ogg branch, whose kind
/// is `application`, so in practice they never overlap.
pub fn classify<H: HostServices + ?Sized>(
    obj: &MediaObject,
    root: &Path,
    host: &H,
) -> ClassifyResult<()> {
    if PLAYLIST_MIME_TYPES.contains(&obj.mime_type.as_str()) {
        log::debug!("vtree: skipping playlist {}", obj.location.display());
        return Ok(());
    }

    log::debug!(
        "vtree: classifying {} ({})",
        obj.location.display(),
        obj.mime_type
    );

    match obj.media_kind() {
        "audio" => audio::add_audio(obj, host),
        "image" => image::add_image(obj, root, host)?,
        "video" => {
            if obj.online_service == OnlineService::AppleTrailers {
                trailer::add_trailer(obj, host);
            } else {
                video::add_video(obj, root, host);
            }
        }
        _ => {}
    }

    // Ogg is one container for both Theora video and Vorbis audio; the
    // host's codec probe sets `theora`.
    if obj.mime_type == OGG_MIME_TYPE {
        if obj.theora {
            video::add_video(obj, root, host);
        } else {
            audio::add_audio(obj, host);
        }
    }

    Ok(())
}

/// Hand one placement to the host.
pub(crate) fn place<H: HostServices + ?Sized>(host: &H, obj: &MediaObject, placement: Placement) {
    log::trace!("vtree: {} -> {}", placement.title, placement.path());
    host.register(obj, placement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlacementLog;
    use crate::models::ContainerKind;

    fn run(obj: &MediaObject, root: &str) -> PlacementLog {
        let log = PlacementLog::default();
        classify(obj, Path::new(root), &log).unwrap();
        log
    }

    #[test]
    fn playlists_are_not_placed() {
        for mime in PLAYLIST_MIME_TYPES {
            let obj = MediaObject::new(*mime, "/lib/list.m3u");
            assert!(run(&obj, "/lib").is_empty());
        }
    }

    #[test]
    fn unknown_kind_is_ignored() {
        let obj = MediaObject::new("text/plain", "/lib/readme.txt");
        assert!(run(&obj, "/lib").is_empty());
    }

    #[test]
    fn ogg_theora_goes_to_video_only() {
        let mut obj = MediaObject::new("application/ogg", "/lib/clips/a.ogg");
        obj.theora = true;
        let log = run(&obj, "/lib");

        assert_eq!(log.paths(), vec!["/Video/All Video", "/Video/Directories/clips"]);
        assert!(log
            .snapshot()
            .iter()
            .all(|p| p.container == Some(ContainerKind::Generic)));
    }

    #[test]
    fn ogg_vorbis_goes_to_audio_only() {
        let obj = MediaObject::new("application/ogg", "/lib/a.ogg");
        let paths = run(&obj, "/lib").paths();

        assert_eq!(paths.len(), 9);
        assert!(paths.iter().all(|p| p.starts_with("/Audio/")));
    }

    #[test]
    fn video_with_trailer_service_uses_trailer_layout() {
        let mut obj = MediaObject::new("video/quicktime", "/feeds/t.mov");
        obj.online_service = OnlineService::AppleTrailers;
        let paths = run(&obj, "/lib").paths();

        assert_eq!(paths, vec!["/Online Services/Apple Trailers/All Trailers"]);
    }

    #[test]
    fn other_online_services_use_video_layout() {
        let mut obj = MediaObject::new("video/mp4", "/lib/yt.mp4");
        obj.online_service = OnlineService::Youtube;
        assert_eq!(run(&obj, "/lib").paths(), vec!["/Video/All Video"]);
    }
}
