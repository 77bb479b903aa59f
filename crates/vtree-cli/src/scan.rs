//! Local stand-in for the media server's import step: walk a directory,
//! guess mime types, extract tags and build `MediaObject`s.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use vtree_core::{res, MediaObject, MetaField};

const MAX_SCAN_DEPTH: usize = 32;

/// Bytes read from the head of an Ogg file when probing for Theora.
const OGG_PROBE_LEN: usize = 4096;

/// Extension → mime type, as the server's magic-less fallback would map them.
const MIME_TYPES: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("wav", "audio/x-wav"),
    ("opus", "audio/opus"),
    ("oga", "audio/ogg"),
    ("wma", "audio/x-ms-wma"),
    ("aiff", "audio/x-aiff"),
    ("ogg", "application/ogg"),
    ("m3u", "audio/x-mpegurl"),
    ("pls", "audio/x-scpls"),
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("ogv", "video/ogg"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
];

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Recursively collect every recognized media file under `dir`.
pub fn scan_directory(dir: &Path) -> Vec<MediaObject> {
    let mut objects = Vec::new();
    scan_directory_inner(dir, 0, &mut objects);
    objects.sort_by(|a, b| a.location.cmp(&b.location));
    objects
}

fn scan_directory_inner(dir: &Path, depth: usize, out: &mut Vec<MediaObject>) {
    if depth > MAX_SCAN_DEPTH {
        log::warn!("vtree: scan depth limit reached at {}", dir.display());
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("vtree: cannot read {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        // Skip directory symlinks to prevent loops
        let is_symlink = std::fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        if path.is_file() {
            if let Some(obj) = media_object(&path) {
                out.push(obj);
            }
        } else if path.is_dir() && !is_symlink {
            scan_directory_inner(&path, depth + 1, out);
        }
    }
}

/// Build the object the server would hand to the layout, or `None` for
/// files it would not import.
pub fn media_object(path: &Path) -> Option<MediaObject> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    let mime = mime_for_extension(ext)?;
    let mut obj = MediaObject::new(mime, PathBuf::from(path));

    match mime.split('/').next() {
        Some("audio") => read_audio_tags(path, &mut obj),
        Some("image") => {
            if let Some(date) = file_date(path) {
                obj.meta.insert(MetaField::Date, date);
            }
        }
        _ => {}
    }

    if mime == "application/ogg" {
        obj.theora = is_ogg_theora(path);
        if !obj.theora {
            read_audio_tags(path, &mut obj);
        }
    }

    Some(obj)
}

fn read_audio_tags(path: &Path, obj: &mut MediaObject) {
    let tagged = match Probe::open(path).and_then(|p| p.read()) {
        Ok(t) => t,
        Err(e) => {
            log::debug!("vtree: no tags in {}: {}", path.display(), e);
            return;
        }
    };

    if let Some(channels) = tagged.properties().channels() {
        obj.resources
            .insert(res::AUDIO_CHANNELS.to_string(), channels.to_string());
    }

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return;
    };

    let mut set = |field: MetaField, value: Option<String>| {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            obj.meta.insert(field, v);
        }
    };

    set(MetaField::Title, tag.title().map(|s| s.to_string()));
    set(MetaField::Artist, tag.artist().map(|s| s.to_string()));
    set(MetaField::Album, tag.album().map(|s| s.to_string()));
    set(MetaField::Genre, tag.genre().map(|s| s.to_string()));
    set(MetaField::Description, tag.comment().map(|s| s.to_string()));
    set(MetaField::TrackNumber, tag.track().map(|n| n.to_string()));
    set(
        MetaField::Date,
        tag.get_string(&ItemKey::RecordingDate)
            .map(str::to_string)
            .or_else(|| tag.year().map(|y| y.to_string())),
    );
    for (field, key) in [
        (MetaField::Composer, ItemKey::Composer),
        (MetaField::Conductor, ItemKey::Conductor),
    ] {
        set(field, tag.get_string(&key).map(str::to_string));
    }
}

/// Ogg carries Theora when one of the leading stream headers is a Theora
/// identification packet.
pub fn is_ogg_theora(path: &Path) -> bool {
    let mut head = Vec::with_capacity(OGG_PROBE_LEN);
    let read = File::open(path)
        .and_then(|f| f.take(OGG_PROBE_LEN as u64).read_to_end(&mut head));
    if read.is_err() || !head.starts_with(b"OggS") {
        return false;
    }
    head.windows(7).any(|w| w == b"\x80theora")
}

/// File modification date as `YYYY-MM-DD`, standing in for the EXIF date.
fn file_date(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let local: chrono::DateTime<chrono::Local> = modified.into();
    Some(local.format("%Y-%m-%d").to_string())
}
