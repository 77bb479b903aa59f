//! Audio layout: artists, albums, genres, years, composers.

use crate::classify::place;
use crate::host::{HostServices, LayoutOptions};
use crate::models::{res, ContainerKind, MediaObject, MetaField, Placement};
use crate::paths::*;

/// Placeholder for missing artist, album, genre and year.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for missing composer, conductor and orchestra.
pub const NONE: &str = "None";

/// Audio metadata with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub composer: String,
    pub conductor: String,
    pub orchestra: String,
    pub track_number: Option<String>,
    pub description: String,
}

impl AudioTags {
    /// Read tags from `obj`, falling back to the file-derived title and
    /// the placeholder values above.
    pub fn gather(obj: &MediaObject) -> Self {
        let title = obj.meta_or(MetaField::Title, &obj.title).to_string();
        let artist = obj.meta_or(MetaField::Artist, UNKNOWN).to_string();
        let album = obj.meta_or(MetaField::Album, UNKNOWN).to_string();
        // Year comes first in the date, so a missing date yields "Unknown".
        let year = obj
            .meta_or(MetaField::Date, UNKNOWN)
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();
        let genre = obj.meta_or(MetaField::Genre, UNKNOWN).to_string();

        let description = match obj.meta(MetaField::Description) {
            Some(d) => d.to_string(),
            None => describe(&[
                artist.as_str(),
                album.as_str(),
                title.as_str(),
                year.as_str(),
                genre.as_str(),
            ]),
        };

        Self {
            composer: obj.meta_or(MetaField::Composer, NONE).to_string(),
            conductor: obj.meta_or(MetaField::Conductor, NONE).to_string(),
            orchestra: obj.meta_or(MetaField::Orchestra, NONE).to_string(),
            track_number: obj.meta(MetaField::TrackNumber).map(str::to_string),
            title,
            artist,
            album,
            year,
            genre,
            description,
        }
    }

    /// `Artist - Album - Title`, used in the flat full-name listings.
    pub fn full_name(&self) -> String {
        [self.artist.as_str(), self.album.as_str(), self.title.as_str()].join(" - ")
    }
}

/// Comma-join the known values, dropping placeholders.
pub fn describe(values: &[&str]) -> String {
    values
        .iter()
        .copied()
        .filter(|v| *v != UNKNOWN)
        .collect::<Vec<_>>()
        .join(",")
}

/// Prefix for titles inside album-like folders.
fn album_prefix(obj: &MediaObject, tags: &AudioTags, options: LayoutOptions) -> String {
    let mut prefix = String::new();
    if options.track_numbers {
        let track = tags.track_number.as_deref().unwrap_or_default();
        prefix.push_str(&format!("{:0>2} ", track));
    }
    if options.channel_tags {
        let tag = match obj.resource(res::AUDIO_CHANNELS).unwrap_or("0") {
            "1" => "[MONO] ",
            "2" => "[STEREO] ",
            _ => "[MULTI] ",
        };
        prefix.push_str(tag);
    }
    prefix
}

pub fn add_audio<H: HostServices + ?Sized>(obj: &MediaObject, host: &H) {
    let tags = AudioTags::gather(obj);
    let artist = tags.artist.as_str();
    let album = tags.album.as_str();
    let at = |title: &str, chain: &[&str]| {
        Placement::new(title, chain.iter().copied()).description(Some(tags.description.clone()))
    };

    let title = tags.title.as_str();
    place(host, obj, at(title, &[AUDIO, ALL_AUDIO]));
    place(host, obj, at(title, &[AUDIO, ARTISTS, artist, ALL_SONGS]));

    let full_name = tags.full_name();
    place(host, obj, at(&full_name, &[AUDIO, ALL_FULL_NAME]));
    place(host, obj, at(&full_name, &[AUDIO, ARTISTS, artist, ALL_FULL_NAME]));

    // Album containers are sorted by track number on the host side.
    let title = format!("{}{}", album_prefix(obj, &tags, host.options()), tags.title);
    place(
        host,
        obj,
        at(&title, &[AUDIO, ARTISTS, artist, album]).container(ContainerKind::MusicAlbum),
    );
    place(
        host,
        obj,
        at(&title, &[AUDIO, ALBUMS, album]).container(ContainerKind::MusicAlbum),
    );
    place(
        host,
        obj,
        at(&title, &[AUDIO, GENRES, tags.genre.as_str()]).container(ContainerKind::MusicGenre),
    );
    place(host, obj, at(&title, &[AUDIO, YEAR, tags.year.as_str()]));
    place(
        host,
        obj,
        at(&title, &[AUDIO, COMPOSERS, tags.composer.as_str()])
            .container(ContainerKind::MusicComposer),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlacementLog;

    fn time() -> MediaObject {
        MediaObject::new("audio/mpeg", "/lib/pf/05 Time.mp3")
            .with_meta(MetaField::Title, "Time")
            .with_meta(MetaField::Artist, "Pink Floyd")
            .with_meta(MetaField::Album, "The Dark Side of the Moon")
            .with_meta(MetaField::Date, "1973-03-01")
            .with_meta(MetaField::Genre, "Progressive Rock")
            .with_meta(MetaField::TrackNumber, "4")
    }

    #[test]
    fn places_in_order_with_containers() {
        let log = PlacementLog::default();
        add_audio(&time(), &log);
        let placements = log.snapshot();

        let got: Vec<(String, Option<ContainerKind>)> = placements
            .iter()
            .map(|p| (p.path(), p.container))
            .collect();
        let album = Some(ContainerKind::MusicAlbum);
        let expected = vec![
            ("/Audio/All Audio", None),
            ("/Audio/Artists/Pink Floyd/All Songs", None),
            ("/Audio/All - full name", None),
            ("/Audio/Artists/Pink Floyd/All - full name", None),
            ("/Audio/Artists/Pink Floyd/The Dark Side of the Moon", album),
            ("/Audio/Albums/The Dark Side of the Moon", album),
            ("/Audio/Genres/Progressive Rock", Some(ContainerKind::MusicGenre)),
            ("/Audio/Year/1973", None),
            ("/Audio/Composers/None", Some(ContainerKind::MusicComposer)),
        ];
        let expected: Vec<(String, Option<ContainerKind>)> = expected
            .into_iter()
            .map(|(p, c)| (p.to_string(), c))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn titles_per_placement() {
        let log = PlacementLog::default();
        add_audio(&time(), &log);
        let titles: Vec<String> = log.take().into_iter().map(|p| p.title).collect();

        let full = "Pink Floyd - The Dark Side of the Moon - Time";
        assert_eq!(titles[..4], ["Time", "Time", full, full]);
        assert!(titles[4..].iter().all(|t| t == "Time"));
    }

    #[test]
    fn missing_tags_use_placeholders() {
        let obj = MediaObject::new("audio/flac", "/lib/track01.flac");
        let tags = AudioTags::gather(&obj);

        assert_eq!(tags.title, "track01.flac");
        assert_eq!(tags.artist, UNKNOWN);
        assert_eq!(tags.album, UNKNOWN);
        assert_eq!(tags.year, UNKNOWN);
        assert_eq!(tags.genre, UNKNOWN);
        assert_eq!(tags.composer, NONE);
        assert_eq!(tags.conductor, NONE);
        assert_eq!(tags.orchestra, NONE);
        assert_eq!(tags.full_name(), "Unknown - Unknown - track01.flac");
        assert_eq!(tags.description, "track01.flac");
    }

    #[test]
    fn description_skips_unknown_artist_and_album() {
        let obj = MediaObject::new("audio/mpeg", "/lib/a.mp3")
            .with_meta(MetaField::Title, "Intro")
            .with_meta(MetaField::Date, "2001-01-01")
            .with_meta(MetaField::Genre, "Ambient");
        assert_eq!(AudioTags::gather(&obj).description, "Intro,2001,Ambient");
    }

    #[test]
    fn explicit_description_wins() {
        let obj = time().with_meta(MetaField::Description, "liner notes");
        assert_eq!(AudioTags::gather(&obj).description, "liner notes");

        let log = PlacementLog::default();
        add_audio(&obj, &log);
        assert!(log
            .snapshot()
            .iter()
            .all(|p| p.description.as_deref() == Some("liner notes")));
    }

    #[test]
    fn track_number_prefix_only_in_album_views() {
        let log = PlacementLog::new(LayoutOptions {
            track_numbers: true,
            ..Default::default()
        });
        add_audio(&time(), &log);
        let titles: Vec<String> = log.take().into_iter().map(|p| p.title).collect();

        assert_eq!(titles[0], "Time");
        assert_eq!(titles[4], "04 Time");
        assert_eq!(titles[8], "04 Time");
    }

    #[test]
    fn channel_tags_follow_track_prefix() {
        let mut obj = time();
        obj.resources.insert(res::AUDIO_CHANNELS.into(), "2".into());
        let log = PlacementLog::new(LayoutOptions {
            track_numbers: true,
            channel_tags: true,
            ..Default::default()
        });
        add_audio(&obj, &log);
        assert_eq!(log.take()[4].title, "04 [STEREO] Time");
    }

    #[test]
    fn channel_tags_default_to_multi() {
        let log = PlacementLog::new(LayoutOptions {
            channel_tags: true,
            ..Default::default()
        });
        add_audio(&time(), &log);
        assert_eq!(log.take()[5].title, "[MULTI] Time");
    }
}
