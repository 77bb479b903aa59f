//! Apple Trailers layout: genres, release month, post month.
//!
//! The library root plays no part here; trailers come from a feed.

use crate::classify::place;
use crate::host::HostServices;
use crate::models::{aux, MediaObject, MetaField, Placement};
use crate::paths::{ALL_TRAILERS, APPLE_TRAILERS, GENRES, ONLINE_SERVICES, POST_DATE, RELEASE_DATE};

/// Genre lists arrive as `"Science Fiction, Thriller"`.
const GENRE_SEPARATOR: &str = ", ";

/// `YYYY-MM` prefix of a date.
fn year_month(date: Option<&str>) -> Option<String> {
    let date = date?;
    if date.chars().count() < 7 {
        return None;
    }
    Some(date.chars().take(7).collect())
}

pub fn add_trailer<H: HostServices + ?Sized>(obj: &MediaObject, host: &H) {
    let at = |leaf: &[&str]| {
        let chain = [ONLINE_SERVICES, APPLE_TRAILERS]
            .into_iter()
            .chain(leaf.iter().copied());
        Placement::new(&obj.title, chain)
    };

    place(host, obj, at(&[ALL_TRAILERS]));

    if let Some(genres) = obj.meta(MetaField::Genre) {
        for genre in genres.split(GENRE_SEPARATOR).filter(|g| !g.is_empty()) {
            place(host, obj, at(&[GENRES, genre]));
        }
    }

    if let Some(month) = year_month(obj.meta(MetaField::Date)) {
        place(host, obj, at(&[RELEASE_DATE, month.as_str()]));
    }

    if let Some(month) = year_month(obj.aux(aux::TRAILER_POST_DATE)) {
        place(host, obj, at(&[POST_DATE, month.as_str()]));
    }
}
