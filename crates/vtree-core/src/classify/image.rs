//! Picture layout: by date, by source directory, optionally by place.

use std::path::Path;

use crate::classify::place;
use crate::error::{ClassifyError, ClassifyResult};
use crate::host::HostServices;
use crate::models::{aux, MediaObject, MetaField, Placement};
use crate::paths::{relative_dir, DATE, DIRECTORIES, PICTURES, PLACES};

pub fn add_image<H: HostServices + ?Sized>(
    obj: &MediaObject,
    root: &Path,
    host: &H,
) -> ClassifyResult<()> {
    // Pictures have no date fallback; the host reports the failure.
    let date = obj
        .meta(MetaField::Date)
        .ok_or_else(|| ClassifyError::missing(MetaField::Date))?;
    let mut parts = date.split('-');
    let (year, month) = match (parts.next(), parts.next()) {
        (Some(year), Some(month)) => (year, month),
        _ => return Err(ClassifyError::malformed(MetaField::Date.key(), date)),
    };
    place(host, obj, Placement::new(&obj.title, [PICTURES, DATE, year, month]));

    let dir = relative_dir(&obj.location, root);
    if !dir.is_empty() {
        let chain = [PICTURES.to_string(), DIRECTORIES.to_string()]
            .into_iter()
            .chain(dir);
        place(host, obj, Placement::new(&obj.title, chain));
    }

    add_place(obj, host)
}

/// `Pictures/Places/<country>/<city>` for geotagged pictures.
///
/// Needs the `geocoding` option, a host geocoder and all four GPS fields;
/// anything missing is a no-op.
fn add_place<H: HostServices + ?Sized>(obj: &MediaObject, host: &H) -> ClassifyResult<()> {
    if !host.options().geocoding {
        return Ok(());
    }
    let Some(geocoder) = host.geocoder() else {
        log::debug!("vtree: geocoding enabled but host has no geocoder");
        return Ok(());
    };
    let Some((lat, lng)) = gps_position(obj)? else {
        return Ok(());
    };

    match geocoder.geocode(lat, lng) {
        Some(found) => {
            let chain = [PICTURES, PLACES, found.country.as_str(), found.city.as_str()];
            place(host, obj, Placement::new(&obj.title, chain));
        }
        None => log::debug!("vtree: no place found for {lat},{lng}"),
    }
    Ok(())
}

/// Decimal latitude/longitude from the EXIF GPS aux fields.
pub fn gps_position(obj: &MediaObject) -> ClassifyResult<Option<(f64, f64)>> {
    let fields = (
        obj.aux(aux::GPS_LATITUDE),
        obj.aux(aux::GPS_LATITUDE_REF),
        obj.aux(aux::GPS_LONGITUDE),
        obj.aux(aux::GPS_LONGITUDE_REF),
    );
    let (Some(lat), Some(lat_ref), Some(lng), Some(lng_ref)) = fields else {
        return Ok(None);
    };

    let mut lat = dms_to_degrees(aux::GPS_LATITUDE, lat)?;
    if lat_ref.trim() == "S" {
        lat = -lat;
    }
    let mut lng = dms_to_degrees(aux::GPS_LONGITUDE, lng)?;
    if lng_ref.trim() == "W" {
        lng = -lng;
    }
    Ok(Some((lat, lng)))
}

/// `"52/1 31/1 1234/100"` (degrees, minutes, seconds as rationals).
fn dms_to_degrees(key: &str, value: &str) -> ClassifyResult<f64> {
    let malformed = || ClassifyError::malformed(key, value);

    let numbers = value
        .split([' ', '/'])
        .filter(|n| !n.is_empty())
        .map(|n| n.parse::<i64>().map_err(|_| malformed()))
        .collect::<ClassifyResult<Vec<_>>>()?;
    let [d, d_den, m, m_den, s, s_den] = numbers[..] else {
        return Err(malformed());
    };
    if d_den == 0 || m_den == 0 || s_den == 0 {
        return Err(malformed());
    }

    Ok(d as f64 / d_den as f64
        + m as f64 / m_den as f64 / 60.0
        + s as f64 / s_den as f64 / 3600.0)
}
