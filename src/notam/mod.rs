//! Individual NOTAM records
use hifitime::Epoch;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::Constants;
use crate::coord::{GeoCircle, GeoCoordinate};
use crate::epoch;

pub mod list;

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("item carries no notam object")]
    MissingNotamObject,
    #[error("notam object structure")]
    Structure(#[from] serde_json::Error),
    #[error("coordinates: expecting \"ddmm[NS]dddmm[EW]\", got \"{0}\"")]
    Coordinates(String),
    #[error("timestamp: {0}")]
    Timestamp(#[from] epoch::ParsingError),
}

lazy_static! {
    static ref COORDINATES_REGEX: Regex =
        Regex::new(r"^(\d{2})(\d{2})([NS])(\d{3})(\d{2})([EW])$").unwrap();
}

/*
 * Verbatim notam object of one feed item, prior to interpretation.
 */
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNotam {
    number: String,
    #[serde(default)]
    cancels: String,
    #[serde(default)]
    traffic: String,
    #[serde(default)]
    coordinates: String,
    #[serde(default)]
    radius: f64,
    effective_start: String,
    effective_end: String,
    #[serde(default)]
    text: String,
}

/// One Notice to Airmen: a time-bounded safety notice tied to a
/// geographic area.
#[derive(Clone, Debug, PartialEq)]
pub struct Notam {
    /// Notice number, "A0123/24" style
    pub number: String,
    /// Number of the notice this one cancels; empty for regular notices
    pub cancels: String,
    /// Traffic selector codes; "V" marks VFR relevance
    pub traffic: String,
    /// Reference point of the affected area
    pub coordinate: GeoCoordinate,
    /// Radius of the affected area around [Self::coordinate], in meters
    pub radius_m: f64,
    /// Start of the validity window (UTC)
    pub effective_start: Epoch,
    /// End of the validity window (UTC)
    pub effective_end: Epoch,
    /// Free-form notice body
    pub text: String,
}

impl Notam {
    /// [Notam] interpretation attempt from one element of the feed's
    /// `items` array. The notam object is expected at
    /// `properties.coreNOTAMData.notam` within the item.
    pub fn from_json(item: &serde_json::Value) -> Result<Self, ParsingError> {
        let object = item
            .get("properties")
            .and_then(|v| v.get("coreNOTAMData"))
            .and_then(|v| v.get("notam"))
            .ok_or(ParsingError::MissingNotamObject)?;

        let raw: RawNotam = serde_json::from_value(object.clone())?;

        // cancellation notices carry no geometry
        let coordinate = if raw.coordinates.is_empty() {
            GeoCoordinate::default()
        } else {
            parse_coordinates(&raw.coordinates)?
        };

        Ok(Self {
            coordinate,
            number: raw.number,
            cancels: raw.cancels,
            traffic: raw.traffic,
            radius_m: raw.radius * Constants::NAUTICAL_MILE_M,
            effective_start: epoch::parse_timestamp(&raw.effective_start)?,
            effective_end: epoch::parse_timestamp(&raw.effective_end)?,
            text: raw.text,
        })
    }

    /// Returns true if the sole function of this notice is to invalidate
    /// an earlier notice.
    pub fn is_cancellation(&self) -> bool {
        !self.cancels.is_empty()
    }

    /// Returns true if this notice pertains to VFR traffic. Excludes
    /// IFR-only and checklist notices.
    pub fn pertains_to_vfr(&self) -> bool {
        self.traffic.contains('V')
    }

    /// Affected region: a circle around [Self::coordinate].
    pub fn region(&self) -> GeoCircle {
        GeoCircle::new(self.coordinate, self.radius_m)
    }

    /// Returns true if this notice is complete enough to be used.
    pub fn is_valid(&self) -> bool {
        !self.number.is_empty()
            && self.effective_start <= self.effective_end
            && (self.is_cancellation() || self.coordinate.is_valid())
    }

    /// Returns true once the validity window has passed.
    pub fn is_outdated(&self) -> bool {
        epoch::now() > self.effective_end
    }
}

impl std::fmt::Display for Notam {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.text)
    }
}

/*
 * Decodes "4038N07346W" style tokens: degrees + minutes, quadrant signed.
 */
fn parse_coordinates(content: &str) -> Result<GeoCoordinate, ParsingError> {
    let caps = COORDINATES_REGEX
        .captures(content.trim())
        .ok_or_else(|| ParsingError::Coordinates(content.to_string()))?;

    let err = |_| ParsingError::Coordinates(content.to_string());
    let lat_deg = caps[1].parse::<f64>().map_err(err)?;
    let lat_min = caps[2].parse::<f64>().map_err(err)?;
    let lon_deg = caps[4].parse::<f64>().map_err(err)?;
    let lon_min = caps[5].parse::<f64>().map_err(err)?;

    let mut latitude = lat_deg + lat_min / 60.0;
    if caps[3].eq("S") {
        latitude = -latitude;
    }
    let mut longitude = lon_deg + lon_min / 60.0;
    if caps[6].eq("W") {
        longitude = -longitude;
    }

    Ok(GeoCoordinate::new(latitude, longitude))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn item(number: &str, traffic: &str) -> serde_json::Value {
        json!({ "properties": { "coreNOTAMData": { "notam": {
            "number": number,
            "traffic": traffic,
            "coordinates": "4038N07346W",
            "radius": 5.0,
            "effectiveStart": "2024-01-25T14:00:00.000Z",
            "effectiveEnd": "2998-03-25T14:00:00.000Z",
            "text": "RWY 04L/22R CLSD",
        }}}})
    }

    #[test]
    fn item_parsing() {
        let notam = Notam::from_json(&item("A0123/24", "V")).unwrap();
        assert_eq!(notam.number, "A0123/24");
        assert!(notam.is_valid());
        assert!(!notam.is_outdated());
        assert!(!notam.is_cancellation());
        assert!(notam.pertains_to_vfr());
        assert_eq!(notam.radius_m, 5.0 * 1852.0);
        assert_eq!(
            notam.effective_start,
            Epoch::from_gregorian_utc(2024, 1, 25, 14, 0, 0, 0)
        );
        assert_eq!(notam.to_string(), "A0123/24 RWY 04L/22R CLSD");

        // "IV" pertains to both IFR and VFR traffic
        assert!(Notam::from_json(&item("A0124/24", "IV"))
            .unwrap()
            .pertains_to_vfr());
        assert!(!Notam::from_json(&item("A0125/24", "I"))
            .unwrap()
            .pertains_to_vfr());
    }

    #[test]
    fn cancellation_parsing() {
        let item = json!({ "properties": { "coreNOTAMData": { "notam": {
            "number": "A0200/24",
            "cancels": "A0123/24",
            "effectiveStart": "2024-01-26T08:00:00.000Z",
            "effectiveEnd": "2998-01-26T08:00:00.000Z",
        }}}});
        let notam = Notam::from_json(&item).unwrap();
        assert!(notam.is_cancellation());
        assert_eq!(notam.cancels, "A0123/24");
        // no geometry, still usable
        assert!(notam.is_valid());
        assert!(!notam.coordinate.is_valid());
    }

    #[test]
    fn malformed_items() {
        for item in [
            json!({}),
            json!({ "properties": {} }),
            json!({ "properties": { "coreNOTAMData": { "notam": {} }}}),
            json!({ "properties": { "coreNOTAMData": { "notam": {
                "number": "A0123/24",
                "coordinates": "somewhere over the rainbow",
                "effectiveStart": "2024-01-25T14:00:00.000Z",
                "effectiveEnd": "2998-03-25T14:00:00.000Z",
            }}}}),
            json!({ "properties": { "coreNOTAMData": { "notam": {
                "number": "A0123/24",
                "coordinates": "4038N07346W",
                "effectiveStart": "not a timestamp",
                "effectiveEnd": "2998-03-25T14:00:00.000Z",
            }}}}),
        ] {
            assert!(Notam::from_json(&item).is_err());
        }
    }

    #[test]
    fn coordinates_decoding() {
        for (content, latitude, longitude) in [
            ("4038N07346W", 40.0 + 38.0 / 60.0, -(73.0 + 46.0 / 60.0)),
            ("4038S07346E", -(40.0 + 38.0 / 60.0), 73.0 + 46.0 / 60.0),
            ("0000N00000E", 0.0, 0.0),
            ("4759N12217W", 47.0 + 59.0 / 60.0, -(122.0 + 17.0 / 60.0)),
        ] {
            let coordinate = parse_coordinates(content);
            assert!(coordinate.is_ok(), "failed to decode \"{}\"", content);
            let coordinate = coordinate.unwrap();
            assert!((coordinate.latitude - latitude).abs() < 1e-9);
            assert!((coordinate.longitude - longitude).abs() < 1e-9);
        }
        for content in ["", "4038N", "40N07346W", "4038X07346W", "4038N07346W5"] {
            assert!(parse_coordinates(content).is_err());
        }
    }

    #[test]
    fn outdated_notices() {
        let mut expired = Notam::from_json(&item("A0123/24", "V")).unwrap();
        expired.effective_start = Epoch::from_gregorian_utc_at_midnight(2020, 1, 1);
        expired.effective_end = Epoch::from_gregorian_utc_at_midnight(2020, 2, 1);
        assert!(expired.is_valid());
        assert!(expired.is_outdated());

        let permanent = json!({ "properties": { "coreNOTAMData": { "notam": {
            "number": "A0300/24",
            "traffic": "V",
            "coordinates": "4038N07346W",
            "radius": 5.0,
            "effectiveStart": "2024-01-25T14:00:00.000Z",
            "effectiveEnd": "PERM",
            "text": "AD CLSD",
        }}}});
        assert!(!Notam::from_json(&permanent).unwrap().is_outdated());
    }
}
