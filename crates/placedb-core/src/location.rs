// crates/placedb-core/src/location.rs

//! The resolved location value object.
//!
//! A [`Location`] combines a source record (geonames or ZIP) with the
//! derived display text and timezone. Instances are built once per
//! lookup key and memoized by the engine; treat them as immutable.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Provenance tag: which store a resolved location came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Geoname,
    Zip,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Geoname => f.write_str("geoname"),
            Provenance::Zip => f.write_str("zip"),
        }
    }
}

/// External identifier of a location: numeric for geonames records,
/// 5-character string for postal records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeoId {
    Geoname(u32),
    Zip(String),
}

impl std::fmt::Display for GeoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoId::Geoname(id) => write!(f, "{id}"),
            GeoId::Zip(zip) => f.write_str(zip),
        }
    }
}

/// A normalized geographic location record.
#[derive(Clone, Debug, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Israel flag; downstream astronomical calculations diverge for IL.
    pub il: bool,
    pub tzid: String,
    /// Human-readable description, e.g. `"Providence, Rhode Island, USA"`
    /// or `"Springfield, MO 62704"`.
    pub name: String,
    /// ISO country code.
    pub cc: String,
    pub geoid: GeoId,
    pub geo: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asciiname: Option<String>,
    /// Admin-division display name (geonames) or 2-letter state code (ZIP).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    /// Full state name for ZIP-sourced locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    /// Set for one known upstream data quirk: a Jerusalem-area admin
    /// division combined with the misspelled historical place name.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub jerusalem: bool,
}

impl Location {
    /// Core constructor; optional fields start out unset.
    pub fn new(
        latitude: f64,
        longitude: f64,
        il: bool,
        tzid: impl Into<String>,
        name: impl Into<String>,
        cc: impl Into<String>,
        geoid: GeoId,
        geo: Provenance,
    ) -> Self {
        Location {
            latitude,
            longitude,
            il,
            tzid: tzid.into(),
            name: name.into(),
            cc: cc.into(),
            geoid,
            geo,
            asciiname: None,
            admin1: None,
            state_name: None,
            zip: None,
            population: None,
            elevation: None,
            jerusalem: false,
        }
    }

    pub fn geonameid(&self) -> Option<u32> {
        match self.geoid {
            GeoId::Geoname(id) => Some(id),
            GeoId::Zip(_) => None,
        }
    }

    /// City-only portion of the display name.
    pub fn short_name(&self) -> &str {
        if let Some(ascii) = &self.asciiname {
            return ascii;
        }
        self.name.split(',').next().unwrap_or(&self.name)
    }
}

/// 2-letter USPS state code to full state name.
pub fn state_full_name(code: &str) -> Option<&'static str> {
    STATE_NAMES.get(code).copied()
}

static STATE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AK", "Alaska"),
        ("AL", "Alabama"),
        ("AR", "Arkansas"),
        ("AZ", "Arizona"),
        ("CA", "California"),
        ("CO", "Colorado"),
        ("CT", "Connecticut"),
        ("DC", "Washington, D.C."),
        ("DE", "Delaware"),
        ("FL", "Florida"),
        ("GA", "Georgia"),
        ("HI", "Hawaii"),
        ("IA", "Iowa"),
        ("ID", "Idaho"),
        ("IL", "Illinois"),
        ("IN", "Indiana"),
        ("KS", "Kansas"),
        ("KY", "Kentucky"),
        ("LA", "Louisiana"),
        ("MA", "Massachusetts"),
        ("MD", "Maryland"),
        ("ME", "Maine"),
        ("MI", "Michigan"),
        ("MN", "Minnesota"),
        ("MO", "Missouri"),
        ("MS", "Mississippi"),
        ("MT", "Montana"),
        ("NC", "North Carolina"),
        ("ND", "North Dakota"),
        ("NE", "Nebraska"),
        ("NH", "New Hampshire"),
        ("NJ", "New Jersey"),
        ("NM", "New Mexico"),
        ("NV", "Nevada"),
        ("NY", "New York"),
        ("OH", "Ohio"),
        ("OK", "Oklahoma"),
        ("OR", "Oregon"),
        ("PA", "Pennsylvania"),
        ("RI", "Rhode Island"),
        ("SC", "South Carolina"),
        ("SD", "South Dakota"),
        ("TN", "Tennessee"),
        ("TX", "Texas"),
        ("UT", "Utah"),
        ("VA", "Virginia"),
        ("VT", "Vermont"),
        ("WA", "Washington"),
        ("WI", "Wisconsin"),
        ("WV", "West Virginia"),
        ("WY", "Wyoming"),
    ])
});

/// Legacy ZIP timezone code to tz database identifier.
static USA_TZIDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("0", "UTC"),
        ("4", "America/Puerto_Rico"),
        ("5", "America/New_York"),
        ("6", "America/Chicago"),
        ("7", "America/Denver"),
        ("8", "America/Los_Angeles"),
        ("9", "America/Anchorage"),
        ("10", "Pacific/Honolulu"),
        ("11", "Pacific/Pago_Pago"),
        ("14", "Pacific/Guam"),
        ("15", "Pacific/Palau"),
    ])
});

/// Derives a tz database identifier from the legacy ZIP database fields
/// (2-letter state, numeric timezone code, daylight-saving flag).
///
/// Two exceptions to the plain code table: the Aleutian islands west of
/// the Hawaii line, and Arizona's non-observance of DST.
pub fn usa_tzid(state: &str, tz_code: &str, dst: &str) -> String {
    if tz_code == "10" && state == "AK" {
        return "America/Adak".into();
    }
    if tz_code == "7" && state == "AZ" {
        return if dst == "Y" {
            "America/Denver".into()
        } else {
            "America/Phoenix".into()
        };
    }
    USA_TZIDS.get(tz_code).copied().unwrap_or("UTC").into()
}
