// crates/placedb-core/src/autocomplete.rs

//! Partial-input completion over both stores.
//!
//! A query starting with a digit is treated as a ZIP prefix and answered
//! from the postal store alone. Anything else runs through both FTS
//! indexes; geoname candidates are resolved through the engine's
//! memoized lookups, then the two candidate lists are merged so that a
//! city appearing in both stores surfaces once, with the geonames
//! record winning.

use std::collections::{HashMap, HashSet};

use rusqlite::Row;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geodb::{GeoDb, ZipRow};
use crate::location::{state_full_name, GeoId, Location, Provenance};

/// Maximum number of suggestions returned for a free-text query.
pub const AUTOCOMPLETE_LIMIT: usize = 12;

const ZIP_COMPLETE_SQL: &str =
    "SELECT ZipCode,CityMixedCase,State,Latitude,Longitude,Elevation,TimeZone,DayLightSaving,Population
FROM ZIPCodes_Primary
WHERE ZipCode LIKE ?
ORDER BY Population DESC
LIMIT 10";

const ZIP_FULLTEXT_COMPLETE_SQL: &str = "SELECT ZipCode
FROM ZIPCodes_CityFullText5
WHERE ZIPCodes_CityFullText5 MATCH ?
ORDER BY Population DESC
LIMIT 20";

const GEONAME_COMPLETE_SQL: &str = "SELECT geonameid, longname, city, admin1, country
FROM geoname_fulltext
WHERE geoname_fulltext MATCH ?
ORDER BY population DESC
LIMIT 20";

/// One autocomplete suggestion.
///
/// `value` is the matched long name as indexed (possibly native-script);
/// `name` is set only when the matched city spelling differs from the
/// canonical ASCII name. Coordinate-class fields are present only when
/// the caller asked for them.
#[derive(Clone, Debug, Serialize)]
pub struct AutocompleteResult {
    pub id: GeoId,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asciiname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub cc: String,
    pub geo: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
}

/// Raw match from the geonames FTS index.
struct FulltextRow {
    geonameid: u32,
    longname: String,
    city: Option<String>,
    country: Option<String>,
}

impl FulltextRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FulltextRow {
            geonameid: row.get("geonameid")?,
            longname: row.get("longname")?,
            city: row.get("city")?,
            country: row.get("country")?,
        })
    }
}

impl GeoDb {
    /// Completes a partial place query.
    ///
    /// Empty or whitespace-only input yields an empty list, not an
    /// error. When `include_coords` is false, latitude, longitude,
    /// timezone, and population are stripped from every suggestion.
    pub fn autocomplete(&mut self, query: &str, include_coords: bool) -> Result<Vec<AutocompleteResult>> {
        let query = query.trim();
        let Some(first) = query.chars().next() else {
            return Ok(Vec::new());
        };
        let mut results = if first.is_ascii_digit() {
            self.complete_zip_prefix(query)?
        } else {
            self.complete_fulltext(query)?
        };
        if !include_coords {
            for r in &mut results {
                r.latitude = None;
                r.longitude = None;
                r.timezone = None;
                r.population = None;
            }
        }
        Ok(results)
    }

    /// Numeric branch: prefix match on the 5-digit code (ZIP+4 input is
    /// truncated), highest-population codes first.
    fn complete_zip_prefix(&mut self, query: &str) -> Result<Vec<AutocompleteResult>> {
        let zip5: String = query.chars().take(5).collect();
        let pattern = format!("{zip5}%");
        debug!("autocomplete: zip prefix {pattern}");
        let rows: Vec<ZipRow> = {
            let mut stmt = self.zips.prepare_cached(ZIP_COMPLETE_SQL)?;
            let mapped = stmt.query_map([&pattern], ZipRow::from_row)?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        Ok(rows.iter().map(zip_row_to_result).collect())
    }

    /// Free-text branch: both FTS indexes, merge, population order, cap.
    fn complete_fulltext(&mut self, query: &str) -> Result<Vec<AutocompleteResult>> {
        // FTS5 string literal; the column filter restricts matching to
        // the composed long name.
        let escaped = query.replace('"', "\"\"");
        let match_expr = format!("{{longname}} : \"{escaped}\" *");
        debug!("autocomplete: match {match_expr}");

        let mut fulltext_rows: Vec<FulltextRow> = {
            let mut stmt = self.geonames.prepare_cached(GEONAME_COMPLETE_SQL)?;
            let mapped = stmt.query_map([&match_expr], FulltextRow::from_row)?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        // The index holds several long-name spellings per place; keep
        // the first (best-ranked) row per id.
        let mut seen = HashSet::new();
        fulltext_rows.retain(|row| seen.insert(row.geonameid));

        let mut resolved: Vec<(FulltextRow, Location)> = Vec::with_capacity(fulltext_rows.len());
        for row in fulltext_rows {
            if let Some(location) = self.lookup_geoname(row.geonameid)? {
                resolved.push((row, location));
            }
        }
        let geo_matches: Vec<AutocompleteResult> = resolved
            .iter()
            .map(|(row, location)| self.geoname_to_result(row, location))
            .collect();

        let zip_codes: Vec<String> = {
            let mut stmt = self.zips.prepare_cached(ZIP_FULLTEXT_COMPLETE_SQL)?;
            let mapped = stmt.query_map([&match_expr], |row| row.get(0))?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        let mut zip_matches: Vec<AutocompleteResult> = Vec::with_capacity(zip_codes.len());
        for code in &zip_codes {
            if let Some(location) = self.lookup_zip(code)? {
                zip_matches.push(zip_loc_to_result(&location));
            }
        }

        let mut values = merge_zip_geo(zip_matches, geo_matches);
        values.sort_by_key(|r| std::cmp::Reverse(r.population.unwrap_or(-1)));
        values.truncate(AUTOCOMPLETE_LIMIT);
        Ok(values)
    }

    fn geoname_to_result(&self, row: &FulltextRow, location: &Location) -> AutocompleteResult {
        let country = row
            .country
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| self.country_names.get(&location.cc).cloned());
        // The admin division comes from the resolved location, not the
        // index row, so native-script matches still show the ASCII name.
        let admin1 = location.admin1.clone();
        let mut result = AutocompleteResult {
            id: location.geoid.clone(),
            value: row.longname.clone(),
            name: None,
            asciiname: location.asciiname.clone(),
            admin1,
            country,
            cc: location.cc.clone(),
            geo: Provenance::Geoname,
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            timezone: Some(location.tzid.clone()),
            population: location.population,
        };
        // Surface the matched spelling when it differs from the
        // canonical ASCII name (native script, alternate name).
        if let Some(city) = &row.city {
            if Some(city.as_str()) != location.asciiname.as_deref() {
                result.name = Some(city.clone());
            }
        }
        result
    }
}

fn zip_row_to_result(r: &ZipRow) -> AutocompleteResult {
    let location = crate::geodb::make_zip_location(r);
    zip_loc_to_result(&location)
}

fn zip_loc_to_result(location: &Location) -> AutocompleteResult {
    AutocompleteResult {
        id: location.geoid.clone(),
        value: location.name.clone(),
        name: None,
        asciiname: Some(location.short_name().to_owned()),
        admin1: location.admin1.clone(),
        country: Some("United States".to_owned()),
        cc: location.cc.clone(),
        geo: Provenance::Zip,
        latitude: Some(location.latitude),
        longitude: Some(location.longitude),
        timezone: Some(location.tzid.clone()),
        population: location.population,
    }
}

/// A ZIP row and a geonames row describe the same city when their
/// (ascii city name, full admin-division name, country code) triples
/// agree; the ZIP side's 2-letter state code is widened to the full
/// state name before comparing. Geonames entries replace ZIP entries at
/// the ZIP entry's original position.
fn merge_key(r: &AutocompleteResult) -> String {
    let admin_full = match r.geo {
        Provenance::Zip => r
            .admin1
            .as_deref()
            .and_then(state_full_name)
            .map(str::to_owned),
        Provenance::Geoname => r.admin1.clone(),
    };
    format!(
        "{}|{}|{}",
        r.asciiname.as_deref().unwrap_or(""),
        admin_full.as_deref().unwrap_or(""),
        r.cc
    )
}

fn merge_zip_geo(
    zip_matches: Vec<AutocompleteResult>,
    geo_matches: Vec<AutocompleteResult>,
) -> Vec<AutocompleteResult> {
    if geo_matches.is_empty() {
        return zip_matches;
    }
    if zip_matches.is_empty() {
        return geo_matches;
    }
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, AutocompleteResult> = HashMap::new();
    for r in zip_matches {
        let key = merge_key(&r);
        if !by_key.contains_key(&key) {
            order.push(key.clone());
            by_key.insert(key, r);
        }
    }
    for r in geo_matches {
        let key = merge_key(&r);
        if !by_key.contains_key(&key) {
            order.push(key.clone());
        }
        by_key.insert(key, r);
    }
    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}
