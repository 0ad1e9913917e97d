// crates/placedb-core/src/geodb.rs

//! The resolution engine: exact-match lookups against the two SQLite
//! stores, with per-key memoization (including negative caching) and
//! the legacy free-text city dictionary.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use tracing::{info, warn};

use crate::error::{GeoError, Result};
use crate::location::{state_full_name, usa_tzid, GeoId, Location, Provenance};
use crate::text::{normalize_key, transliterate};

const GEONAME_SQL: &str = "SELECT
  g.name as name,
  g.asciiname as asciiname,
  g.country as cc,
  c.country as country,
  a.asciiname as admin1,
  g.latitude as latitude,
  g.longitude as longitude,
  g.population as population,
  g.timezone as timezone
FROM geoname g
LEFT JOIN country c on g.country = c.iso
LEFT JOIN admin1 a on g.country||'.'||g.admin1 = a.key
WHERE g.geonameid = ?
";

const GEONAME_ALL_SQL: &str = "SELECT
  g.geonameid as geonameid,
  g.name as name,
  g.asciiname as asciiname,
  g.country as cc,
  c.country as country,
  a.asciiname as admin1,
  g.latitude as latitude,
  g.longitude as longitude,
  g.population as population,
  g.timezone as timezone
FROM geoname g
LEFT JOIN country c on g.country = c.iso
LEFT JOIN admin1 a on g.country||'.'||g.admin1 = a.key
";

const ZIPCODE_SQL: &str =
    "SELECT ZipCode,CityMixedCase,State,Latitude,Longitude,Elevation,TimeZone,DayLightSaving,Population
FROM ZIPCodes_Primary WHERE ZipCode = ?";

const ZIPCODE_ALL_SQL: &str =
    "SELECT ZipCode,CityMixedCase,State,Latitude,Longitude,Elevation,TimeZone,DayLightSaving,Population
FROM ZIPCodes_Primary";

const COUNTRY_NAMES_SQL: &str = "SELECT ISO, Country FROM country WHERE Country <> ''";

/// Static free-text city-name dictionary preserved for inputs that
/// predate the geonames-based system.
const LEGACY_CITIES_JSON: &str = include_str!("../data/city2geonameid.json");

/// One historical duplicate: the Tel Aviv district id was used for the
/// city in old data; remap it to the city record.
fn remap_geonameid(geonameid: u32) -> u32 {
    if geonameid == 293396 {
        293397
    } else {
        geonameid
    }
}

/// External fallback for legacy city names missing from the bundled
/// dictionary (e.g. a calendar library's classic-city table).
pub type LegacyFallback = Box<dyn Fn(&str) -> Option<Location> + Send>;

/// Read-only resolution engine over the ZIP and geonames stores.
///
/// Construct once (both store files must already exist — the engine
/// never creates stores) and hold for the process lifetime; lookups
/// memoize both hits and misses, so repeated keys cost one store
/// round-trip total.
pub struct GeoDb {
    pub(crate) zips: Connection,
    pub(crate) geonames: Connection,
    zip_cache: HashMap<String, Option<Location>>,
    geoname_cache: HashMap<u32, Option<Location>>,
    legacy_cities: HashMap<String, u32>,
    pub(crate) country_names: HashMap<String, String>,
    fallback: Option<LegacyFallback>,
}

impl GeoDb {
    /// Opens both stores read-only. Fails fast if either file is missing.
    pub fn new(zips_filename: impl AsRef<Path>, geonames_filename: impl AsRef<Path>) -> Result<Self> {
        let zips_filename = zips_filename.as_ref();
        let geonames_filename = geonames_filename.as_ref();
        info!("GeoDb: opening {}...", zips_filename.display());
        let zips = open_readonly(zips_filename)?;
        info!("GeoDb: opening {}...", geonames_filename.display());
        let geonames = open_readonly(geonames_filename)?;

        let country_names = {
            let mut stmt = geonames.prepare(COUNTRY_NAMES_SQL)?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<rusqlite::Result<HashMap<String, String>>>()?
        };

        let bundled: HashMap<String, u32> = serde_json::from_str(LEGACY_CITIES_JSON)?;
        let legacy_cities = bundled
            .into_iter()
            .map(|(name, id)| (normalize_key(&name), id))
            .collect();

        Ok(GeoDb {
            zips,
            geonames,
            zip_cache: HashMap::new(),
            geoname_cache: HashMap::new(),
            legacy_cities,
            country_names,
            fallback: None,
        })
    }

    /// Merges extra (name, geonameid) pairs into the legacy dictionary;
    /// keys are normalized the same way lookups are.
    pub fn add_legacy_cities<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        for (name, id) in entries {
            self.legacy_cities.insert(normalize_key(&name), id);
        }
    }

    /// Installs the external fallback consulted when a legacy name is
    /// not in the dictionary.
    pub fn set_legacy_fallback(&mut self, f: impl Fn(&str) -> Option<Location> + Send + 'static) {
        self.fallback = Some(Box::new(f));
    }

    /// Full country display name for an ISO code, from the store's
    /// country table (loaded eagerly at construction).
    pub fn country_name(&self, cc: &str) -> Option<&str> {
        self.country_names.get(cc).map(String::as_str)
    }

    /// Looks up a ZIP code (ZIP+4 input tolerated; truncated to 5).
    ///
    /// An unknown code is an expected outcome: logged at warning level,
    /// cached as a negative entry, returned as `Ok(None)`.
    pub fn lookup_zip(&mut self, zip: &str) -> Result<Option<Location>> {
        let zip5: String = zip.trim().chars().take(5).collect();
        if let Some(cached) = self.zip_cache.get(&zip5) {
            return Ok(cached.clone());
        }
        let row = self
            .zips
            .prepare_cached(ZIPCODE_SQL)?
            .query_row([&zip5], ZipRow::from_row)
            .optional()?;
        let location = match row {
            Some(mut r) => {
                r.zipcode = zip5.clone();
                Some(make_zip_location(&r))
            }
            None => {
                warn!("GeoDb: unknown zipcode={zip5}");
                None
            }
        };
        self.zip_cache.insert(zip5, location.clone());
        Ok(location)
    }

    /// Looks up a geonames id, applying the fixed historical remap.
    /// Miss behavior mirrors [`GeoDb::lookup_zip`].
    pub fn lookup_geoname(&mut self, geonameid: u32) -> Result<Option<Location>> {
        let geonameid = remap_geonameid(geonameid);
        if let Some(cached) = self.geoname_cache.get(&geonameid) {
            return Ok(cached.clone());
        }
        let row = self
            .geonames
            .prepare_cached(GEONAME_SQL)?
            .query_row([geonameid], GeonameRow::from_row)
            .optional()?;
        let location = match row {
            Some(r) => Some(make_geoname_location(geonameid, &r)),
            None => {
                warn!("GeoDb: unknown geonameid={geonameid}");
                None
            }
        };
        self.geoname_cache.insert(geonameid, location.clone());
        Ok(location)
    }

    /// Resolves a legacy free-text city name: normalized-dictionary hit
    /// delegates to [`GeoDb::lookup_geoname`]; otherwise the installed
    /// fallback is consulted; a total miss logs and returns `Ok(None)`.
    pub fn lookup_legacy_city(&mut self, city_name: &str) -> Result<Option<Location>> {
        let key = normalize_key(city_name);
        if let Some(&geonameid) = self.legacy_cities.get(&key) {
            return self.lookup_geoname(geonameid);
        }
        if let Some(fallback) = &self.fallback {
            if let Some(location) = fallback(city_name) {
                return Ok(Some(location));
            }
        }
        warn!("GeoDb: unknown city={city_name}");
        Ok(None)
    }

    /// Reads the entire ZIP store into the in-memory cache. Opt-in
    /// warm-up for all-memory deployments; run once at process start.
    pub fn cache_zips(&mut self) -> Result<usize> {
        let start = Instant::now();
        let rows: Vec<ZipRow> = {
            let mut stmt = self.zips.prepare(ZIPCODE_ALL_SQL)?;
            let mapped = stmt.query_map([], ZipRow::from_row)?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        let n = rows.len();
        for row in rows {
            let location = make_zip_location(&row);
            self.zip_cache.insert(row.zipcode, Some(location));
        }
        info!("GeoDb: cached {n} ZIP codes in {:?}", start.elapsed());
        Ok(n)
    }

    /// Reads the entire geonames store into the in-memory cache.
    pub fn cache_geonames(&mut self) -> Result<usize> {
        let start = Instant::now();
        let rows: Vec<(u32, GeonameRow)> = {
            let mut stmt = self.geonames.prepare(GEONAME_ALL_SQL)?;
            let mapped = stmt.query_map([], |row| {
                Ok((row.get("geonameid")?, GeonameRow::from_row(row)?))
            })?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        let n = rows.len();
        for (geonameid, row) in rows {
            let location = make_geoname_location(geonameid, &row);
            self.geoname_cache.insert(geonameid, Some(location));
        }
        info!("GeoDb: cached {n} geonames in {:?}", start.elapsed());
        Ok(n)
    }

    /// Closes both store handles. Consumes the engine; no lookup can
    /// follow.
    pub fn close(self) -> Result<()> {
        self.zips.close().map_err(|(_, e)| e)?;
        self.geonames.close().map_err(|(_, e)| e)?;
        Ok(())
    }

    /// Composes a display string from city, admin-division, and country
    /// names.
    ///
    /// "United States"/"United Kingdom" abbreviate to USA/UK. The
    /// admin-division segment is omitted for Israel, when absent, or
    /// when it is transliteration-equivalent to the city name at the
    /// start of the string ("Tel Aviv, Tel Aviv District" redundancy).
    pub fn city_description(city_name: &str, admin1: &str, country_name: &str) -> String {
        let country = match country_name {
            "United States" => "USA",
            "United Kingdom" => "UK",
            other => other,
        };
        let mut descr = String::from(city_name);
        if country != "Israel" && !admin1.is_empty() && !admin1.starts_with(city_name) {
            let tlit_city = transliterate(city_name);
            let tlit_admin1 = transliterate(admin1);
            if !tlit_admin1.starts_with(&tlit_city) {
                descr.push_str(", ");
                descr.push_str(admin1);
            }
        }
        if !country.is_empty() {
            descr.push_str(", ");
            descr.push_str(country);
        }
        descr
    }
}

fn open_readonly(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(GeoError::NotFound(path.to_path_buf()));
    }
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    Ok(Connection::open_with_flags(path, flags)?)
}

/// One row of `ZIPCodes_Primary`, in documented column order.
#[derive(Debug, Clone)]
pub(crate) struct ZipRow {
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<i32>,
    pub timezone: String,
    pub dst: String,
    pub population: Option<i64>,
}

impl ZipRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ZipRow {
            zipcode: row.get("ZipCode")?,
            city: row.get("CityMixedCase")?,
            state: row.get("State")?,
            latitude: row.get("Latitude")?,
            longitude: row.get("Longitude")?,
            elevation: row.get("Elevation")?,
            timezone: row.get("TimeZone")?,
            dst: row.get("DayLightSaving")?,
            population: row.get("Population")?,
        })
    }
}

/// One joined geoname/admin1/country row.
#[derive(Debug, Clone)]
pub(crate) struct GeonameRow {
    pub name: String,
    pub asciiname: Option<String>,
    pub cc: Option<String>,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub population: Option<i64>,
    pub timezone: Option<String>,
}

impl GeonameRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(GeonameRow {
            name: row.get("name")?,
            asciiname: row.get("asciiname")?,
            cc: row.get("cc")?,
            country: row.get("country")?,
            admin1: row.get("admin1")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
            population: row.get("population")?,
            timezone: row.get("timezone")?,
        })
    }
}

pub(crate) fn make_zip_location(r: &ZipRow) -> Location {
    let tzid = usa_tzid(&r.state, &r.timezone, &r.dst);
    let name = format!("{}, {} {}", r.city, r.state, r.zipcode);
    let mut location = Location::new(
        r.latitude,
        r.longitude,
        false,
        tzid,
        name,
        "US",
        GeoId::Zip(r.zipcode.clone()),
        Provenance::Zip,
    );
    location.admin1 = Some(r.state.clone());
    location.state_name = state_full_name(&r.state).map(str::to_owned);
    location.zip = Some(r.zipcode.clone());
    location.population = r.population;
    location.elevation = r.elevation;
    location
}

pub(crate) fn make_geoname_location(geonameid: u32, r: &GeonameRow) -> Location {
    let country = r.country.as_deref().unwrap_or("");
    let admin1 = r.admin1.as_deref().unwrap_or("");
    let name = GeoDb::city_description(&r.name, admin1, country);
    let cc = r.cc.as_deref().unwrap_or("");
    let il = cc == "IL";
    let mut location = Location::new(
        r.latitude,
        r.longitude,
        il,
        r.timezone.as_deref().unwrap_or(""),
        name,
        cc,
        GeoId::Geoname(geonameid),
        Provenance::Geoname,
    );
    location.asciiname = r.asciiname.clone();
    if !admin1.is_empty() {
        location.admin1 = Some(admin1.to_owned());
    }
    // Known upstream quirk: misspelled historical variant in the
    // Jerusalem district is tagged so callers can preserve old behavior.
    if il && admin1.starts_with("Jerusalem") && r.name.starts_with("Jerualem") {
        location.jerusalem = true;
    }
    if let Some(population) = r.population {
        if population > 0 {
            location.population = Some(population);
        }
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_description_variants() {
        let d = GeoDb::city_description;
        assert_eq!(
            d("Providence", "Rhode Island", "United States"),
            "Providence, Rhode Island, USA"
        );
        assert_eq!(d("London", "England", "United Kingdom"), "London, England, UK");
        assert_eq!(d("Tel Aviv", "Central District", "Israel"), "Tel Aviv, Israel");
        assert_eq!(d("Montréal", "Quebec", "Canada"), "Montréal, Quebec, Canada");
        assert_eq!(d("Panamá", "Panama", "Panama"), "Panamá, Panama");
        assert_eq!(d("São Paulo", "Sao Paulo", "Brazil"), "São Paulo, Brazil");
    }

    #[test]
    fn city_description_no_admin_or_country() {
        let d = GeoDb::city_description;
        assert_eq!(d("Nuuk", "", "Greenland"), "Nuuk, Greenland");
        assert_eq!(d("Somewhere", "Region", ""), "Somewhere, Region");
    }

    #[test]
    fn geonameid_remap() {
        assert_eq!(remap_geonameid(293396), 293397);
        assert_eq!(remap_geonameid(293397), 293397);
        assert_eq!(remap_geonameid(4119403), 4119403);
    }

    #[test]
    fn zip_location_shape() {
        let row = ZipRow {
            zipcode: "02912".into(),
            city: "Providence".into(),
            state: "RI".into(),
            latitude: 41.826254,
            longitude: -71.402502,
            elevation: Some(118),
            timezone: "5".into(),
            dst: "Y".into(),
            population: Some(1370),
        };
        let loc = make_zip_location(&row);
        assert_eq!(loc.name, "Providence, RI 02912");
        assert_eq!(loc.tzid, "America/New_York");
        assert_eq!(loc.short_name(), "Providence");
        assert_eq!(loc.state_name.as_deref(), Some("Rhode Island"));
        assert_eq!(loc.geoid, GeoId::Zip("02912".into()));
        assert_eq!(loc.geo, Provenance::Zip);
    }
}
