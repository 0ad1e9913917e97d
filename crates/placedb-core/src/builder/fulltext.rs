// crates/placedb-core/src/builder/fulltext.rs

//! Derived full-text search structures.
//!
//! The FTS5 `geoname_fulltext` table holds one row per (place, composed
//! "long name") pair. Multiple rows may reference the same geonameid —
//! consumers de-duplicate by id. Three countries get bespoke long-name
//! formats (USA/UK abbreviations, Israel without admin divisions), and
//! places whose native-script name differs from the ASCII name are
//! indexed under both spellings.

use rusqlite::Connection;

use super::exec_sql;
use crate::error::Result;

/// De-duplicated (geonameid, language, name) side table derived from the
/// raw alternate names.
const ALTNAMES_DEDUP: &[&str] = &[
    "DROP TABLE IF EXISTS altnames",
    "CREATE TABLE altnames
    AS SELECT geonameid, isolanguage, name
    FROM alternatenames
    GROUP BY 1, 2, 3
    ",
];

const FULLTEXT: &[&str] = &[
    "DROP TABLE IF EXISTS geoname_fulltext",
    "CREATE VIRTUAL TABLE geoname_fulltext
      USING fts5(geonameid UNINDEXED, longname, population, city, admin1, country);
    ",
    "DROP TABLE IF EXISTS geoname_non_ascii",
    "CREATE TABLE geoname_non_ascii AS
      SELECT geonameid FROM geoname WHERE asciiname <> name",
    // Standard places: "City, Admin1, Country". US/IL/GB handled below.
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.asciiname||', '||a.asciiname||', '||c.Country,
      g.population,
      g.asciiname,a.asciiname,c.Country
      FROM geoname g, admin1 a, country c
      WHERE g.country = c.ISO
      AND g.country <> 'US'
      AND g.country <> 'IL'
      AND g.country <> 'GB'
      AND g.country||'.'||g.admin1 = a.key
      ",
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.asciiname||', '||a.asciiname||', USA',
      g.population,
      g.asciiname,a.asciiname,'United States'
      FROM geoname g, admin1 a
      WHERE g.country = 'US'
      AND g.country||'.'||g.admin1 = a.key
      ",
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.asciiname||', '||a.asciiname||', UK',
      g.population,
      g.asciiname,a.asciiname,'UK'
      FROM geoname g, admin1 a
      WHERE g.country = 'GB'
      AND g.country||'.'||g.admin1 = a.key
      ",
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.asciiname||', Israel',
      g.population,
      g.asciiname,NULL,'Israel'
      FROM geoname g
      WHERE g.country = 'IL'
      ",
    // Country-top-level places with no admin subdivision
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.asciiname||', '||c.Country,
      g.population,
      g.asciiname,NULL,c.Country
      FROM geoname g, country c
      WHERE g.country = c.ISO
      AND (g.admin1 = '' OR g.admin1 = '00')
      ",
    // Native-script variant for places where name <> asciiname
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      g.name||', '||a.name||', '||c.Country,
      g.population,
      g.name,a.name,c.Country
      FROM geoname_non_ascii gna, geoname g, admin1 a, country c
      WHERE gna.geonameid = g.geonameid
      AND g.country = c.ISO
      AND g.country||'.'||g.admin1 = a.key
      ",
    // Israel, Hebrew-script alternate names
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      alt.name||', ישראל',
      g.population,
      alt.name,NULL,'ישראל'
      FROM geoname g, altnames alt
      WHERE g.country = 'IL'
      AND alt.isolanguage = 'he'
      AND g.geonameid = alt.geonameid
      ",
    // Israel, English alternate names
    "INSERT INTO geoname_fulltext
      SELECT g.geonameid,
      alt.name||', Israel',
      g.population,
      alt.name,NULL,'Israel'
      FROM geoname g, altnames alt
      WHERE g.country = 'IL'
      AND alt.isolanguage = 'en'
      AND g.geonameid = alt.geonameid
      ",
    "VACUUM",
];

pub(super) fn build_fulltext(db: &Connection) -> Result<()> {
    exec_sql(db, ALTNAMES_DEDUP)?;
    exec_sql(db, FULLTEXT)
}
