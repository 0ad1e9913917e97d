// crates/placedb-core/src/builder/mod.rs

//! # Ingestion pipeline
//!
//! Builds the two SQLite stores the resolution engine reads:
//!
//! - the geonames store, from tab-delimited geonames.org extracts
//!   (country metadata, cities, admin-1 codes, alternate names), with a
//!   denormalized FTS5 "long name" search index derived at the end;
//! - the ZIP store, from a SQL dump of the primary ZIP code table.
//!
//! Each build is a batch, idempotent rebuild: every table is dropped and
//! recreated, so rerunning against the same inputs yields the same
//! query-observable content. Malformed input lines are logged and
//! skipped; only missing files or store errors abort the build.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

mod filters;
mod fulltext;
mod load;
mod schema;
mod zips;

pub use filters::{cities_filter, il_alternate_filter, il_cities_filter, truncate_alternate_names};
pub use load::load_tab_file;
pub use zips::build_zips_db;

/// Input files and knobs for one geonames store build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Output SQLite file; existing tables are dropped and recreated.
    pub db_filename: PathBuf,
    /// `countryInfo.txt` (19 fields).
    pub country_info: PathBuf,
    /// `cities5000.txt` or similar city extract (19 fields).
    pub cities: PathBuf,
    /// Optional extra city rows patched in after the main extract.
    pub cities_patch: Option<PathBuf>,
    /// `admin1CodesASCII.txt` (4 fields).
    pub admin1_codes: PathBuf,
    /// Israel-specific city extract (`IL.txt`), filtered to populated places.
    pub il_cities: Option<PathBuf>,
    /// Israel alternate-names extract (10 fields).
    pub il_alternate: Option<PathBuf>,
    /// Reject plain populated places (`PPL`) below this population.
    /// Administrative seats and capitals are kept regardless.
    pub min_population: Option<i64>,
}

/// Builds the geonames SQLite store from raw geonames.org extracts.
pub fn build_geonames_db(opts: &BuildOptions) -> Result<()> {
    info!("opening {}", opts.db_filename.display());
    let mut db = Connection::open(&opts.db_filename)?;
    db.pragma_update(None, "journal_mode", "MEMORY")?;

    exec_sql(&db, schema::CREATE_COUNTRY)?;
    load_tab_file(&mut db, &opts.country_info, "country", 19, None)?;

    exec_sql(&db, schema::CREATE_GEONAME)?;
    load_tab_file(
        &mut db,
        &opts.cities,
        "geoname",
        19,
        Some(&mut cities_filter(opts.min_population)),
    )?;
    if let Some(patch) = &opts.cities_patch {
        load_tab_file(
            &mut db,
            patch,
            "geoname",
            19,
            Some(&mut truncate_alternate_names()),
        )?;
    }
    if let Some(il) = &opts.il_cities {
        load_tab_file(&mut db, il, "geoname", 19, Some(&mut il_cities_filter()))?;
    }

    exec_sql(&db, schema::CREATE_ADMIN1)?;
    load_tab_file(&mut db, &opts.admin1_codes, "admin1", 4, None)?;

    exec_sql(&db, schema::PATCH_US_CAPITAL)?;

    exec_sql(&db, schema::CREATE_ALTERNATENAMES)?;
    if let Some(alt) = &opts.il_alternate {
        load_tab_file(
            &mut db,
            alt,
            "alternatenames",
            10,
            Some(&mut il_alternate_filter()),
        )?;
    }

    exec_sql(&db, schema::PATCH_DISPUTED_TERRITORY)?;

    fulltext::build_fulltext(&db)?;

    info!("closing {}", opts.db_filename.display());
    db.close().map_err(|(_, e)| e)?;
    info!("build_geonames_db finished");
    Ok(())
}

/// Runs each statement in order, logging it first.
fn exec_sql(db: &Connection, sqls: &[&str]) -> Result<()> {
    for sql in sqls {
        info!("{sql}");
        db.execute_batch(sql)?;
    }
    Ok(())
}

pub(crate) fn not_found(path: &Path, err: std::io::Error) -> crate::GeoError {
    if err.kind() == std::io::ErrorKind::NotFound {
        crate::GeoError::NotFound(path.to_path_buf())
    } else {
        crate::GeoError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
