// crates/placedb-core/src/builder/zips.rs

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use super::not_found;
use crate::error::Result;

/// Builds the ZIP code SQLite store from a SQL dump file.
///
/// The dump is expected to create and populate `ZIPCodes_Primary` plus
/// the two full-text variants (`ZIPCodes_CityFullText`, FTS4, and
/// `ZIPCodes_CityFullText5`, FTS5 with a precomposed `longname`
/// column). The file is executed as-is; like the geonames build, the
/// dump's own DROP/CREATE statements make a rerun idempotent.
pub fn build_zips_db(db_filename: &Path, sql_file: &Path) -> Result<()> {
    info!("{} => {}", sql_file.display(), db_filename.display());
    let sql = fs::read_to_string(sql_file).map_err(|e| not_found(sql_file, e))?;
    let db = Connection::open(db_filename)?;
    db.execute_batch(&sql)?;
    db.close().map_err(|(_, e)| e)?;
    info!("build_zips_db finished");
    Ok(())
}
