// crates/placedb-core/src/builder/load.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rusqlite::{params_from_iter, Connection};
use tracing::{info, warn};

use super::not_found;
use crate::error::Result;

/// Row filter applied to each parsed line before insert.
///
/// Receives the mutable field vector; may rewrite fields in place (blank
/// an oversized column, correct a language tag) and returns whether the
/// row should be inserted.
pub type RowFilter<'a> = &'a mut dyn FnMut(&mut Vec<String>) -> bool;

/// Streams a tab-delimited extract into `table`, one transaction per file.
///
/// Lines starting with `#` are comments. Lines whose field count does
/// not match `expected_fields` are logged and skipped, never fatal.
/// Rows are inserted with `INSERT OR IGNORE` semantics, so duplicate
/// primary keys are dropped silently (last-write-wins is handled by the
/// fixed UPDATE patches, not here). Returns the number of accepted rows.
pub fn load_tab_file(
    db: &mut Connection,
    path: &Path,
    table: &str,
    expected_fields: usize,
    filter: Option<RowFilter<'_>>,
) -> Result<usize> {
    info!("{} => {table}", path.display());
    let file = File::open(path).map_err(|e| not_found(path, e))?;
    let reader = BufReader::new(file);

    let mut sql = format!("INSERT OR IGNORE INTO {table} VALUES (?");
    for _ in 1..expected_fields {
        sql.push_str(",?");
    }
    sql.push(')');
    info!("{sql}");

    let mut filter = filter;
    let mut num = 0usize;
    let mut accepted = 0usize;

    let tx = db.transaction()?;
    {
        let mut stmt = tx.prepare(&sql)?;
        for line in reader.lines() {
            let line = line.map_err(|e| not_found(path, e))?;
            num += 1;
            if line.starts_with('#') {
                continue;
            }
            let mut fields: Vec<String> = line.split('\t').map(str::to_owned).collect();
            if fields.len() != expected_fields {
                warn!(
                    "{}:{num}: got {} fields (expected {expected_fields})",
                    path.display(),
                    fields.len()
                );
                continue;
            }
            if let Some(f) = filter.as_mut() {
                if !f(&mut fields) {
                    continue;
                }
            }
            stmt.execute(params_from_iter(fields.iter()))?;
            accepted += 1;
        }
    }
    tx.commit()?;

    info!("inserted {accepted} / {num} into {table} from {}", path.display());
    Ok(accepted)
}
