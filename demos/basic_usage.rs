//! Basic usage example for placedb
//!
//! This example demonstrates how to:
//! - Open the two SQLite stores
//! - Look up ZIP codes, geonames ids, and legacy city names
//! - Run autocomplete queries
//!
//! The stores must exist already; build them first:
//!   $ placedb-cli --geonames geonames.sqlite3 build --cities cities5000.txt ...
//!   $ placedb-cli --zips zips.sqlite3 build-zips zips.sql
//!
//! Then run:
//!   $ cargo run --example basic_usage -- zips.sqlite3 geonames.sqlite3

use std::env;

use placedb_core::{GeoDb, Result};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let zips = args.next().unwrap_or_else(|| "zips.sqlite3".to_owned());
    let geonames = args.next().unwrap_or_else(|| "geonames.sqlite3".to_owned());

    println!("=== placedb Basic Usage Example ===\n");

    println!("Opening {zips} and {geonames}...");
    let mut db = GeoDb::new(&zips, &geonames)?;
    println!("✓ Stores opened successfully\n");

    // Example 1: ZIP code lookup
    println!("--- Example 1: Look up a ZIP code ---");
    if let Some(loc) = db.lookup_zip("02912")? {
        println!("Found: {}", loc.name);
        println!("Coordinates: {}, {}", loc.latitude, loc.longitude);
        println!("Timezone: {}", loc.tzid);
    }
    println!();

    // Example 2: geonames id lookup
    println!("--- Example 2: Look up a geonames id ---");
    if let Some(loc) = db.lookup_geoname(4119403)? {
        println!("Found: {}", loc.name);
        println!("Country: {}", loc.cc);
        println!("Population: {:?}", loc.population);
    }
    println!();

    // Example 3: legacy city name
    println!("--- Example 3: Resolve a legacy city name ---");
    if let Some(loc) = db.lookup_legacy_city("Tel Aviv")? {
        println!("Found: {} (il={})", loc.name, loc.il);
    }
    println!();

    // Example 4: autocomplete
    println!("--- Example 4: Autocomplete ---");
    for result in db.autocomplete("Spring", false)? {
        println!("- {} [{}]", result.value, result.geo);
    }

    Ok(())
}
