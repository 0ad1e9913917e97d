//! placedb-cli — build and query the place-resolution SQLite stores.
//!
//! Usage examples
//! --------------
//!
//! - Build the geonames store from geonames.org extracts
//!   $ placedb-cli --geonames geonames.sqlite3 build \
//!       --cities cities5000.txt --il-cities IL.txt --il-alternate alternatenames/IL.txt
//!
//! - Build the ZIP store from a SQL dump
//!   $ placedb-cli --zips zips.sqlite3 build-zips zips.sql
//!
//! - Look up records (JSON on stdout, exit 1 on a miss)
//!   $ placedb-cli zip 02912
//!   $ placedb-cli geoname 4119403
//!   $ placedb-cli city "Tel Aviv"
//!
//! - Autocomplete a partial query
//!   $ placedb-cli complete --coords Spring
//!
//! Logs go to stderr; control verbosity with RUST_LOG.

mod args;

use clap::Parser;
use placedb_core::{GeoDb, Location};
use tracing_subscriber::EnvFilter;

use crate::args::{CliArgs, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        #[cfg(feature = "builder")]
        Commands::Build(build) => {
            let opts = placedb_core::builder::BuildOptions {
                db_filename: args.geonames,
                country_info: build.country_info,
                cities: build.cities,
                cities_patch: build.cities_patch,
                admin1_codes: build.admin1,
                il_cities: build.il_cities,
                il_alternate: build.il_alternate,
                min_population: build.min_population,
            };
            placedb_core::builder::build_geonames_db(&opts)?;
        }

        #[cfg(feature = "builder")]
        Commands::BuildZips { sql_file } => {
            placedb_core::builder::build_zips_db(&args.zips, &sql_file)?;
        }

        Commands::Zip { zip } => {
            let mut db = GeoDb::new(&args.zips, &args.geonames)?;
            print_location(db.lookup_zip(&zip)?)?;
        }

        Commands::Geoname { geonameid } => {
            let mut db = GeoDb::new(&args.zips, &args.geonames)?;
            print_location(db.lookup_geoname(geonameid)?)?;
        }

        Commands::City { name } => {
            let mut db = GeoDb::new(&args.zips, &args.geonames)?;
            print_location(db.lookup_legacy_city(&name)?)?;
        }

        Commands::Complete { query, coords } => {
            let mut db = GeoDb::new(&args.zips, &args.geonames)?;
            let results = db.autocomplete(&query, coords)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

fn print_location(location: Option<Location>) -> anyhow::Result<()> {
    match location {
        Some(loc) => {
            println!("{}", serde_json::to_string_pretty(&loc)?);
            Ok(())
        }
        None => anyhow::bail!("not found"),
    }
}
