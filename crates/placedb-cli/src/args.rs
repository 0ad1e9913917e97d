use std::path::PathBuf;

use clap::{Parser, Subcommand};
#[cfg(feature = "builder")]
use clap::Args;

/// CLI arguments for placedb-cli
#[derive(Debug, Parser)]
#[command(
    name = "placedb",
    version,
    about = "Build and query the placedb SQLite stores (ZIP codes and geonames)"
)]
pub struct CliArgs {
    /// Path to the ZIP code store
    #[arg(long = "zips", global = true, default_value = "zips.sqlite3")]
    pub zips: PathBuf,

    /// Path to the geonames store
    #[arg(long = "geonames", global = true, default_value = "geonames.sqlite3")]
    pub geonames: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the geonames store from geonames.org tab-delimited extracts
    #[cfg(feature = "builder")]
    Build(BuildArgs),

    /// Build the ZIP code store from a SQL dump file
    #[cfg(feature = "builder")]
    BuildZips {
        /// SQL dump creating and populating the ZIP tables
        sql_file: PathBuf,
    },

    /// Look up a ZIP code (ZIP+4 accepted)
    Zip {
        /// e.g. 02912 or 62704-1234
        zip: String,
    },

    /// Look up a geonames id
    Geoname {
        /// e.g. 4119403
        geonameid: u32,
    },

    /// Resolve a legacy free-text city name
    City {
        /// e.g. "Tel Aviv" or "Beer Sheva"
        name: String,
    },

    /// Autocomplete a partial place query
    Complete {
        /// Partial city name or ZIP prefix
        query: String,

        /// Include latitude/longitude/timezone/population in results
        #[arg(long)]
        coords: bool,
    },
}

#[cfg(feature = "builder")]
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Country metadata extract (countryInfo.txt)
    #[arg(long, default_value = "countryInfo.txt")]
    pub country_info: PathBuf,

    /// Main city extract (cities5000.txt or similar)
    #[arg(long, default_value = "cities5000.txt")]
    pub cities: PathBuf,

    /// Optional extra city rows applied after the main extract
    #[arg(long)]
    pub cities_patch: Option<PathBuf>,

    /// Admin-1 division names (admin1CodesASCII.txt)
    #[arg(long, default_value = "admin1CodesASCII.txt")]
    pub admin1: PathBuf,

    /// Israel country extract (IL.txt)
    #[arg(long)]
    pub il_cities: Option<PathBuf>,

    /// Israel alternate-names extract
    #[arg(long)]
    pub il_alternate: Option<PathBuf>,

    /// Reject plain populated places below this population
    #[arg(long)]
    pub min_population: Option<i64>,
}
