// crates/placedb-core/src/builder/schema.rs

//! DDL and fixed data-correction statements for the geonames store.
//!
//! Field ordering in the CREATE TABLE statements matches the upstream
//! geonames.org extract schema positionally; the loader inserts rows by
//! position, not by name.

/// Country metadata (`countryInfo.txt`, 19 fields).
pub const CREATE_COUNTRY: &[&str] = &[
    "DROP TABLE IF EXISTS country",
    "CREATE TABLE country (
      ISO TEXT PRIMARY KEY,
      ISO3 TEXT NOT NULL,
      IsoNumeric TEXT NOT NULL,
      fips TEXT NOT NULL,
      Country TEXT NOT NULL,
      Capital TEXT NOT NULL,
      Area INT NOT NULL,
      Population INT NOT NULL,
      Continent TEXT NOT NULL,
      tld TEXT NOT NULL,
      CurrencyCode TEXT NOT NULL,
      CurrencyName TEXT NOT NULL,
      Phone TEXT NOT NULL,
      PostalCodeFormat TEXT,
      PostalCodeRegex TEXT,
      Languages TEXT NOT NULL,
      geonameid INT NOT NULL,
      neighbours TEXT NOT NULL,
      EquivalentFipsCode TEXT NOT NULL
    );",
];

/// Place records (19 fields). The oversized `alternatenames` column is
/// blanked by the row filters before insert; alternate names live in
/// their own table.
pub const CREATE_GEONAME: &[&str] = &[
    "DROP TABLE IF EXISTS geoname",
    "CREATE TABLE geoname (
      geonameid int PRIMARY KEY,
      name nvarchar(200),
      asciiname nvarchar(200),
      alternatenames nvarchar(4000),
      latitude decimal(18,15),
      longitude decimal(18,15),
      fclass nchar(1),
      fcode nvarchar(10),
      country nvarchar(2),
      cc2 nvarchar(60),
      admin1 nvarchar(20),
      admin2 nvarchar(80),
      admin3 nvarchar(20),
      admin4 nvarchar(20),
      population int,
      elevation int,
      gtopo30 int,
      timezone nvarchar(40),
      moddate date);",
];

/// Administrative divisions keyed by `CC.ADMIN1` composite code.
pub const CREATE_ADMIN1: &[&str] = &[
    "DROP TABLE IF EXISTS admin1",
    "CREATE TABLE admin1 (
      key TEXT PRIMARY KEY,
      name nvarchar(200) NOT NULL,
      asciiname nvarchar(200) NOT NULL,
      geonameid int NOT NULL
      );",
];

/// Alternate names, many-to-one with geoname records.
pub const CREATE_ALTERNATENAMES: &[&str] = &[
    "DROP TABLE IF EXISTS alternatenames",
    "CREATE TABLE alternatenames (
    id int PRIMARY KEY,
    geonameid int NOT NULL,
    isolanguage varchar(7),
    name varchar(400),
    isPreferredName tinyint,
    isShortName tinyint,
    isColloquial tinyint,
    isHistoric tinyint,
    periodFrom NULL,
    periodTo NULL
    );",
];

/// Fix inconsistencies with the USA capital: the upstream extract calls
/// both the city and the district plain "Washington".
pub const PATCH_US_CAPITAL: &[&str] = &[
    "UPDATE geoname
      SET name = 'Washington, D.C.', asciiname = 'Washington, D.C.'
      WHERE geonameid = 4140963;",
    "UPDATE admin1
      SET name = 'Washington, D.C.', asciiname = 'Washington, D.C.'
      WHERE key = 'US.DC';",
];

/// Partition the disputed-territory records: drop the Gaza sub-region,
/// remove one known-bad historical record, and reattribute the West
/// Bank sub-region.
pub const PATCH_DISPUTED_TERRITORY: &[&str] = &[
    "delete from geoname where country = 'PS' and admin1 = 'GZ';",
    "delete from geoname where geonameid = 7303419;",
    "update geoname set country = 'IL' where country = 'PS' and admin1 = 'WE';",
];
