//! SQL schema for the plat SQLite warehouse.
//!
//! Executed once at connection startup. Column names stay camelCase to
//! match the upstream API field names, so staging files and database
//! rows line up without a rename layer.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS location_dim (
    location_id      INTEGER PRIMARY KEY,
    addressLine1     TEXT,
    city             TEXT,
    state            TEXT,
    zipCode          TEXT,
    formattedAddress TEXT,
    county           TEXT,
    longitude        REAL,
    latitude         REAL,
    addressLine2     TEXT
);

CREATE TABLE IF NOT EXISTS sales_dim (
    sales_id      INTEGER PRIMARY KEY,
    lastSaleDate  TEXT,
    lastSalePrice REAL
);

CREATE TABLE IF NOT EXISTS features_dim (
    features_id   INTEGER PRIMARY KEY,
    bedrooms      REAL,
    bathrooms     REAL,
    squareFootage REAL,
    lotSize       REAL,
    features      TEXT
);

-- Dimensions are rebuilt in full on every run; the fact table references
-- them by surrogate key and is cleared first on reset.
CREATE TABLE IF NOT EXISTS property_fact (
    id               TEXT PRIMARY KEY,
    sales_id         INTEGER NOT NULL REFERENCES sales_dim(sales_id),
    location_id      INTEGER NOT NULL REFERENCES location_dim(location_id),
    features_id      INTEGER NOT NULL REFERENCES features_dim(features_id),
    yearBuilt        INTEGER,
    assessorID       TEXT,
    legalDescription TEXT,
    ownerOccupied    INTEGER,
    propertyType     TEXT,
    taxAssessment    TEXT,
    propertyTaxes    TEXT,
    subdivision      TEXT,
    zoning           TEXT
);
";
