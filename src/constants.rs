//! Application constants for the motocross results parser
//!
//! This module contains the closed vocabularies the line parser matches
//! against, the column markers of the results table header, and the default
//! values used by configuration and the CLI.

// =============================================================================
// Vocabulary Tables
// =============================================================================

/// Two-letter region codes (U.S. states plus `US` itself)
///
/// Used both for locating the event's "City, CODE" line and for resolving
/// rider hometowns. Order matters: lookups take the first code that matches.
pub const REGION_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "US",
];

/// Country names seen as rider hometowns on international entries
///
/// Stored upper-case; the misspellings are kept because the result sheets
/// themselves carry them.
pub const COUNTRY_NAMES: &[&str] = &[
    "AUSTRALIA",
    "AUSTRAILIA",
    "BELGIUM",
    "BOLIVIA",
    "BRAZIL",
    "CANADA",
    "CHILE",
    "CHINA",
    "COSTA RICA",
    "CZECH REPUBLIC",
    "DENMARK",
    "DOMINICAN REPUBLIC",
    "ECUADOR",
    "ENGLAND",
    "ESTONIA",
    "FINLAND",
    "FRANCE",
    "GERMANY",
    "GREAT BRITAIN",
    "GREAT BRITIAN",
    "GUAM",
    "HONDURAS",
    "IRAN",
    "IRELAND",
    "ITALY",
    "JAPAN",
    "KOREA",
    "LITHUANIA",
    "MEXICO",
    "NETHERLAND",
    "NEW ZEALAND",
    "NORWAY",
    "PERU",
    "PHILLIPPINES",
    "RUSSIA",
    "SCOTLAND",
    "SOUTH AFRICA",
    "SPAIN",
    "SWEDEN",
    "SWITZERLAND",
    "UNITED KINGDOM",
    "UGANDA",
    "URUGUAY",
    "VENEZUELA",
    "VIETNAM",
    "ZAMBIA",
];

/// Motocross bike manufacturers, upper-case
pub const BIKE_BRANDS: &[&str] = &[
    "HONDA",
    "YAMAHA",
    "KTM",
    "HUSQVARNA",
    "KAWASAKI",
    "SUZUKI",
    "GASGAS",
    "TRIUMPH",
    "DUCATI",
    "STARK",
];

/// Engine displacement numerals that belong to a bike description
pub const CLASS_SIZES: &[u32] = &[125, 250, 450, 500];

// =============================================================================
// Line Markers
// =============================================================================

/// Separator between a track name and its location, and between round and date
pub const FIELD_SEPARATOR: &str = " - ";

/// Literal that introduces the round number
pub const ROUND_MARKER: &str = "ROUND ";

/// Prefix of the results table header line (matched case-insensitively)
pub const TABLE_HEADER_PREFIX: &str = "POS";

/// Column markers searched in the table header, in column order
///
/// A marker matches as a word: it must be followed by a space or the end of
/// the line. The number marker must also be preceded by a space.
pub mod column_markers {
    pub const NUMBER: &str = "#";
    pub const NAME: &str = "NAME";
    pub const RIDER: &str = "RIDER";
    pub const HOMETOWN: &str = "HOMETOWN";
    pub const BIKE: &str = "BIKE";
}

/// Suffix stripped after a driver name
pub const JUNIOR_SUFFIX: &str = "JR.";

/// Upper bound (exclusive) for a rider's bib number
pub const MAX_BIB_NUMBER: u16 = 1000;

/// Maximum number of tokens inspected for a bike description
pub const MAX_BIKE_TOKENS: usize = 4;

/// Number of bike tokens always kept
pub const BIKE_TOKENS_ALWAYS_KEPT: usize = 2;

// =============================================================================
// Export Columns
// =============================================================================

/// Column names of the flat results table, in output order
pub mod columns {
    pub const TRACK_NAME: &str = "track_name";
    pub const LOCATION: &str = "location";
    pub const ROUND: &str = "round";
    pub const YEAR: &str = "year";
    pub const DATE: &str = "date";
    pub const CLASS_NAME: &str = "class_name";
    pub const RESULT_KIND: &str = "result_kind";
    pub const POSITION: &str = "position";
    pub const NUMBER: &str = "number";
    pub const DRIVER_NAME: &str = "driver_name";
    pub const HOMETOWN: &str = "hometown";
    pub const BIKE: &str = "bike";
    pub const SOURCE: &str = "source";

    /// Columns dropped by the compact export layout
    pub const COMPACT_DROPPED: &[&str] = &[ROUND, RESULT_KIND, HOMETOWN];
}

/// Pattern that extracts the year from a race date
pub const YEAR_PATTERN: &str = r"20[0-9]{2}";

// =============================================================================
// Defaults
// =============================================================================

/// Default glob pattern for extracted result sheets
pub const DEFAULT_FILE_PATTERN: &str = "*.txt";

/// Default output file name for the results table
pub const DEFAULT_OUTPUT_FILE: &str = "race_results.csv";

/// Default number of parallel parse workers
pub const DEFAULT_PARALLEL_WORKERS: usize = 4;

/// Application directory name under the user's config directory
pub const CONFIG_DIR_NAME: &str = "mx-results";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the worker count
pub const ENV_WORKERS: &str = "MX_RESULTS_WORKERS";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "MX_RESULTS_LOG";

/// Extension of the original result documents
pub const SOURCE_DOCUMENT_EXTENSION: &str = "pdf";
