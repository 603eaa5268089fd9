//! Test fixtures for result sheet parser testing
//!
//! This module provides sample sheet texts shaped like the output of
//! page-text extraction, used across the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod chain_tests;

/// A full moto result sheet with a split row, a page break and noise lines
pub fn create_moto_sheet() -> String {
    r#"2024 Lucas Oil Pro Motocross Championship
Hangtown Motocross Classic - Rancho Cordova, CA
ROUND 1 - May 18, 2024
450 Class
Moto 1 Results
POS # RIDER HOMETOWN BIKE LAPS GAP
1 1 Jett Lawrence Landsborough, Australia Honda CRF450R 35:12.345
2
32 Justin Cooper Cairo, NY Yamaha YZ450F 17 +5.112
3 2 Chase Sexton La Moille, IL KTM 450 SX-F Factory Edition 17 +9.410
4 7 Aaron M. Plessinger Hamilton, OH KTM 450 SX-F 17 +12.002
Page 1 of 2
POS # RIDER HOMETOWN BIKE LAPS GAP
5 51 Justin Barcia Jr. Monroe, NY GasGas MC 450F 17 +20.331
6 10 Ty Masterpool Honda CRF450R 16 1 Lap
7 94 Ken Roczen Mattstedt Suzuki RM-Z450 16 1 Lap
AMA Pro Motocross - Official Results"#
        .to_string()
}

/// A cover page without any result table
pub fn create_cover_sheet() -> String {
    r#"2024 Lucas Oil Pro Motocross Championship
Hangtown Motocross Classic - Rancho Cordova, CA
ROUND 1 - May 18, 2024
Entry List and Schedule"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
