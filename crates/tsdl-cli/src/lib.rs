//! The `tsdl` command-line driver.
//!
//! Reads TypeScript-dialect sources, lowers each file independently and
//! writes the JavaScript next to the source or under `--out-dir`.

// Command-line arguments
pub mod args;

// Option resolution from config files and flags
pub mod config;

// Source discovery, lowering and output
pub mod driver;

// Tracing subscriber setup from TSDL_LOG / TSDL_LOG_FORMAT
pub mod tracing_config;
