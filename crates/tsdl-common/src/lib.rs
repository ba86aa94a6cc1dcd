//! Common types and utilities for the tsdl downlevel compiler.
//!
//! This crate provides foundational types used across all tsdl crates:
//! - Formatting options handed to the lowering pass (`FormattingOptions`)
//! - New-line handling (`NewLineKind`)
//! - Line/column bookkeeping over source text (`LineMap`)
//! - Recursion limits shared by the scanner, parser and tree walkers

// Common types - shared constants used by every stage
pub mod common;
pub use common::NewLineKind;

// Formatting options consumed by the emitter
pub mod options;
pub use options::{FormattingOptions, LoweringOptions};

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Centralized limits and thresholds
pub mod limits;
