//! Common test infrastructure
//!
//! Builds CSV datasets in temporary directories for the end-to-end tests.
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::{csv_row, standard_specs, TestDataset, TrackSpec};
