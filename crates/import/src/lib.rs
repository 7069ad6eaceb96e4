//! Spreadsheet import and image repair for the rug catalog.
//!
//! The library holds everything the two batch binaries share so the
//! drivers can be exercised from tests with an in-memory sink or a
//! temporary database.

pub mod config;
pub mod error;
pub mod import;
pub mod repair;
pub mod sheet;
pub mod sink;
