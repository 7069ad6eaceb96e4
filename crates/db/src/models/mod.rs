//! Row models and DTOs for the catalog tables.

pub mod rug;
