//! Pure domain logic for the rug catalog.
//!
//! Nothing in this crate touches the database or the network. Filesystem
//! access is limited to the [`images::FileProbe`] capability so every
//! resolution rule can be exercised against an in-memory probe.

pub mod cell;
pub mod error;
pub mod filter;
pub mod headers;
pub mod images;
pub mod normalize;
pub mod pagination;
pub mod reconcile;
pub mod repair;
pub mod types;
