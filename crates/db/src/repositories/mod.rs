//! Repository layer: zero-sized structs whose async methods take a `&PgPool`.

mod rug_repo;

pub use rug_repo::RugRepo;
