//! Database repository layer.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally; all database
//! queries, inserts, updates, and deletes are performed through these repositories.

pub mod session;

#[cfg(test)]
mod test;
