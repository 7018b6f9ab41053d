//! # studyhub-database
//!
//! Connection and transaction management plus the concrete folder,
//! document and user repositories.
//!
//! The backend is chosen at compile time: PostgreSQL with the `postgres`
//! feature, SQLite otherwise. Every repository method takes the connection
//! it should run on, so the same statement can execute inside a
//! transaction opened by [`DatabasePool::with_transaction`] or on an
//! ad-hoc pooled connection.

pub mod connection;
pub mod migration;
pub mod repositories;

#[cfg(all(test, not(feature = "postgres")))]
pub(crate) mod test_support;

pub use connection::{DatabasePool, Db, DbConnection, DbPool, PooledConnection};
pub use migration::run_migrations;
pub use repositories::{DocumentRepository, FolderRepository, UserRepository};
