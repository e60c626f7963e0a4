//! # salonbook-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `salonbook-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Enforce booking reference uniqueness with a unique index
//!
//! ## Dependency rule
//! Depends on `salonbook-app` (for port traits) and `salonbook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod barber_repo;
mod booking_repo;
mod error;
mod offering_repo;
mod pool;

pub use barber_repo::SqliteBarberRepository;
pub use booking_repo::SqliteBookingRepository;
pub use error::StorageError;
pub use offering_repo::SqliteOfferingRepository;
pub use pool::{Config, Database};
