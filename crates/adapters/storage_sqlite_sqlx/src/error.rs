//! Storage-specific error type wrapping sqlx errors.

use salonbook_domain::error::{ConflictError, SalonBookError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for SalonBookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map an insert failure, turning a unique-index violation into a
/// [`ConflictError`].
///
/// `fields` lists the unique columns of the table with the values being
/// inserted; the column named in the `SQLite` message is reported, falling
/// back to the first entry.
pub(crate) fn insert_error(
    err: sqlx::Error,
    entity: &'static str,
    fields: &[(&'static str, String)],
) -> SalonBookError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            let message = db.message();
            let (field, value) = fields
                .iter()
                .find(|(field, _)| message.ends_with(&format!(".{field}")))
                .or_else(|| fields.first())
                .cloned()
                .unwrap_or(("id", String::new()));
            ConflictError {
                entity,
                field,
                value,
            }
            .into()
        }
        other => StorageError::from(other).into(),
    }
}
