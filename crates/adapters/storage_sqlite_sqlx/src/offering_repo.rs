//! `SQLite` implementation of [`OfferingRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use salonbook_app::ports::OfferingRepository;
use salonbook_domain::error::SalonBookError;
use salonbook_domain::id::OfferingId;
use salonbook_domain::offering::Offering;

use crate::error::{StorageError, insert_error};

struct Wrapper(Offering);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Offering> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let price_cents: u32 = row.try_get("price_cents")?;
        let duration_minutes: u32 = row.try_get("duration_minutes")?;

        let id = OfferingId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Offering {
            id,
            name,
            price_cents,
            duration_minutes,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO offerings (id, name, price_cents, duration_minutes) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM offerings WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM offerings ORDER BY name";
const UPDATE: &str =
    "UPDATE offerings SET name = ?, price_cents = ?, duration_minutes = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM offerings WHERE id = ?";

/// `SQLite`-backed offering repository.
pub struct SqliteOfferingRepository {
    pool: SqlitePool,
}

impl SqliteOfferingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl OfferingRepository for SqliteOfferingRepository {
    fn create(
        &self,
        offering: Offering,
    ) -> impl Future<Output = Result<Offering, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(offering.id.to_string())
                .bind(&offering.name)
                .bind(offering.price_cents)
                .bind(offering.duration_minutes)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, "Offering", &[("id", offering.id.to_string())]))?;

            Ok(offering)
        }
    }

    fn get_by_id(
        &self,
        id: OfferingId,
    ) -> impl Future<Output = Result<Option<Offering>, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Offering>, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        offering: Offering,
    ) -> impl Future<Output = Result<Offering, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&offering.name)
                .bind(offering.price_cents)
                .bind(offering.duration_minutes)
                .bind(offering.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(offering)
        }
    }

    fn delete(&self, id: OfferingId) -> impl Future<Output = Result<(), SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
