//! `SQLite` implementation of [`BarberRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use salonbook_app::ports::BarberRepository;
use salonbook_domain::barber::Barber;
use salonbook_domain::error::SalonBookError;
use salonbook_domain::id::BarberId;

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`Barber`].
struct Wrapper(Barber);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Barber> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let phone: Option<String> = row.try_get("phone")?;
        let active: bool = row.try_get("active")?;

        let id = BarberId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Barber {
            id,
            name,
            phone,
            active,
        }))
    }
}

const INSERT: &str = "INSERT INTO barbers (id, name, phone, active) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM barbers WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM barbers ORDER BY name";
const UPDATE: &str = "UPDATE barbers SET name = ?, phone = ?, active = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM barbers WHERE id = ?";

/// `SQLite`-backed barber repository.
pub struct SqliteBarberRepository {
    pool: SqlitePool,
}

impl SqliteBarberRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BarberRepository for SqliteBarberRepository {
    fn create(&self, barber: Barber) -> impl Future<Output = Result<Barber, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(barber.id.to_string())
                .bind(&barber.name)
                .bind(&barber.phone)
                .bind(barber.active)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, "Barber", &[("id", barber.id.to_string())]))?;

            Ok(barber)
        }
    }

    fn get_by_id(
        &self,
        id: BarberId,
    ) -> impl Future<Output = Result<Option<Barber>, SalonBookError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Barber>, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, barber: Barber) -> impl Future<Output = Result<Barber, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&barber.name)
                .bind(&barber.phone)
                .bind(barber.active)
                .bind(barber.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(barber)
        }
    }

    fn delete(&self, id: BarberId) -> impl Future<Output = Result<(), SalonBookError>> + Send {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteBarberRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteBarberRepository::new(db.pool().clone())
    }

    fn test_barber() -> Barber {
        Barber::builder()
            .name("Marco")
            .phone("020 7946 0000")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_barber_when_valid() {
        let repo = setup().await;
        let barber = test_barber();
        let id = barber.id;

        repo.create(barber.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, barber);
    }

    #[tokio::test]
    async fn should_return_none_when_barber_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(BarberId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_barbers_by_name() {
        let repo = setup().await;
        repo.create(test_barber()).await.unwrap();
        repo.create(Barber::builder().name("Ana").build().unwrap())
            .await
            .unwrap();

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Ana", "Marco"]);
    }

    #[tokio::test]
    async fn should_update_barber_when_exists() {
        let repo = setup().await;
        let mut barber = test_barber();
        let id = barber.id;
        repo.create(barber.clone()).await.unwrap();

        barber.active = false;
        barber.phone = None;
        repo.update(barber).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(!fetched.active);
        assert!(fetched.phone.is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_id_with_conflict() {
        let repo = setup().await;
        let barber = test_barber();
        repo.create(barber.clone()).await.unwrap();

        let result = repo.create(barber).await;
        assert!(matches!(result, Err(SalonBookError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_forget_barber_after_delete() {
        let repo = setup().await;
        let barber = test_barber();
        let id = barber.id;
        repo.create(barber).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
