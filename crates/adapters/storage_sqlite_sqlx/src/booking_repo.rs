//! `SQLite` implementation of [`BookingRepository`].
//!
//! The `bookings.reference` column carries a unique index, so a reference
//! handed out twice by racing allocations is rejected on the second insert
//! with [`SalonBookError::Conflict`].

use std::future::Future;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use salonbook_app::ports::BookingRepository;
use salonbook_domain::booking::{Booking, BookingStatus};
use salonbook_domain::error::SalonBookError;
use salonbook_domain::id::{BarberId, BookingId, OfferingId};
use salonbook_domain::reference::BookingReference;
use salonbook_domain::time::format_date;

use crate::error::{StorageError, insert_error};

const TIME_FORMAT: &str = "%H:%M:%S";

fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

struct Wrapper(Booking);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Booking> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let reference: String = row.try_get("reference")?;
        let barber_id: String = row.try_get("barber_id")?;
        let offering_id: String = row.try_get("offering_id")?;
        let customer_name: String = row.try_get("customer_name")?;
        let customer_phone: String = row.try_get("customer_phone")?;
        let date: String = row.try_get("date")?;
        let time: Option<String> = row.try_get("time")?;
        let status: String = row.try_get("status")?;
        let notes: Option<String> = row.try_get("notes")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Booking {
            id: BookingId::from_str(&id).map_err(decode)?,
            reference: BookingReference::from_str(&reference).map_err(decode)?,
            barber_id: BarberId::from_str(&barber_id).map_err(decode)?,
            offering_id: OfferingId::from_str(&offering_id).map_err(decode)?,
            customer_name,
            customer_phone,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(decode)?,
            time: time
                .map(|t| NaiveTime::parse_from_str(&t, TIME_FORMAT))
                .transpose()
                .map_err(decode)?,
            status: BookingStatus::from_str(&status).map_err(decode)?,
            notes,
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(decode)?
                .to_utc(),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO bookings (id, reference, barber_id, offering_id, customer_name, customer_phone,
                          date, time, status, notes, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM bookings WHERE id = ?";
const SELECT_BY_REFERENCE: &str = "SELECT * FROM bookings WHERE reference = ?";
const EXISTS_BY_REFERENCE: &str = "SELECT EXISTS(SELECT 1 FROM bookings WHERE reference = ?)";
const SELECT_BY_BARBER: &str =
    "SELECT * FROM bookings WHERE barber_id = ? ORDER BY date, time, created_at";
const SELECT_ALL: &str = "SELECT * FROM bookings ORDER BY date, time, created_at";

const UPDATE: &str = r"
    UPDATE bookings
    SET barber_id = ?, offering_id = ?, customer_name = ?, customer_phone = ?,
        date = ?, time = ?, status = ?, notes = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM bookings WHERE id = ?";

/// `SQLite`-backed booking repository.
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BookingRepository for SqliteBookingRepository {
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(booking.id.to_string())
                .bind(booking.reference.as_str())
                .bind(booking.barber_id.to_string())
                .bind(booking.offering_id.to_string())
                .bind(&booking.customer_name)
                .bind(&booking.customer_phone)
                .bind(format_date(booking.date))
                .bind(booking.time.map(|t| t.format(TIME_FORMAT).to_string()))
                .bind(booking.status.as_str())
                .bind(&booking.notes)
                .bind(booking.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(|err| {
                    insert_error(
                        err,
                        "Booking",
                        &[
                            ("reference", booking.reference.to_string()),
                            ("id", booking.id.to_string()),
                        ],
                    )
                })?;

            Ok(booking)
        }
    }

    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, SalonBookError>> + Send {
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

    fn find_by_reference(
        &self,
        reference: BookingReference,
    ) -> impl Future<Output = Result<Option<Booking>, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_REFERENCE)
                .bind(reference.as_str().to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn reference_exists(
        &self,
        reference: BookingReference,
    ) -> impl Future<Output = Result<bool, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let exists: bool = sqlx::query_scalar(EXISTS_BY_REFERENCE)
                .bind(reference.as_str().to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }

    fn find_by_barber(
        &self,
        barber_id: BarberId,
    ) -> impl Future<Output = Result<Vec<Booking>, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_BARBER)
                .bind(barber_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Booking>, SalonBookError>> + Send {
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
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, SalonBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(booking.barber_id.to_string())
                .bind(booking.offering_id.to_string())
                .bind(&booking.customer_name)
                .bind(&booking.customer_phone)
                .bind(format_date(booking.date))
                .bind(booking.time.map(|t| t.format(TIME_FORMAT).to_string()))
                .bind(booking.status.as_str())
                .bind(&booking.notes)
                .bind(booking.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(booking)
        }
    }

    fn delete(&self, id: BookingId) -> impl Future<Output = Result<(), SalonBookError>> + Send {
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
    use salonbook_app::ports::{BookingNamespace, CandidateSource};
    use salonbook_app::reference_allocator::ReferenceAllocator;
    use salonbook_app::services::booking_service::{BookingService, NewBooking};
    use salonbook_domain::error::ConflictError;

    async fn setup() -> SqliteBookingRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteBookingRepository::new(db.pool().clone())
    }

    fn reference(s: &str) -> BookingReference {
        s.parse().unwrap()
    }

    fn test_booking(reference_code: &str) -> Booking {
        Booking::builder()
            .reference(reference(reference_code))
            .barber_id(BarberId::new())
            .offering_id(OfferingId::new())
            .customer_name("Jo Bloggs")
            .customer_phone("07700 900123")
            .date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
            .time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
            .notes("Window seat")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_booking() {
        let repo = setup().await;
        let booking = test_booking("ABC123");
        let id = booking.id;

        repo.create(booking.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.reference, booking.reference);
        assert_eq!(fetched.date, booking.date);
        assert_eq!(fetched.time, booking.time);
        assert_eq!(fetched.notes, booking.notes);
        assert_eq!(fetched.status, BookingStatus::Pending);
        assert_eq!(fetched.created_at, booking.created_at);
    }

    #[tokio::test]
    async fn should_find_booking_by_reference() {
        let repo = setup().await;
        let booking = test_booking("ZZ9PZA");
        let id = booking.id;
        repo.create(booking).await.unwrap();

        let found = repo.find_by_reference(reference("ZZ9PZA")).await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(id));
        assert!(
            repo.find_by_reference(reference("ZZ9PZB"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_report_reference_existence_consistently() {
        let repo = setup().await;
        repo.create(test_booking("TAKEN1")).await.unwrap();

        for _ in 0..3 {
            assert!(repo.reference_exists(reference("TAKEN1")).await.unwrap());
            assert!(!repo.reference_exists(reference("FREE01")).await.unwrap());
        }
    }

    #[tokio::test]
    async fn should_free_reference_when_booking_deleted() {
        let repo = setup().await;
        let booking = test_booking("GONE00");
        let id = booking.id;
        repo.create(booking).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(!repo.reference_exists(reference("GONE00")).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_reference_with_conflict() {
        let repo = setup().await;
        repo.create(test_booking("DUPE99")).await.unwrap();

        let result = repo.create(test_booking("DUPE99")).await;

        match result {
            Err(SalonBookError::Conflict(ConflictError { field, value, .. })) => {
                assert_eq!(field, "reference");
                assert_eq!(value, "DUPE99");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_list_bookings_for_barber_in_date_order() {
        let repo = setup().await;
        let barber_id = BarberId::new();
        let mut later = test_booking("LATE01");
        later.barber_id = barber_id;
        later.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut earlier = test_booking("EARL01");
        earlier.barber_id = barber_id;
        repo.create(later).await.unwrap();
        repo.create(earlier).await.unwrap();
        repo.create(test_booking("OTHER1")).await.unwrap();

        let references: Vec<String> = repo
            .find_by_barber(barber_id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.reference.to_string())
            .collect();
        assert_eq!(references, ["EARL01", "LATE01"]);
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_persist_status_update() {
        let repo = setup().await;
        let mut booking = test_booking("STAT01");
        let id = booking.id;
        repo.create(booking.clone()).await.unwrap();

        booking.transition_to(BookingStatus::Confirmed).unwrap();
        booking.time = None;
        repo.update(booking).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.status, BookingStatus::Confirmed);
        assert!(fetched.time.is_none());
    }

    struct SameEveryTime(BookingReference);

    impl CandidateSource for SameEveryTime {
        fn next_candidate(&self) -> BookingReference {
            self.0
        }
    }

    fn new_booking() -> NewBooking {
        NewBooking {
            barber_id: BarberId::new(),
            offering_id: OfferingId::new(),
            customer_name: "Jo Bloggs".to_string(),
            customer_phone: "07700 900123".to_string(),
            date: "2024-05-17".to_string(),
            time: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn should_reject_second_commit_when_allocations_race() {
        let repo = setup().await;
        let allocator = ReferenceAllocator::new(SameEveryTime(reference("RACE00")), 1);

        // Both checks run before either booking is written.
        let namespace = BookingNamespace(&repo);
        let first = allocator.allocate(&namespace).await.unwrap();
        let second = allocator.allocate(&namespace).await.unwrap();
        assert_eq!(first, second);

        repo.create(test_booking(first.as_str())).await.unwrap();
        let result = repo.create(test_booking(second.as_str())).await;

        assert!(matches!(result, Err(SalonBookError::Conflict(_))));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn should_exhaust_when_only_candidate_is_already_committed() {
        let repo = setup().await;
        let service = BookingService::with_allocator(
            repo,
            ReferenceAllocator::new(SameEveryTime(reference("ONLY01")), 3),
        );

        service.create_booking(new_booking()).await.unwrap();
        let result = service.create_booking(new_booking()).await;

        assert!(matches!(
            result,
            Err(SalonBookError::ReferenceExhausted(_))
        ));
    }

    #[tokio::test]
    async fn should_allocate_distinct_references_against_sqlite() {
        let repo = setup().await;
        let service = BookingService::new(repo);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..25 {
            let booking = service.create_booking(new_booking()).await.unwrap();
            assert!(seen.insert(booking.reference));
        }
    }
}
