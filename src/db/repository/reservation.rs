//! Reservation Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationStatus};
use crate::utils::otp;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new reservation record
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Find a reservation by its key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let reservation: Option<Reservation> = self.base.db().select((TABLE, id)).await?;
        Ok(reservation)
    }

    /// All reservations, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Reservations whose date falls in `[start, end]` (inclusive ISO strings)
    pub async fn find_by_date_range(&self, start: &str, end: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation \
                 WHERE reservation_date >= $start AND reservation_date <= $end",
            )
            .bind(("start", start.to_string()))
            .bind(("end", end.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Number of reservations booked for a given date
    pub async fn count_by_date(&self, date: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM reservation WHERE reservation_date = $date GROUP ALL")
            .bind(("date", date.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Total number of reservations
    pub async fn count_all(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM reservation GROUP ALL")
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Party sizes across all reservations (dashboard average)
    pub async fn party_sizes(&self) -> RepoResult<Vec<i64>> {
        let sizes: Vec<i64> = self
            .base
            .db()
            .query("SELECT VALUE party_size FROM reservation")
            .await?
            .take(0)?;
        Ok(sizes)
    }

    /// Confirm a pending reservation — the whole check-and-flip runs as one
    /// conditional statement, so a concurrent resend, verify, or admin write
    /// cannot double-confirm or confirm with a stale code.
    ///
    /// Returns the confirmed record, or `None` when the code does not match,
    /// the record is no longer pending, or the code has expired.
    pub async fn confirm_pending(
        &self,
        id: &str,
        code: &str,
        now_millis: i64,
    ) -> RepoResult<Option<Reservation>> {
        let record = RecordId::from_table_key(TABLE, id);
        let updated: Vec<Reservation> = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                     status = 'confirmed', \
                     otp_verified = true, \
                     confirmed_at = $now, \
                     updated_at = $now \
                 WHERE otp_code = $code \
                   AND status = 'pending' \
                   AND otp_expires_at > $now \
                 RETURN AFTER",
            )
            .bind(("id", record))
            .bind(("code", code.to_string()))
            .bind(("now", now_millis))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Replace the OTP code and reset both its timestamps
    pub async fn refresh_otp(
        &self,
        id: &str,
        code: &str,
        now_millis: i64,
    ) -> RepoResult<Option<Reservation>> {
        let record = RecordId::from_table_key(TABLE, id);
        let updated: Vec<Reservation> = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                     otp_code = $code, \
                     otp_created_at = $now, \
                     otp_expires_at = $expires, \
                     updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("id", record))
            .bind(("code", code.to_string()))
            .bind(("now", now_millis))
            .bind(("expires", otp::expires_at(now_millis)))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Move a reservation from one status to another, conditionally on the
    /// record still holding the expected `from` status.
    pub async fn update_status_from(
        &self,
        id: &str,
        from: ReservationStatus,
        to: ReservationStatus,
        now_millis: i64,
    ) -> RepoResult<Option<Reservation>> {
        let record = RecordId::from_table_key(TABLE, id);
        let updated: Vec<Reservation> = self
            .base
            .db()
            .query(
                "UPDATE $id SET status = $to, updated_at = $now \
                 WHERE status = $from \
                 RETURN AFTER",
            )
            .bind(("id", record))
            .bind(("to", to.as_str()))
            .bind(("from", from.as_str()))
            .bind(("now", now_millis))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Hard delete; true when a record was removed
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Reservation> = self.base.db().delete((TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
