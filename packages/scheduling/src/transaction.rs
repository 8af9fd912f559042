//! The optimistic reschedule transaction.
//!
//! Rescheduling is the one flow that writes predicted state into the cache
//! before the server confirms, so it is the one flow that must be able to
//! undo itself. The transaction cancels in-flight fetches for both cache
//! views (a racing refetch must not overwrite the prediction), snapshots
//! both entries, applies the predicted times, and then either commits the
//! server-confirmed appointment or restores the snapshots.

use bayline_cache::{QueryCache, QueryKey};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::reconcile::upsert_appointment;
use crate::types::{Appointment, CalendarFilter};

pub struct RescheduleTransaction<'a> {
    cache: &'a QueryCache,
    list_key: QueryKey,
    calendar_key: QueryKey,
    filter: CalendarFilter,
    list_snapshot: Option<Value>,
    calendar_snapshot: Option<Value>,
}

impl<'a> RescheduleTransaction<'a> {
    /// Cancel in-flight fetches, snapshot both views, and write the
    /// predicted start/end for the appointment into them.
    pub fn begin(
        cache: &'a QueryCache,
        calendar_key: QueryKey,
        filter: CalendarFilter,
        appointment: &Appointment,
        predicted_start: DateTime<Utc>,
        predicted_end: DateTime<Utc>,
    ) -> Self {
        let list_key = QueryKey::appointments();
        cache.cancel(&list_key);
        cache.cancel(&calendar_key);

        let list_snapshot = cache.snapshot(&list_key);
        let calendar_snapshot = cache.snapshot(&calendar_key);

        let mut predicted = appointment.clone();
        predicted.start_time = predicted_start;
        predicted.end_time = predicted_end;
        upsert_appointment(cache, &list_key, &calendar_key, &filter, &predicted);

        Self {
            cache,
            list_key,
            calendar_key,
            filter,
            list_snapshot,
            calendar_snapshot,
        }
    }

    /// Reconcile with the server-confirmed appointment and mark the
    /// calendar view for refetch.
    pub fn commit(self, confirmed: &Appointment) {
        upsert_appointment(
            self.cache,
            &self.list_key,
            &self.calendar_key,
            &self.filter,
            confirmed,
        );
        self.cache.invalidate(&self.calendar_key);
    }

    /// Put both views back exactly as they were before the prediction.
    pub fn rollback(self) {
        tracing::debug!("Rolling back optimistic reschedule");
        self.cache.restore(&self.list_key, self.list_snapshot);
        self.cache.restore(&self.calendar_key, self.calendar_snapshot);
    }
}
