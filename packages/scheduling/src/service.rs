//! Appointments API service, wired to the query cache and the local event
//! channel.

use std::sync::Arc;

use bayline_cache::{QueryCache, QueryKey};
use bayline_client::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::{AppointmentEvent, AppointmentsChannel};
use crate::reconcile::upsert_appointment;
use crate::transaction::RescheduleTransaction;
use crate::types::{Appointment, CalendarFilter};

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(rename = "vehicleId")]
    pub vehicle_id: String,
    #[serde(rename = "technicianId", skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    #[serde(rename = "bayId", skip_serializing_if = "Option::is_none")]
    pub bay_id: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct RescheduleRequest {
    #[serde(rename = "startTime")]
    start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AssignmentRequest<'a> {
    #[serde(rename = "technicianId", skip_serializing_if = "Option::is_none")]
    technician_id: Option<&'a str>,
    #[serde(rename = "bayId", skip_serializing_if = "Option::is_none")]
    bay_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AutoScheduleRequest<'a> {
    #[serde(rename = "vehicleId")]
    vehicle_id: &'a str,
    #[serde(rename = "durationMinutes")]
    duration_minutes: u32,
}

/// Reschedule, assignment, and auto-schedule responses wrap the
/// appointment in a `{message, appointment}` envelope; create and book
/// return the appointment bare.
#[derive(Debug, Deserialize)]
struct AppointmentMutationResponse {
    message: String,
    appointment: Appointment,
}

/// Appointment operations over the shared client. Mutations patch the
/// cache and publish on the local channel once the server confirms.
#[derive(Clone)]
pub struct AppointmentsService {
    client: ApiClient,
    cache: Arc<QueryCache>,
    channel: AppointmentsChannel,
}

impl AppointmentsService {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>, channel: AppointmentsChannel) -> Self {
        Self {
            client,
            cache,
            channel,
        }
    }

    pub fn channel(&self) -> &AppointmentsChannel {
        &self.channel
    }

    pub async fn list(&self) -> ApiResult<Vec<Appointment>> {
        let key = QueryKey::appointments();
        let guard = self.cache.begin_fetch(&key);
        let appointments: Vec<Appointment> = self.client.get("/appointments").await?;
        if let Err(e) = self.cache.commit_fetch(guard, &appointments) {
            tracing::warn!("Failed to cache appointment list: {}", e);
        }
        Ok(appointments)
    }

    /// Calendar view for a technician/day filter. The result is cached
    /// under a key specific to the filter.
    pub async fn calendar(&self, filter: &CalendarFilter) -> ApiResult<Vec<Appointment>> {
        let key = QueryKey::appointments_calendar(
            filter.technician_id.as_deref(),
            filter.day.as_deref(),
        );
        let guard = self.cache.begin_fetch(&key);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(technician_id) = &filter.technician_id {
            query.push(("technicianId", technician_id.clone()));
        }
        if let Some(day) = &filter.day {
            query.push(("day", day.clone()));
        }
        let appointments: Vec<Appointment> = self
            .client
            .get_with_query("/appointments/calendar", &query)
            .await?;
        if let Err(e) = self.cache.commit_fetch(guard, &appointments) {
            tracing::warn!("Failed to cache calendar view: {}", e);
        }
        Ok(appointments)
    }

    pub async fn create(
        &self,
        request: &AppointmentRequest,
        filter: &CalendarFilter,
    ) -> ApiResult<Appointment> {
        let appointment: Appointment = self.client.post("/appointments", request).await?;
        self.absorb(&appointment, filter);
        self.channel
            .publish(&AppointmentEvent::Created(appointment.clone()));
        Ok(appointment)
    }

    /// Public self-service booking. Same payload, different endpoint and
    /// no authentication requirement server-side.
    pub async fn book(&self, request: &AppointmentRequest) -> ApiResult<Appointment> {
        let appointment: Appointment = self.client.post("/appointments/book", request).await?;
        self.channel
            .publish(&AppointmentEvent::Created(appointment.clone()));
        Ok(appointment)
    }

    /// Move an appointment to a new slot, optimistically. The predicted
    /// times are visible in both cache views while the request is in
    /// flight; on failure the views are restored and the error surfaced.
    pub async fn reschedule(
        &self,
        appointment: &Appointment,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
        filter: &CalendarFilter,
    ) -> ApiResult<Appointment> {
        let calendar_key = QueryKey::appointments_calendar(
            filter.technician_id.as_deref(),
            filter.day.as_deref(),
        );
        let tx = RescheduleTransaction::begin(
            &self.cache,
            calendar_key,
            filter.clone(),
            appointment,
            new_start,
            new_end,
        );

        let result: ApiResult<AppointmentMutationResponse> = self
            .client
            .put(
                &format!("/appointments/{}/reschedule", appointment.id),
                &RescheduleRequest {
                    start_time: new_start,
                    end_time: new_end,
                },
            )
            .await;

        match result {
            Ok(response) => {
                tracing::debug!("{}", response.message);
                let confirmed = response.appointment;
                tx.commit(&confirmed);
                self.channel
                    .publish(&AppointmentEvent::Updated(confirmed.clone()));
                Ok(confirmed)
            }
            Err(e) => {
                tx.rollback();
                Err(e)
            }
        }
    }

    pub async fn assign(
        &self,
        appointment_id: &str,
        technician_id: Option<&str>,
        bay_id: Option<&str>,
        filter: &CalendarFilter,
    ) -> ApiResult<Appointment> {
        let response: AppointmentMutationResponse = self
            .client
            .put(
                &format!("/appointments/{}/assignment", appointment_id),
                &AssignmentRequest {
                    technician_id,
                    bay_id,
                },
            )
            .await?;
        tracing::debug!("{}", response.message);
        let appointment = response.appointment;
        self.absorb(&appointment, filter);
        self.channel
            .publish(&AppointmentEvent::Updated(appointment.clone()));
        Ok(appointment)
    }

    /// Ask the server to pick the next free slot for a vehicle.
    pub async fn auto_schedule(
        &self,
        vehicle_id: &str,
        duration_minutes: u32,
    ) -> ApiResult<Appointment> {
        let response: AppointmentMutationResponse = self
            .client
            .post(
                "/appointments/auto-schedule",
                &AutoScheduleRequest {
                    vehicle_id,
                    duration_minutes,
                },
            )
            .await?;
        tracing::debug!("{}", response.message);
        let appointment = response.appointment;
        self.channel
            .publish(&AppointmentEvent::Created(appointment.clone()));
        Ok(appointment)
    }

    fn absorb(&self, appointment: &Appointment, filter: &CalendarFilter) {
        let calendar_key = QueryKey::appointments_calendar(
            filter.technician_id.as_deref(),
            filter.day.as_deref(),
        );
        upsert_appointment(
            &self.cache,
            &QueryKey::appointments(),
            &calendar_key,
            filter,
            appointment,
        );
    }
}
