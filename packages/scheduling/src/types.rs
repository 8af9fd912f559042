use bayline_core::day_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(rename = "vehicleId", default)]
    pub vehicle_id: Option<String>,
    #[serde(rename = "technicianId", default)]
    pub technician_id: Option<String>,
    #[serde(rename = "bayId", default)]
    pub bay_id: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The calendar view's active filter. Both halves are optional; an empty
/// filter matches every appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarFilter {
    pub technician_id: Option<String>,
    /// Calendar day as a `yyyy-MM-dd` string.
    pub day: Option<String>,
}

impl CalendarFilter {
    pub fn new(technician_id: Option<&str>, day: Option<&str>) -> Self {
        Self {
            technician_id: technician_id.map(str::to_string),
            day: day.map(str::to_string),
        }
    }

    /// Whether an appointment belongs in the calendar view this filter
    /// describes. Day membership is a string compare on the start time's
    /// calendar-day key.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(technician_id) = &self.technician_id {
            if appointment.technician_id.as_deref() != Some(technician_id.as_str()) {
                return false;
            }
        }
        if let Some(day) = &self.day {
            if &day_key(appointment.start_time) != day {
                return false;
            }
        }
        true
    }
}
