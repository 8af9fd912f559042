//! Appointment scheduling: the calendar view filter, list/calendar cache
//! reconciliation, the optimistic reschedule transaction, the local event
//! channel, and the backend service.

pub mod channel;
pub mod reconcile;
pub mod service;
pub mod transaction;
pub mod types;

pub use channel::{AppointmentEvent, AppointmentsChannel, SubscriberId};
pub use reconcile::upsert_appointment;
pub use service::{AppointmentRequest, AppointmentsService};
pub use transaction::RescheduleTransaction;
pub use types::{Appointment, AppointmentStatus, CalendarFilter};
