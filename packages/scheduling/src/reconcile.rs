//! Keeping the list and calendar caches consistent with each other.
//!
//! The list cache holds every appointment; each calendar cache entry holds
//! only the slice matching its filter. An upsert therefore always touches
//! the list, but touches the calendar only when the appointment belongs in
//! the filtered view.

use bayline_cache::{QueryCache, QueryKey};

use crate::types::{Appointment, CalendarFilter};

fn upsert_into(list: &mut Vec<Appointment>, appointment: &Appointment) {
    match list.iter_mut().find(|a| a.id == appointment.id) {
        Some(existing) => *existing = appointment.clone(),
        None => list.push(appointment.clone()),
    }
}

/// Write an appointment into both cache views. The list entry is patched
/// unconditionally; the calendar entry only when the appointment matches
/// the active filter, so a reassigned or moved appointment does not leak
/// into a view it no longer belongs to.
pub fn upsert_appointment(
    cache: &QueryCache,
    list_key: &QueryKey,
    calendar_key: &QueryKey,
    filter: &CalendarFilter,
    appointment: &Appointment,
) {
    cache.update::<Vec<Appointment>>(list_key, |mut list| {
        upsert_into(&mut list, appointment);
        list
    });

    if filter.matches(appointment) {
        cache.update::<Vec<Appointment>>(calendar_key, |mut list| {
            upsert_into(&mut list, appointment);
            list
        });
    }
}
