use crate::backend::{BookingBackend, NewAppointment};
use crate::error::BookingError;
use crate::opening_hours::{describe_status, is_open_at, OpenStatus};
use crate::slots::{classify_slots, slot_date_time, SlotAvailability};
use crate::types::{Appointment, OpeningHours};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Handle for one booked-slot fetch. Applying a ticket whose epoch no
/// longer matches the session is a no-op, so a slow response for a
/// previously selected date can never overwrite fresher data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    date: NaiveDate,
    epoch: u64,
}

impl FetchTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// State of one booking or reschedule screen for a single business:
/// selected date and slot, the booked slots reported for that date, and
/// the submission guard. Selecting a slot is purely local; the backend is
/// contacted when fetching booked slots and on final submission.
pub struct BookingSession<T: BookingBackend> {
    backend: T,
    business_id: Uuid,
    opening_hours: Option<OpeningHours>,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<String>,
    booked_slots: Vec<String>,
    fetch_epoch: u64,
    submitting: AtomicBool,
}

/// Holds the submit flag for the duration of one submission. Clearing on
/// drop keeps the session usable when the caller abandons an in-flight
/// `book`/`reschedule`/`cancel` future before it completes.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, BookingError> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(BookingError::SubmissionInFlight);
        }
        Ok(Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<T: BookingBackend> BookingSession<T> {
    pub fn new(backend: T, business_id: Uuid, opening_hours: Option<OpeningHours>) -> Self {
        Self {
            backend,
            business_id,
            opening_hours,
            selected_date: None,
            selected_slot: None,
            booked_slots: Vec::new(),
            fetch_epoch: 0,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn booked_slots(&self) -> &[String] {
        &self.booked_slots
    }

    /// Open/closed badge for the business-detail header.
    pub fn status_at(&self, date_time: NaiveDateTime) -> OpenStatus {
        describe_status(date_time, self.opening_hours.as_ref())
    }

    /// Switches the candidate date. Clears the chosen slot and the booked
    /// list and invalidates any fetch still in flight for the old date.
    pub fn select_date(&mut self, date: NaiveDate) -> FetchTicket {
        self.selected_date = Some(date);
        self.selected_slot = None;
        self.booked_slots.clear();
        self.fetch_epoch += 1;
        FetchTicket {
            date,
            epoch: self.fetch_epoch,
        }
    }

    /// Stores a fetched booked-slot list. Returns false (and changes
    /// nothing) when the ticket is stale.
    pub fn apply_booked_slots(&mut self, ticket: FetchTicket, slots: Vec<String>) -> bool {
        if ticket.epoch != self.fetch_epoch {
            debug!(date = %ticket.date, "discarding stale booked-slot response");
            return false;
        }
        self.booked_slots = slots;
        true
    }

    /// Fetches and stores the booked slots for the ticket's date.
    pub async fn refresh_booked_slots(&mut self, ticket: FetchTicket) -> Result<bool, BookingError> {
        let slots = self
            .backend
            .booked_slots(self.business_id, ticket.date)
            .await
            .map_err(BookingError::Backend)?;
        Ok(self.apply_booked_slots(ticket, slots))
    }

    /// Classification of every candidate slot for the selected date, or
    /// empty when no date is selected yet.
    pub fn slot_availability(&self) -> Vec<SlotAvailability> {
        match self.selected_date {
            Some(date) => classify_slots(self.opening_hours.as_ref(), date, &self.booked_slots),
            None => Vec::new(),
        }
    }

    /// Local state transition only; rejects slots that are not currently
    /// selectable.
    pub fn select_slot(&mut self, slot: &str) -> Result<(), BookingError> {
        let date = self.selected_date.ok_or(BookingError::MissingSelection)?;
        self.validate(date, slot)?;
        self.selected_slot = Some(slot.to_string());
        Ok(())
    }

    fn validate(&self, date: NaiveDate, slot: &str) -> Result<NaiveDateTime, BookingError> {
        let date_time = slot_date_time(date, slot).ok_or(BookingError::MissingSelection)?;
        if !is_open_at(date_time, self.opening_hours.as_ref()) {
            let status = describe_status(date_time, self.opening_hours.as_ref());
            return Err(BookingError::ClosedAtTime(status.message));
        }
        if self.booked_slots.iter().any(|booked| booked == slot) {
            return Err(BookingError::SlotTaken(slot.to_string()));
        }
        Ok(date_time)
    }

    /// Re-runs the eligibility check against the current selection right
    /// before submission. The server still has the authoritative say;
    /// this only avoids requests that are locally known to fail.
    fn validate_selection(&self) -> Result<NaiveDateTime, BookingError> {
        let date = self.selected_date.ok_or(BookingError::MissingSelection)?;
        let slot = self
            .selected_slot
            .as_deref()
            .ok_or(BookingError::MissingSelection)?;
        self.validate(date, slot)
    }

    pub async fn book(
        &self,
        user_id: Uuid,
        service_id: Uuid,
        notes: String,
    ) -> Result<Appointment, BookingError> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        let date_time = self.validate_selection()?;
        debug!(business_id = %self.business_id, %date_time, "submitting booking");
        let request = NewAppointment {
            user_id,
            business_id: self.business_id,
            service_id,
            date_time,
            notes,
        };
        self.backend
            .create_appointment(request)
            .await
            .map_err(BookingError::Backend)
    }

    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), BookingError> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        let date_time = self.validate_selection()?;
        debug!(%appointment_id, %date_time, "submitting reschedule");
        self.backend
            .reschedule_appointment(appointment_id, date_time, user_id)
            .await
            .map_err(BookingError::Backend)
    }

    pub async fn cancel(&self, appointment_id: Uuid, user_id: Uuid) -> Result<(), BookingError> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        debug!(%appointment_id, "submitting cancellation");
        self.backend
            .cancel_appointment(appointment_id, user_id)
            .await
            .map_err(BookingError::Backend)
    }
}
