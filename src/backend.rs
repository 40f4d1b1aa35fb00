use crate::types::Appointment;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub user_id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date_time: NaiveDateTime,
    pub notes: String,
}

/// The LocalBook backend as seen from the booking screens. The server owns
/// the authoritative conflict checks; these calls only report its verdict.
#[async_trait]
pub trait BookingBackend: Clone + Send + Sync + 'static {
    async fn booked_slots(&self, business_id: Uuid, date: NaiveDate) -> Result<Vec<String>, String>;
    async fn create_appointment(&self, request: NewAppointment) -> Result<Appointment, String>;
    async fn reschedule_appointment(
        &self,
        appointment_id: Uuid,
        new_date_time: NaiveDateTime,
        user_id: Uuid,
    ) -> Result<(), String>;
    async fn cancel_appointment(&self, appointment_id: Uuid, user_id: Uuid) -> Result<(), String>;
}
