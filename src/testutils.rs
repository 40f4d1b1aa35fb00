use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::backend::{BookingBackend, NewAppointment};
use crate::types::{Appointment, AppointmentStatus};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    /// When set, submission calls never resolve, like a request stuck on a
    /// dead network.
    pub hang: AtomicBool,
    pub calls_to_booked_slots: AtomicU64,
    pub calls_to_create_appointment: AtomicU64,
    pub calls_to_reschedule_appointment: AtomicU64,
    pub calls_to_cancel_appointment: AtomicU64,
    pub booked_slots: Mutex<Vec<String>>,
    pub last_create: Mutex<Option<NewAppointment>>,
    pub last_reschedule: Mutex<Option<(Uuid, NaiveDateTime, Uuid)>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner {
            success: AtomicBool::new(true),
            hang: AtomicBool::new(false),
            calls_to_booked_slots: AtomicU64::default(),
            calls_to_create_appointment: AtomicU64::default(),
            calls_to_reschedule_appointment: AtomicU64::default(),
            calls_to_cancel_appointment: AtomicU64::default(),
            booked_slots: Mutex::default(),
            last_create: Mutex::default(),
            last_reschedule: Mutex::default(),
        }))
    }

    fn result(&self) -> Result<(), String> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err("Supposed to fail".into()),
        }
    }

    async fn hang_if_requested(&self) {
        if self.0.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl BookingBackend for MockBookingBackend {
    async fn booked_slots(
        &self,
        _business_id: Uuid,
        _date: NaiveDate,
    ) -> Result<Vec<String>, String> {
        self.0.calls_to_booked_slots.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.booked_slots.lock().unwrap().clone())
    }

    async fn create_appointment(&self, request: NewAppointment) -> Result<Appointment, String> {
        self.0
            .calls_to_create_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.hang_if_requested().await;
        self.result()?;
        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            business_id: request.business_id,
            service_id: request.service_id,
            date_time: request.date_time,
            status: AppointmentStatus::Pending,
            notes: request.notes.clone(),
        };
        *self.0.last_create.lock().unwrap() = Some(request);
        Ok(appointment)
    }

    async fn reschedule_appointment(
        &self,
        appointment_id: Uuid,
        new_date_time: NaiveDateTime,
        user_id: Uuid,
    ) -> Result<(), String> {
        self.0
            .calls_to_reschedule_appointment
            .fetch_add(1, Ordering::SeqCst);
        *self.0.last_reschedule.lock().unwrap() = Some((appointment_id, new_date_time, user_id));
        self.hang_if_requested().await;
        self.result()
    }

    async fn cancel_appointment(&self, _appointment_id: Uuid, _user_id: Uuid) -> Result<(), String> {
        self.0
            .calls_to_cancel_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.hang_if_requested().await;
        self.result()
    }
}
