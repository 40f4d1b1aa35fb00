use crate::backend::{BookingBackend, NewAppointment};
use crate::configuration::Configuration;
use crate::types::Appointment;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, Response};
use tracing::debug;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// HTTP implementation of [`BookingBackend`] against the LocalBook REST
/// API. The base URL is injected through [`Configuration`] instead of
/// being repeated per call site.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new<C: Configuration>(configuration: &C) -> Self {
        Self {
            client: Client::new(),
            base_url: configuration.api_base_url().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Best-effort message extraction from an error response: the body's
/// `message` field when present, else the raw body, else the status code.
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body),
        _ => format!("Request failed with status {status}"),
    }
}

#[async_trait]
impl BookingBackend for RestBackend {
    async fn booked_slots(&self, business_id: Uuid, date: NaiveDate) -> Result<Vec<String>, String> {
        debug!(%business_id, %date, "fetching booked slots");
        let response = self
            .client
            .get(self.url(&format!("/appointments/business/{business_id}/booked-slots")))
            .query(&[("date", date.format(DATE_FORMAT).to_string())])
            .send()
            .await
            .map_err(|err| err.to_string())?;
        if !response.status().is_success() {
            return Err(error_message(response).await);
        }
        response
            .json::<Vec<String>>()
            .await
            .map_err(|err| err.to_string())
    }

    async fn create_appointment(&self, request: NewAppointment) -> Result<Appointment, String> {
        debug!(business_id = %request.business_id, date_time = %request.date_time, "creating appointment");
        let response = self
            .client
            .post(self.url("/appointments"))
            .query(&[
                ("userId", request.user_id.to_string()),
                ("businessId", request.business_id.to_string()),
                ("serviceId", request.service_id.to_string()),
                (
                    "dateTime",
                    request.date_time.format(DATE_TIME_FORMAT).to_string(),
                ),
                ("notes", request.notes),
            ])
            .send()
            .await
            .map_err(|err| err.to_string())?;
        if !response.status().is_success() {
            return Err(error_message(response).await);
        }
        response
            .json::<Appointment>()
            .await
            .map_err(|err| err.to_string())
    }

    async fn reschedule_appointment(
        &self,
        appointment_id: Uuid,
        new_date_time: NaiveDateTime,
        user_id: Uuid,
    ) -> Result<(), String> {
        debug!(%appointment_id, %new_date_time, "rescheduling appointment");
        let response = self
            .client
            .put(self.url(&format!("/appointments/{appointment_id}/reschedule")))
            .query(&[
                (
                    "newDateTime",
                    new_date_time.format(DATE_TIME_FORMAT).to_string(),
                ),
                ("userId", user_id.to_string()),
            ])
            .send()
            .await
            .map_err(|err| err.to_string())?;
        if !response.status().is_success() {
            return Err(error_message(response).await);
        }
        Ok(())
    }

    async fn cancel_appointment(&self, appointment_id: Uuid, user_id: Uuid) -> Result<(), String> {
        debug!(%appointment_id, "cancelling appointment");
        let response = self
            .client
            .put(self.url(&format!("/appointments/{appointment_id}/cancel")))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await
            .map_err(|err| err.to_string())?;
        if !response.status().is_success() {
            return Err(error_message(response).await);
        }
        Ok(())
    }
}
