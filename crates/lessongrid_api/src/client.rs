// --- File: crates/lessongrid_api/src/client.rs ---
//! The `reqwest` implementation of [`BookingApi`].

use crate::error::ApiError;
use crate::models::{
    ActionResponse, AdminBookingListResponse, AdminBookingRecord, BookSlotRequest,
    BookingListResponse, BookingRecord, WeekBooking, WeekBookingsResponse,
};
use crate::service::{BookingApi, BoxFuture};
use chrono::{DateTime, SecondsFormat, Utc};
use lessongrid_common::http::client::{create_client, HTTP_CLIENT};
use lessongrid_config::ApiConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client against the booking server's JSON API.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    base_url: String,
    client: Client,
}

impl HttpBookingApi {
    /// A client over the shared default HTTP client.
    pub fn new(base_url: impl Into<String>) -> HttpBookingApi {
        HttpBookingApi {
            base_url: normalize(base_url.into()),
            client: HTTP_CLIENT.clone(),
        }
    }

    /// A client configured from `AppConfig.api` (base URL and timeout).
    pub fn from_config(config: &ApiConfig) -> Result<HttpBookingApi, ApiError> {
        Ok(HttpBookingApi {
            base_url: normalize(config.base_url.clone()),
            client: create_client(config.timeout_secs)?,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "booking API returned an error status");
            return Err(ApiError::StatusError(status));
        }
        Ok(response.json::<T>().await?)
    }

    /// POST with an optional JSON body, expecting the `{success, error?}`
    /// envelope.
    async fn post_action(
        &self,
        path: &str,
        body: Option<&BookSlotRequest>,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let request = self.client.post(&url);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        // The server pairs 4xx statuses with a JSON error envelope; read the
        // body before giving up on the status so the user sees its message.
        let envelope: ActionResponse = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(ApiError::StatusError(status)),
            Err(err) => return Err(ApiError::RequestError(err)),
        };
        accept(envelope.success, envelope.error)
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn accept(success: bool, error: Option<String>) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected(
            error.unwrap_or_else(|| "Request failed".to_string()),
        ))
    }
}

impl BookingApi for HttpBookingApi {
    fn week_bookings(&self, week_start: DateTime<Utc>) -> BoxFuture<'_, Vec<WeekBooking>, ApiError> {
        Box::pin(async move {
            let path = format!(
                "/api/calendar/bookings?week_start={}",
                week_start.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
            let envelope: WeekBookingsResponse = self.get_envelope(&path).await?;
            accept(envelope.success, envelope.error)?;
            Ok(envelope.bookings)
        })
    }

    fn book_slot(&self, request: BookSlotRequest) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move { self.post_action("/api/book-slot", Some(&request)).await })
    }

    fn student_bookings(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError> {
        Box::pin(async move {
            let envelope: BookingListResponse = self.get_envelope("/api/student/bookings").await?;
            accept(envelope.success, envelope.error)?;
            Ok(envelope.bookings)
        })
    }

    fn student_history(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError> {
        Box::pin(async move {
            let envelope: BookingListResponse = self.get_envelope("/api/student/history").await?;
            accept(envelope.success, envelope.error)?;
            Ok(envelope.bookings)
        })
    }

    fn cancel_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move {
            self.post_action(&format!("/student/bookings/{id}/cancel"), None)
                .await
        })
    }

    fn pending_bookings(&self) -> BoxFuture<'_, Vec<AdminBookingRecord>, ApiError> {
        Box::pin(async move {
            let envelope: AdminBookingListResponse =
                self.get_envelope("/api/admin/bookings?status=pending").await?;
            accept(envelope.success, envelope.error)?;
            Ok(envelope.bookings)
        })
    }

    fn approve_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move {
            self.post_action(&format!("/admin/bookings/{id}/approve"), None)
                .await
        })
    }

    fn deny_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move {
            self.post_action(&format!("/admin/bookings/{id}/deny"), None)
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpBookingApi::new("http://localhost:5000/");
        assert_eq!(
            api.url("/api/book-slot"),
            "http://localhost:5000/api/book-slot"
        );
        let api = HttpBookingApi::new("http://localhost:5000");
        assert_eq!(
            api.url("/api/student/bookings"),
            "http://localhost:5000/api/student/bookings"
        );
    }

    #[test]
    fn rejection_surfaces_the_server_message_verbatim() {
        let err = accept(false, Some("This time slot is already booked".into())).unwrap_err();
        assert_eq!(err.user_message(), "This time slot is already booked");
        let err = accept(false, None).unwrap_err();
        assert_eq!(err.user_message(), "Request failed");
        assert!(accept(true, None).is_ok());
    }

    #[test]
    fn week_query_uses_z_suffixed_rfc3339() {
        let week_start = chrono::NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        let rendered = week_start.to_rfc3339_opts(SecondsFormat::Secs, true);
        assert_eq!(rendered, "2024-06-03T00:00:00Z");
    }
}
