//! api_client.rs
//!
//! HTTP-клиент к сервису очереди посадки. Базовый URL передаётся при создании
//! клиента явно, глобального состояния нет: разные клиенты могут смотреть
//! на разные инстансы сервиса.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{Booking, GenerateSequenceRequest, GenerateSequenceResponse};

/// Ошибки клиента.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Сетевая ошибка или ошибка разбора ответа.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Сервис ответил ошибкой (`{ success: false, error }`).
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Ответ `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Клиент API генерации очереди.
#[derive(Clone)]
pub struct BoardingClient {
    /// Базовый URL сервиса, без завершающего `/`.
    base_url: String,
    http_client: reqwest::Client,
}

impl BoardingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Ошибочный статус превращаем в ClientError::Api с текстом из тела
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        error!("Boarding API request failed: {} {}", status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.http_client.get(self.url("/api/health")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Отправляет бронирования на `POST /api/generate-sequence-manual`.
    pub async fn generate(&self, bookings: &[Booking]) -> Result<GenerateSequenceResponse, ClientError> {
        debug!("Requesting sequence for {} bookings", bookings.len());
        let body = GenerateSequenceRequest {
            bookings: bookings.to_vec(),
        };
        let response = self
            .http_client
            .post(self.url("/api/generate-sequence-manual"))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Загружает файл на `POST /api/generate-sequence`.
    pub async fn upload(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<GenerateSequenceResponse, ClientError> {
        let part = reqwest::multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .http_client
            .post(self.url("/api/generate-sequence"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Получает табличный экспорт очереди.
    pub async fn export(&self, bookings: &[Booking]) -> Result<String, ClientError> {
        let body = GenerateSequenceRequest {
            bookings: bookings.to_vec(),
        };
        let response = self
            .http_client
            .post(self.url("/api/export"))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = BoardingClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/health"), "http://localhost:5000/api/health");
    }

    #[tokio::test]
    async fn health_reads_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "message": "Bus Boarding Sequence Generator API is running"
            })))
            .mount(&server)
            .await;

        let client = BoardingClient::new(server.uri()).unwrap();
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "OK");
    }

    #[tokio::test]
    async fn generate_posts_bookings_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-sequence-manual"))
            .and(body_json(json!({"bookings": [{"bookingId": "B2", "seats": "A1"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "sequence": [{
                    "seq": 1,
                    "bookingId": "B2",
                    "closestSeat": "A1",
                    "originalSeats": "A1",
                    "validSeats": ["A1"],
                    "invalidSeats": []
                }],
                "invalidBookings": [],
                "totalValidBookings": 1,
                "totalInvalidBookings": 0,
                "totalBookings": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BoardingClient::new(server.uri()).unwrap();
        let response = client.generate(&[Booking::new("B2", "A1")]).await.unwrap();
        assert!(response.success);
        assert_eq!(response.total_bookings, 1);
        assert_eq!(response.result.sequence[0].closest_seat, "A1");
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-sequence-manual"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "Invalid booking data"
            })))
            .mount(&server)
            .await;

        let client = BoardingClient::new(server.uri()).unwrap();
        match client.generate(&[]).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid booking data");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn export_returns_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/export"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Seq\tBooking_ID\tClosest_Seat\n1\t1\tA1"),
            )
            .mount(&server)
            .await;

        let client = BoardingClient::new(server.uri()).unwrap();
        let tsv = client.export(&[Booking::new("1", "A1")]).await.unwrap();
        assert!(tsv.starts_with("Seq\tBooking_ID\tClosest_Seat"));
    }
}
