use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Бронирование в том виде, в каком оно приходит от клиента:
/// идентификатор и строка мест через запятую (`"A1,B2"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "string_or_number")]
    pub booking_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub seats: String,
}

impl Booking {
    pub fn new(booking_id: impl Into<String>, seats: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
            seats: seats.into(),
        }
    }
}

// Строки из таблиц иногда приходят числами: 1001 вместо "1001"
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Бронирование после разбора мест, с выбранным ближайшим местом.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBooking {
    pub booking_id: String,
    pub closest_seat: String,
    pub seat_number: u64,
    pub valid_seats: Vec<String>,
    pub invalid_seats: Vec<String>,
    pub original_seats: String,
}

/// Почему бронирование не попало в очередь посадки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    #[serde(rename = "all seats invalid")]
    AllSeatsInvalid,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::AllSeatsInvalid => write!(f, "all seats invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidBookingRecord {
    pub booking_id: String,
    pub seats: String,
    pub reason: InvalidReason,
    pub invalid_seats: Vec<String>,
}

/// Одна позиция в очереди посадки; `seq` начинается с 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntry {
    pub seq: usize,
    pub booking_id: String,
    pub closest_seat: String,
    pub original_seats: String,
    pub valid_seats: Vec<String>,
    pub invalid_seats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingResult {
    pub sequence: Vec<SequenceEntry>,
    pub invalid_bookings: Vec<InvalidBookingRecord>,
    pub total_valid_bookings: usize,
    pub total_invalid_bookings: usize,
}

/// Тело запроса ручного ввода: `{ "bookings": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateSequenceRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub bookings: Vec<Booking>,
}

/// Ответ API: результат плюс флаг успеха и общее число входных бронирований.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSequenceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: BoardingResult,
    pub total_bookings: usize,
}

impl GenerateSequenceResponse {
    pub fn new(result: BoardingResult, total_bookings: usize) -> Self {
        Self {
            success: true,
            result,
            total_bookings,
        }
    }
}
