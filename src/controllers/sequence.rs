//! sequence.rs
//!
//! HTTP-обработчики генерации очереди посадки:
//! - ручной ввод (JSON-массив бронирований);
//! - загрузка файла (multipart, поле `file`);
//! - экспорт очереди в табличный текст.

use axum::{
    extract::{multipart::Multipart, rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{Booking, GenerateSequenceRequest, GenerateSequenceResponse};
use crate::services::{export, sequence, upload};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-sequence", post(generate_from_file))
        .route("/generate-sequence-manual", post(generate_from_json))
        .route("/export", post(export_sequence))
}

/* ---------- helpers ---------- */

// Пустой или битый список бронирований - ошибка клиента, ядро не вызывается
fn accept_bookings(
    payload: Result<Json<GenerateSequenceRequest>, JsonRejection>,
) -> Result<Vec<Booking>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Unreadable booking payload: {}", rejection.body_text());
        ApiError::InvalidBookingData
    })?;

    req.validate().map_err(|_| ApiError::InvalidBookingData)?;
    Ok(req.bookings)
}

fn respond(bookings: &[Booking]) -> Json<GenerateSequenceResponse> {
    let result = sequence::generate(bookings);
    Json(GenerateSequenceResponse::new(result, bookings.len()))
}

/* ---------- SEQUENCE ---------- */

// POST /api/generate-sequence-manual
async fn generate_from_json(
    payload: Result<Json<GenerateSequenceRequest>, JsonRejection>,
) -> Result<Json<GenerateSequenceResponse>, ApiError> {
    let bookings = accept_bookings(payload)?;
    info!("Generating sequence for {} bookings (manual input)", bookings.len());
    Ok(respond(&bookings))
}

// POST /api/generate-sequence
async fn generate_from_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<GenerateSequenceResponse>, ApiError> {
    let malformed = |e: axum::extract::multipart::MultipartError| ApiError::MalformedFile(e.body_text());

    let mut data = None;
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some("file") {
            continue;
        }
        info!("Receiving upload {:?}", field.file_name().unwrap_or("<unnamed>"));
        data = Some(field.bytes().await.map_err(malformed)?);
        break;
    }
    let data = data.ok_or(ApiError::NoFileUploaded)?;

    let max_bytes = state.config.upload.max_bytes;
    if data.len() > max_bytes {
        return Err(ApiError::MalformedFile(format!(
            "file exceeds {} bytes",
            max_bytes
        )));
    }

    // Файловый ввод-вывод синхронный, уводим его с рантайма
    let temp_dir = state.config.upload.temp_dir.clone();
    let bookings =
        tokio::task::spawn_blocking(move || upload::read_bookings(&temp_dir, &data)).await??;

    if bookings.is_empty() {
        return Err(ApiError::NoBookingRows);
    }

    info!("Generating sequence for {} bookings (file upload)", bookings.len());
    Ok(respond(&bookings))
}

// POST /api/export
async fn export_sequence(
    payload: Result<Json<GenerateSequenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = accept_bookings(payload)?;
    let result = sequence::generate(&bookings);

    Ok((
        [
            (header::CONTENT_TYPE, "text/tab-separated-values; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::EXPORT_FILE_NAME),
            ),
        ],
        export::to_tsv(&result.sequence),
    ))
}
