//! sequence.rs
//!
//! Построение очереди посадки для пакета бронирований.
//!
//! Порядок: номер ближайшего места по возрастанию, затем идентификатор
//! бронирования по возрастанию (см. [`compare_booking_ids`]). Сортировка
//! стабильная, поэтому полностью равные ключи сохраняют входной порядок.

use std::cmp::Ordering;
use tracing::{debug, info};

use crate::models::{
    BoardingResult, Booking, InvalidBookingRecord, NormalizedBooking, SequenceEntry,
};
use crate::services::normalizer::{normalize, Normalized};

/// Сравнение идентификаторов бронирований.
///
/// Оба числовые (`i64`) - сравниваются как числа; числовой идёт раньше
/// нечислового; два нечисловых сравниваются лексикографически. Если числа
/// равны, но записаны по-разному ("7" и "007"), решает лексикографика,
/// так что порядок всегда полный.
pub fn compare_booking_ids(a: &str, b: &str) -> Ordering {
    let num_a = a.trim().parse::<i64>().ok();
    let num_b = b.trim().parse::<i64>().ok();

    match (num_a, num_b) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Сортирует нормализованные бронирования и присваивает позиции 1..N.
pub fn build(bookings: &[NormalizedBooking]) -> Vec<SequenceEntry> {
    let mut ordered: Vec<&NormalizedBooking> = bookings.iter().collect();
    ordered.sort_by(|a, b| {
        a.seat_number
            .cmp(&b.seat_number)
            .then_with(|| compare_booking_ids(&a.booking_id, &b.booking_id))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, b)| SequenceEntry {
            seq: index + 1,
            booking_id: b.booking_id.clone(),
            closest_seat: b.closest_seat.clone(),
            original_seats: b.original_seats.clone(),
            valid_seats: b.valid_seats.clone(),
            invalid_seats: b.invalid_seats.clone(),
        })
        .collect()
}

pub fn aggregate(
    sequence: Vec<SequenceEntry>,
    invalid_bookings: Vec<InvalidBookingRecord>,
) -> BoardingResult {
    BoardingResult {
        total_valid_bookings: sequence.len(),
        total_invalid_bookings: invalid_bookings.len(),
        sequence,
        invalid_bookings,
    }
}

/// Полный конвейер: сырые бронирования -> очередь посадки и список отклонённых.
///
/// Пустой вход даёт пустой результат; проверка на пустоту - забота вызывающего.
pub fn generate(bookings: &[Booking]) -> BoardingResult {
    let mut normalized: Vec<NormalizedBooking> = Vec::with_capacity(bookings.len());
    let mut rejected: Vec<InvalidBookingRecord> = Vec::new();

    for booking in bookings {
        match normalize(booking) {
            Normalized::Valid(b) => normalized.push(b),
            Normalized::Invalid(r) => rejected.push(r),
        }
    }

    let sequence = build(&normalized);
    debug!(sequence_len = sequence.len(), "boarding sequence built");

    let result = aggregate(sequence, rejected);
    info!(
        total = bookings.len(),
        valid = result.total_valid_bookings,
        invalid = result.total_invalid_bookings,
        "Boarding sequence generated"
    );
    result
}
