//! normalizer.rs
//!
//! Разбор одного бронирования: строка мест делится по запятым,
//! места делятся на валидные и невалидные, выбирается ближайшее к входу.
//! Ошибки отдельного бронирования моделируются данными (`Normalized::Invalid`),
//! а не через `Result`, чтобы одно плохое бронирование не прерывало пакет.

use tracing::debug;

use crate::models::{
    seat::SeatLabel, Booking, InvalidBookingRecord, InvalidReason, NormalizedBooking,
};

/// Итог разбора одного бронирования.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Valid(NormalizedBooking),
    Invalid(InvalidBookingRecord),
}

/// Делит строку мест по запятым и обрезает пробелы.
/// Пустые куски остаются: они невалидны и попадают в `invalid_seats`.
pub fn split_seats(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

pub fn normalize(booking: &Booking) -> Normalized {
    let mut valid: Vec<SeatLabel> = Vec::new();
    let mut invalid_seats: Vec<String> = Vec::new();

    for label in split_seats(&booking.seats) {
        match SeatLabel::parse(label) {
            Some(seat) => valid.push(seat),
            None => invalid_seats.push(label.to_string()),
        }
    }

    // min_by_key возвращает первый минимум, значит при равенстве побеждает более раннее место
    let Some(closest) = valid.iter().min_by_key(|s| s.distance) else {
        debug!(booking_id = %booking.booking_id, seats = %booking.seats, "booking has no valid seats");
        return Normalized::Invalid(InvalidBookingRecord {
            booking_id: booking.booking_id.clone(),
            seats: booking.seats.clone(),
            reason: InvalidReason::AllSeatsInvalid,
            invalid_seats,
        });
    };

    Normalized::Valid(NormalizedBooking {
        booking_id: booking.booking_id.clone(),
        closest_seat: closest.label.clone(),
        seat_number: closest.distance,
        valid_seats: valid.iter().map(|s| s.label.clone()).collect(),
        invalid_seats,
        original_seats: booking.seats.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(n: Normalized) -> NormalizedBooking {
        match n {
            Normalized::Valid(b) => b,
            Normalized::Invalid(r) => panic!("expected valid booking, got {r:?}"),
        }
    }

    fn invalid(n: Normalized) -> InvalidBookingRecord {
        match n {
            Normalized::Invalid(r) => r,
            Normalized::Valid(b) => panic!("expected invalid booking, got {b:?}"),
        }
    }

    #[test]
    fn picks_seat_with_smallest_number() {
        let b = valid(normalize(&Booking::new("1", "B12,A3,C100")));
        assert_eq!(b.closest_seat, "A3");
        assert_eq!(b.seat_number, 3);
        assert_eq!(b.valid_seats, vec!["B12", "A3", "C100"]);
        assert!(b.invalid_seats.is_empty());
    }

    #[test]
    fn mixed_validity_keeps_invalid_seats_for_display() {
        let b = valid(normalize(&Booking::new("X1", "A5, foo, B2")));
        assert_eq!(b.valid_seats, vec!["A5", "B2"]);
        assert_eq!(b.invalid_seats, vec!["foo"]);
        assert_eq!(b.closest_seat, "B2");
        assert_eq!(b.original_seats, "A5, foo, B2");
    }

    #[test]
    fn first_seat_wins_on_equal_numbers() {
        let b = valid(normalize(&Booking::new("1", "C4,A4,4B")));
        assert_eq!(b.closest_seat, "C4");
    }

    #[test]
    fn all_invalid_seats_produce_invalid_record() {
        let r = invalid(normalize(&Booking::new("Y1", "foo,bar")));
        assert_eq!(r.reason, InvalidReason::AllSeatsInvalid);
        assert_eq!(r.seats, "foo,bar");
        assert_eq!(r.invalid_seats, vec!["foo", "bar"]);
    }

    #[test]
    fn empty_pieces_are_reported_as_invalid_seats() {
        let b = valid(normalize(&Booking::new("1", "A1, ,B2")));
        assert_eq!(b.valid_seats, vec!["A1", "B2"]);
        assert_eq!(b.invalid_seats, vec![""]);

        let r = invalid(normalize(&Booking::new("2", "foo,")));
        assert_eq!(r.invalid_seats, vec!["foo", ""]);
    }

    #[test]
    fn empty_seat_string_is_invalid() {
        let r = invalid(normalize(&Booking::new("E", "")));
        assert_eq!(r.reason, InvalidReason::AllSeatsInvalid);
        assert_eq!(r.invalid_seats, vec![""]);

        let r = invalid(normalize(&Booking::new("E", " , ,")));
        assert_eq!(r.invalid_seats, vec!["", "", ""]);
    }

    #[test]
    fn overlong_seat_number_still_boards() {
        let b = valid(normalize(&Booking::new("Z", "A99999999999999999999999")));
        assert_eq!(b.closest_seat, "A99999999999999999999999");
        assert_eq!(b.seat_number, u64::MAX);

        let b = valid(normalize(&Booking::new("Z", "A99999999999999999999999,B9")));
        assert_eq!(b.closest_seat, "B9");
    }
}
