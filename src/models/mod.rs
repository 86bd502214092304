pub mod booking;
pub mod seat;

pub use booking::{
    BoardingResult, Booking, GenerateSequenceRequest, GenerateSequenceResponse,
    InvalidBookingRecord, InvalidReason, NormalizedBooking, SequenceEntry,
};
pub use seat::SeatLabel;
