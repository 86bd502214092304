use crate::models::SequenceEntry;

pub const EXPORT_HEADER: &str = "Seq\tBooking_ID\tClosest_Seat";
pub const EXPORT_FILE_NAME: &str = "boarding_sequence.csv";

/// Табличный экспорт очереди: заголовок и по строке на позицию, в порядке очереди.
pub fn to_tsv(sequence: &[SequenceEntry]) -> String {
    std::iter::once(EXPORT_HEADER.to_string())
        .chain(
            sequence
                .iter()
                .map(|e| format!("{}\t{}\t{}", e.seq, e.booking_id, e.closest_seat)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}
