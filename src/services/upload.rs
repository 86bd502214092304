//! upload.rs
//!
//! Приём файла с бронированиями. Файл сначала сохраняется во временный
//! каталог, читается и удаляется при выходе из области видимости
//! (в том числе при ошибке разбора).

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ApiError;
use crate::models::Booking;

/// Загруженный файл во временном каталоге. Удаляется при `Drop`.
pub struct UploadedFile {
    file: NamedTempFile,
}

impl UploadedFile {
    pub fn store(dir: impl AsRef<Path>, data: &[u8]) -> Result<Self, ApiError> {
        let mut file = tempfile::Builder::new()
            .prefix("boarding-upload-")
            .suffix(".tsv")
            .tempfile_in(dir)?;
        file.write_all(data)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = data.len(), "upload spooled");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Читает содержимое как UTF-8; BOM в начале отбрасывается.
    pub fn read_text(&mut self) -> Result<String, ApiError> {
        let mut raw = Vec::new();
        let handle = self.file.as_file_mut();
        handle.seek(SeekFrom::Start(0))?;
        handle.read_to_end(&mut raw)?;

        let text = String::from_utf8(raw)
            .map_err(|_| ApiError::MalformedFile("file is not valid UTF-8 text".to_string()))?;
        Ok(text.strip_prefix('\u{feff}').map(str::to_owned).unwrap_or(text))
    }
}

/// Разбирает содержимое файла в список бронирований.
///
/// Первая строка - заголовок, пропускается. Поля разделяются табуляцией;
/// строка без табуляции делится по запятым, и всё после первого поля
/// считается списком мест. Строки меньше чем из двух полей пропускаются.
pub fn parse_booking_data(content: &str) -> Vec<Booking> {
    content
        .trim()
        .lines()
        .skip(1)
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<Booking> {
    let line = line.trim_end_matches('\r');

    if line.contains('\t') {
        let mut values = line.split('\t');
        let booking_id = values.next()?;
        let seats = values.next()?;
        return Some(Booking::new(booking_id.trim(), seats.trim()));
    }

    let (booking_id, seats) = line.split_once(',')?;
    Some(Booking::new(booking_id.trim(), seats.trim()))
}

/// Полный путь приёма: сохранить, прочитать, разобрать. Файл удаляется до возврата.
pub fn read_bookings(dir: impl AsRef<Path>, data: &[u8]) -> Result<Vec<Booking>, ApiError> {
    let mut upload = UploadedFile::store(dir, data)?;
    let content = upload.read_text()?;
    Ok(parse_booking_data(&content))
}
