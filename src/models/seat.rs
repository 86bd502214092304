use regex::Regex;
use std::sync::LazyLock;

// Буквы+цифры ("A1") или цифры+буквы ("12B"), целиком
static SEAT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]+[0-9]+|[0-9]+[A-Za-z]+)$").unwrap());

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Проверяет, что метка места имеет допустимый вид (`A1`, `12B`).
/// Пробелы по краям игнорируются.
pub fn is_valid_label(label: &str) -> bool {
    SEAT_LABEL_RE.is_match(label.trim())
}

/// Расстояние места от передней двери: первая группа цифр в метке.
///
/// `None` только если цифр нет вовсе. Слишком длинное число
/// упирается в `u64::MAX`, место остаётся в игре.
pub fn distance(label: &str) -> Option<u64> {
    DIGIT_RUN_RE
        .find(label)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

/// Метка места вместе с её расстоянием от входа.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLabel {
    pub label: String,
    pub distance: u64,
}

impl SeatLabel {
    /// Разбирает метку; возвращает `None` для невалидной.
    /// У валидной метки всегда есть группа цифр, поэтому расстояние определено.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.trim();
        if !is_valid_label(label) {
            return None;
        }
        Some(Self {
            label: label.to_string(),
            distance: distance(label)?,
        })
    }
}
