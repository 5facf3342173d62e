//! Дата и время начала набора спектра.
//!
//! В отчёте дата записана как `DD.MM.YYYY HH:MM:SS`, в заголовке CHN как
//! `DDMMMYY*` + `HHMM`, где `*` это признак века: `1` для 2000 года и позже,
//! пробел для более ранних.

use chrono::TimeDelta;

use crate::{
    clock::Clock,
    error::{ChnError, ChnResult},
    scan::{leading_int, leading_int_prefix},
    ChnHeader, StartDate, StartTime,
};

/// Формат даты в отчёте (и при восстановлении от часов).
pub const ACQUISITION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Минимальная длина строки даты: всё до минут включительно.
pub const MIN_DATE_LEN: usize = 16;

/// Трёхбуквенные коды месяцев.
pub const MONTH_CODES: [&[u8; 3]; 12] = [
    b"JAN", b"FEB", b"MAR", b"APR", b"MAY", b"JUN", b"JUL", b"AUG", b"SEP", b"OCT", b"NOV", b"DEC",
];

/// Закодированные дата и время старта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartStamp {
    pub date: StartDate,
    pub time: StartTime,
}

/// Результат разбора строки даты.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionDate {
    /// Дата прочитана из отчёта
    Parsed(StartStamp),
    /// Дата нечитаема: восстанавливается после разбора realtime
    Deferred,
}

impl StartStamp {
    /// Записывает дату и время в заголовок.
    pub fn apply(
        &self,
        header: &mut ChnHeader,
    ) {
        header.start_date = self.date;
        header.start_time = self.time;
    }
}

/// Грубая проверка формы `DD.MM.YYYY HH:MM:SS`.
///
/// Длина не меньше 16 байт, ровно две точки, хотя бы одно двоеточие и хотя
/// бы один пробел. Позиции символов не проверяются.
pub fn is_valid_date(payload: &[u8]) -> bool {
    if payload.len() < MIN_DATE_LEN {
        return false;
    }

    let (mut period, mut colon, mut space) = (0, 0, 0);
    for &b in payload {
        match b {
            b'.' => period += 1,
            b':' => colon += 1,
            b' ' => space += 1,
            _ => {}
        }
    }

    period == 2 && colon > 0 && space > 0
}

/// Разбирает строку даты из отчёта.
///
/// Невалидная строка не является ошибкой: возвращается
/// [`AcquisitionDate::Deferred`].
pub fn parse_acquisition_date(payload: &[u8]) -> ChnResult<AcquisitionDate> {
    if !is_valid_date(payload) {
        return Ok(AcquisitionDate::Deferred);
    }

    encode_start_stamp(payload).map(AcquisitionDate::Parsed)
}

/// Кодирует `DD.MM.YYYY HH:MM:SS` без проверки формы.
///
/// День, две младшие цифры года, часы и минуты копируются побайтно из
/// входной строки; месяц переводится в код, год используется только для
/// признака века.
///
/// Месяц и год читаются из одного потока: непрочитанный хвост поля месяца
/// (`"1x"` → `"x"`) стоит перед годом, и тогда год не читается и считается
/// нулевым.
pub fn encode_start_stamp(p: &[u8]) -> ChnResult<StartStamp> {
    if p.len() < MIN_DATE_LEN {
        return Err(ChnError::format_violation(format!(
            "acquisition date too short: '{}'",
            String::from_utf8_lossy(p)
        )));
    }

    let month_field = &p[3..5];
    let (month, consumed) = leading_int_prefix(month_field)
        .and_then(|(m, len)| usize::try_from(m).ok().map(|m| (m, len)))
        .filter(|(m, _)| (1..=12).contains(m))
        .ok_or_else(|| ChnError::invalid_month(String::from_utf8_lossy(month_field)))?;

    let mut year_stream = month_field[consumed..].to_vec();
    year_stream.extend_from_slice(&p[6..10]);
    let year = leading_int(&year_stream).unwrap_or(0);

    let mut date = [0u8; 8];
    date[0..2].copy_from_slice(&p[0..2]);
    date[2..5].copy_from_slice(MONTH_CODES[month - 1]);
    date[5..7].copy_from_slice(&p[8..10]);
    date[7] = if year >= 2000 { b'1' } else { b' ' };

    let mut time = [0u8; 4];
    time[0..2].copy_from_slice(&p[11..13]);
    time[2..4].copy_from_slice(&p[14..16]);

    Ok(StartStamp { date, time })
}

/// Восстанавливает старт набора как `now - elapsed_secs`.
///
/// Разность берётся по абсолютному времени, в местное время переводится
/// уже момент старта.
pub fn reconstruct_start<C: Clock>(
    clock: &C,
    elapsed_secs: i64,
) -> ChnResult<StartStamp> {
    let start = TimeDelta::try_seconds(elapsed_secs)
        .and_then(|d| clock.now().checked_sub_signed(d))
        .ok_or(ChnError::ClockOutOfRange(elapsed_secs))?;
    let local = clock.local(start).format(ACQUISITION_DATE_FORMAT).to_string();

    encode_start_stamp(local.as_bytes())
}
