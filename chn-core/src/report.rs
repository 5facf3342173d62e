//! Интерпретаторы строк текстового отчёта.
//!
//! Каждая строка отчёта имеет вид `метка: значение`; значимо только то, что
//! стоит после первого двоеточия.

use crate::{
    error::{ChnError, ChnResult},
    scan::{leading_float, IntScanner},
    ChnHeader, Spectrum, CHN_TICKS_PER_SECOND,
};

/// Символы, срезаемые по краям строки и значения.
pub const TRIM_CHARS: &[u8] = b" \t\r\n";

/// Разобранное реальное время.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Realtime {
    /// Значение для заголовка (тики по 20 мс)
    pub ticks: i32,
    /// Целые секунды без масштабирования (для восстановления даты старта)
    pub elapsed_secs: i32,
}

/// Обрезает пробелы, табуляции и переводы строк с обеих сторон.
///
/// Работает с сырыми байтами: метки в отчёте бывают в однобайтовой
/// кодировке, а позиции полей даты считаются в байтах.
pub fn trim_line(raw: &[u8]) -> &[u8] {
    trim_start(trim_end(raw))
}

/// Возвращает значение после первого `:`, без ведущих пробелов.
pub fn strip_tag(line: &[u8]) -> ChnResult<&[u8]> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| ChnError::missing_tag(String::from_utf8_lossy(line)))?;

    Ok(trim_start(&line[colon + 1..]))
}

/// Живое время: секунды × 50, с отбрасыванием дробной части.
pub fn parse_livetime(payload: &[u8]) -> ChnResult<i32> {
    if payload.is_empty() {
        return Err(ChnError::MissingField("Livetime"));
    }

    Ok(seconds_to_ticks(read_seconds(payload)))
}

/// Реальное время: секунды × 50 для заголовка и целые секунды для fallback.
pub fn parse_realtime(payload: &[u8]) -> ChnResult<Realtime> {
    if payload.is_empty() {
        return Err(ChnError::MissingField("Realtime"));
    }

    let secs = read_seconds(payload);

    Ok(Realtime {
        ticks: seconds_to_ticks(secs),
        elapsed_secs: secs as i32,
    })
}

impl Realtime {
    pub fn apply(
        &self,
        header: &mut ChnHeader,
    ) {
        header.realtime = self.ticks;
    }
}

/// Дописывает значения каналов из строки в спектр.
///
/// Возвращает количество добавленных каналов. Переполнение спектра
/// прерывает разбор с [`ChnError::SpectrumOverflow`].
pub fn parse_channels(
    spectrum: &mut Spectrum,
    payload: &[u8],
) -> ChnResult<usize> {
    let mut appended = 0;

    for count in IntScanner::new(payload) {
        spectrum.push(count)?;
        appended += 1;
    }

    Ok(appended)
}

// Нечитаемое значение даёт 0, как при неудачном потоковом чтении
fn read_seconds(payload: &[u8]) -> f32 {
    leading_float(payload).unwrap_or(0.0)
}

fn seconds_to_ticks(secs: f32) -> i32 {
    (secs * CHN_TICKS_PER_SECOND) as i32
}

fn trim_start(b: &[u8]) -> &[u8] {
    let n = b.iter().take_while(|&c| TRIM_CHARS.contains(c)).count();
    &b[n..]
}

fn trim_end(b: &[u8]) -> &[u8] {
    let n = b.iter().rev().take_while(|&c| TRIM_CHARS.contains(c)).count();
    &b[..b.len() - n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHN_SPECTRUM_SIZE;

    #[test]
    fn test_strip_tag() {
        assert_eq!(strip_tag(b"Start: 30.03.2011 09:24:45").unwrap(), b"30.03.2011 09:24:45");
        assert_eq!(strip_tag(b"Live time:\t 10.0").unwrap(), b"10.0");
        assert_eq!(strip_tag(b"Empty:").unwrap(), b"");
        assert_eq!(strip_tag(b":42").unwrap(), b"42");
    }

    #[test]
    fn test_strip_tag_only_first_colon() {
        assert_eq!(
            strip_tag(b"Acquisition start: 30.03.2011 09:24:45").unwrap(),
            b"30.03.2011 09:24:45"
        );
    }

    #[test]
    fn test_strip_tag_missing() {
        let err = strip_tag(b"no tag here").unwrap_err();

        assert!(matches!(err, ChnError::MissingTag { ref line } if line == "no tag here"));
    }

    #[test]
    fn test_strip_tag_keeps_raw_bytes() {
        assert_eq!(
            strip_tag(b"\xC4\xE0\xF2\xE0: 3\xC0.03").unwrap(),
            b"3\xC0.03"
        );
    }

    #[test]
    fn test_trim_line() {
        assert_eq!(trim_line(b"  \tLive: 1\r\n"), b"Live: 1");
        assert_eq!(trim_line(b" \r\n"), b"");
    }

    #[test]
    fn test_livetime_scaling() {
        assert_eq!(parse_livetime(b"10.0").unwrap(), 500);
        assert_eq!(parse_livetime(b"0.019").unwrap(), 0);
        assert_eq!(parse_livetime(b"1.03 s").unwrap(), 51);
        assert_eq!(parse_livetime(b"n/a").unwrap(), 0);
    }

    #[test]
    fn test_livetime_missing() {
        let err = parse_livetime(b"").unwrap_err();

        assert_eq!(err.to_string(), "Livetime not found");
    }

    #[test]
    fn test_realtime_zero() {
        let rt = parse_realtime(b"0").unwrap();

        assert_eq!(rt, Realtime { ticks: 0, elapsed_secs: 0 });
    }

    #[test]
    fn test_realtime_truncation() {
        let rt = parse_realtime(b"3600.5").unwrap();

        assert_eq!(rt.elapsed_secs, 3600);
        assert_eq!(rt.ticks, 180_025);

        let mut header = ChnHeader::new();
        rt.apply(&mut header);
        assert_eq!(header.realtime, 180_025);
    }

    #[test]
    fn test_realtime_missing() {
        let err = parse_realtime(b"").unwrap_err();

        assert_eq!(err.to_string(), "Realtime not found");
    }

    #[test]
    fn test_channels_append_across_lines() {
        let mut s = Spectrum::new().unwrap();

        assert_eq!(parse_channels(&mut s, b"1 2 3").unwrap(), 3);
        assert_eq!(parse_channels(&mut s, b"4\t5").unwrap(), 2);

        assert_eq!(&s.counts()[..6], &[1, 2, 3, 4, 5, 0]);
        assert_eq!(s.filled(), 5);
    }

    #[test]
    fn test_channels_non_numeric_line() {
        let mut s = Spectrum::new().unwrap();

        assert_eq!(parse_channels(&mut s, b"").unwrap(), 0);
        assert_eq!(parse_channels(&mut s, b"counts follow").unwrap(), 0);
        assert_eq!(s.filled(), 0);
    }

    #[test]
    fn test_channels_overflow() {
        let mut s = Spectrum::new().unwrap();
        let line = vec!["1"; CHN_SPECTRUM_SIZE].join(" ");

        assert_eq!(parse_channels(&mut s, line.as_bytes()).unwrap(), CHN_SPECTRUM_SIZE);

        let err = parse_channels(&mut s, b"7").unwrap_err();
        assert!(matches!(err, ChnError::SpectrumOverflow { .. }));
    }
}
