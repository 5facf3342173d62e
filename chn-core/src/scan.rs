//! Разбор чисел в стиле потокового извлечения (`stream >> value`).
//!
//! Отчёт пишется внешней программой и не всегда аккуратен: числа читаются
//! по ведущему префиксу, а чтение списка прекращается на первом месте, где
//! число прочитать нельзя.

/// Итератор по целым значениям строки каналов.
///
/// Пропускает пробельные символы, читает необязательный знак и цифры.
/// Останавливается навсегда на первом нечисловом фрагменте или значении
/// вне диапазона `i32`: `"5 x 7"` даёт только `5`, `"12-3"` даёт `12, -3`.
pub struct IntScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> IntScanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            failed: false,
        }
    }
}

impl Iterator for IntScanner<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.failed {
            return None;
        }

        let rest = &self.bytes[self.pos..];
        let skipped = rest.iter().take_while(|b| b.is_ascii_whitespace()).count();

        match leading_int_len(&rest[skipped..]) {
            Some((value, len)) => match i32::try_from(value) {
                Ok(v) => {
                    self.pos += skipped + len;
                    Some(v)
                }
                Err(_) => {
                    self.failed = true;
                    None
                }
            },
            None => {
                self.failed = true;
                None
            }
        }
    }
}

/// Ведущее целое число (после пробелов), `None` если цифр нет.
pub fn leading_int(bytes: &[u8]) -> Option<i64> {
    leading_int_prefix(bytes).map(|(v, _)| v)
}

/// Как [`leading_int`], но возвращает и число прочитанных байт (вместе с
/// пропущенными пробелами): остаток можно дочитать следующим значением.
pub fn leading_int_prefix(bytes: &[u8]) -> Option<(i64, usize)> {
    let skipped = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();

    leading_int_len(&bytes[skipped..]).map(|(v, len)| (v, skipped + len))
}

/// Ведущее число с плавающей точкой (после пробелов), `None` если цифр нет.
///
/// Формат: `[+-]digits[.digits][(e|E)[+-]digits]`, допускается `.5` и `5.`.
pub fn leading_float(bytes: &[u8]) -> Option<f32> {
    let skipped = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    let b = &bytes[skipped..];
    let mut end = 0;

    if matches!(b.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&b[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if b.get(end) == Some(&b'.') {
        frac_digits = count_digits(&b[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // Экспонента учитывается только если за ней есть цифры
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(b.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&b[exp_end.min(b.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    std::str::from_utf8(&b[..end]).ok()?.parse::<f32>().ok()
}

fn leading_int_len(b: &[u8]) -> Option<(i64, usize)> {
    let sign_len = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let digits = count_digits(&b[sign_len..]);

    if digits == 0 {
        return None;
    }

    let len = sign_len + digits;
    // Слишком длинные числа не помещаются в i64: считаем это ошибкой чтения
    std::str::from_utf8(&b[..len])
        .ok()?
        .parse::<i64>()
        .ok()
        .map(|v| (v, len))
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_whitespace_separated() {
        let v: Vec<i32> = IntScanner::new(b"1 22\t333   4").collect();

        assert_eq!(v, vec![1, 22, 333, 4]);
    }

    #[test]
    fn test_scanner_stops_on_garbage() {
        let v: Vec<i32> = IntScanner::new(b"5 x 7").collect();
        assert_eq!(v, vec![5]);

        let v: Vec<i32> = IntScanner::new(b"12abc 5").collect();
        assert_eq!(v, vec![12]);
    }

    #[test]
    fn test_scanner_adjacent_signed_values() {
        let v: Vec<i32> = IntScanner::new(b"12-3 +4").collect();

        assert_eq!(v, vec![12, -3, 4]);
    }

    #[test]
    fn test_scanner_out_of_range() {
        let v: Vec<i32> = IntScanner::new(b"1 4294967296 2").collect();

        assert_eq!(v, vec![1]);
    }

    #[test]
    fn test_scanner_empty() {
        assert_eq!(IntScanner::new(b"").count(), 0);
        assert_eq!(IntScanner::new(b"   ").count(), 0);
        assert_eq!(IntScanner::new(b"-").count(), 0);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int(b"03"), Some(3));
        assert_eq!(leading_int(b" 7."), Some(7));
        assert_eq!(leading_int(b"2011"), Some(2011));
        assert_eq!(leading_int(b".3"), None);
        assert_eq!(leading_int(b""), None);
    }

    #[test]
    fn test_leading_int_prefix_leaves_rest() {
        assert_eq!(leading_int_prefix(b"03"), Some((3, 2)));
        assert_eq!(leading_int_prefix(b"1x"), Some((1, 1)));
        assert_eq!(leading_int_prefix(b" 7 "), Some((7, 2)));
        assert_eq!(leading_int_prefix(b"x1"), None);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float(b"10.0"), Some(10.0));
        assert_eq!(leading_float(b"  3600.5 s"), Some(3600.5));
        assert_eq!(leading_float(b".5"), Some(0.5));
        assert_eq!(leading_float(b"5."), Some(5.0));
        assert_eq!(leading_float(b"1e3"), Some(1000.0));
        assert_eq!(leading_float(b"2e"), Some(2.0));
        assert_eq!(leading_float(b"-1.5"), Some(-1.5));
        assert_eq!(leading_float(b"abc"), None);
        assert_eq!(leading_float(b"."), None);
        assert_eq!(leading_float(b"7\xFF"), Some(7.0));
    }
}
