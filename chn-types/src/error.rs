use thiserror::Error;

/// Результат для операций CHN
pub type ChnResult<T> = std::result::Result<T, ChnError>;

/// Типы ошибок разбора отчёта и формата CHN.
#[derive(Debug, Error)]
pub enum ChnError {
    /// В строке отчёта нет разделителя `tag:`
    #[error("strip_tags: line has no tag ({line})")]
    MissingTag { line: String },

    /// Пустое значение livetime / realtime
    #[error("{0} not found")]
    MissingField(&'static str),

    /// Каналов в отчёте больше, чем вмещает спектр
    #[error("Spectrum has more than {capacity} channels")]
    SpectrumOverflow { capacity: usize },

    /// Номер месяца вне диапазона 1..=12
    #[error("Invalid month: '{0}'")]
    InvalidMonth(String),

    /// Описание в футере не помещается в отведённое поле
    #[error("Description too long: {len} bytes, at most {max} allowed")]
    DescriptionTooLong { len: usize, max: usize },

    /// Не удалось выделить память под спектр
    #[error("Unable to allocate memory for spectrum: {0}")]
    Allocation(String),

    /// Время начала набора не представимо (fallback от часов)
    #[error("Acquisition start out of range: now - {0}s")]
    ClockOutOfRange(i64),

    /// Неверная сигнатура заголовка
    #[error("Invalid CHN signature: {found}")]
    InvalidSignature { found: i16 },

    /// Нарушение спецификации формата
    #[error("Format violation: {0}")]
    FormatViolation(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChnError {
    /// Удобные конструкторы
    pub fn missing_tag<S: Into<String>>(line: S) -> Self {
        Self::MissingTag { line: line.into() }
    }

    pub fn invalid_month<S: Into<String>>(s: S) -> Self {
        Self::InvalidMonth(s.into())
    }

    pub fn format_violation<S: Into<String>>(s: S) -> Self {
        Self::FormatViolation(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_legacy_diagnostics() {
        assert_eq!(
            ChnError::missing_tag("30.03.2011").to_string(),
            "strip_tags: line has no tag (30.03.2011)"
        );
        assert_eq!(
            ChnError::MissingField("Livetime").to_string(),
            "Livetime not found"
        );
        assert_eq!(
            ChnError::SpectrumOverflow { capacity: 8192 }.to_string(),
            "Spectrum has more than 8192 channels"
        );
    }
}
