use std::path::PathBuf;

/// Имя отчёта, который по умолчанию оставляет программа набора.
pub const DEFAULT_INPUT: &str = "CAN_REP.$$$";

/// Имя выходного спектра по умолчанию.
pub const DEFAULT_OUTPUT: &str = "SP_BUFF.$$$";

/// Полная конфигурация одной конвертации.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Путь к текстовому отчёту
    pub input_path: PathBuf,
    /// Путь к выходному CHN файлу
    pub output_path: PathBuf,
    /// Описание детектора для футера (до 63 байт)
    pub detector_description: Option<String>,
    /// Описание образца для футера (до 63 байт)
    pub sample_description: Option<String>,
    /// Перечитать записанный файл и сверить с записью в памяти
    pub verify: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            detector_description: None,
            sample_description: None,
            verify: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let cfg = ConvertConfig::default();

        assert_eq!(cfg.input_path, PathBuf::from("CAN_REP.$$$"));
        assert_eq!(cfg.output_path, PathBuf::from("SP_BUFF.$$$"));
        assert!(cfg.detector_description.is_none());
        assert!(!cfg.verify);
    }
}
