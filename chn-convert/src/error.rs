use std::{ffi::OsStr, path::PathBuf};

use thiserror::Error;

pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Не удалось открыть отчёт
    #[error("Unable to open {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Не удалось создать выходной файл
    #[error("Unable to create output file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Записанный файл не совпал с записью в памяти
    #[error("Verification failed: {0}")]
    Verify(String),

    /// Ошибка разбора отчёта или формата CHN
    #[error(transparent)]
    Chn(#[from] chn_types::ChnError),
}

/// Строка диагностики для stderr: `argv[0]` без изменений, затем сообщение.
pub fn format_diagnostic<S: AsRef<OsStr>>(
    argv0: Option<S>,
    err: &ConvertError,
) -> String {
    let progname = argv0
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    format!("{progname}: {err}")
}
