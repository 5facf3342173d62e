//! Конвертер отчётов Canberra в формат CHN
//!
//! Эталонная реализация разбора текстового отчёта о наборе спектра и записи
//! его в бинарный формат CHN (заголовок + 8192 канала + футер).
//!
//! # Быстрый старт
//!
//! ```no_run
//! use std::{fs::File, io::BufReader};
//!
//! use chn_core::{convert_report, write_chn_file, SystemClock};
//!
//! let report = BufReader::new(File::open("CAN_REP.$$$")?);
//! let record = convert_report(report, SystemClock)?;
//! write_chn_file("SP_BUFF.$$$", &record)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod acquisition;
pub mod binary;
pub mod clock;
pub mod converter;
pub mod format;
pub mod report;
pub mod scan;
pub mod serialization;

pub use acquisition::*;
pub use chn_types::*;
pub use clock::*;
pub use converter::*;
pub use format::*;
pub use report::*;
pub use serialization::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
