use crate::{ChnFooter, ChnHeader, Spectrum, CHN_FOOTER_SIZE, CHN_HEADER_SIZE, CHN_SPECTRUM_SIZE};

/// Полный размер CHN файла: заголовок + каналы + футер.
pub const CHN_FILE_SIZE: usize = CHN_HEADER_SIZE + CHN_SPECTRUM_SIZE * 4 + CHN_FOOTER_SIZE;

/// Одна спектрограмма в формате CHN: то, что пишется в файл целиком.
#[derive(Debug, Clone, PartialEq)]
pub struct ChnRecord {
    pub header: ChnHeader,
    pub spectrum: Spectrum,
    pub footer: ChnFooter,
}

impl ChnRecord {
    pub fn new(
        header: ChnHeader,
        spectrum: Spectrum,
        footer: ChnFooter,
    ) -> Self {
        Self {
            header,
            spectrum,
            footer,
        }
    }
}
