use crate::{ChnError, ChnResult};

/// Размер футера CHN файла (512 байт)
pub const CHN_FOOTER_SIZE: usize = 512;

/// Максимальная длина строки описания в футере
pub const CHN_DESCRIPTION_MAX: usize = 63;

/// Размер зарезервированной области после калибровок
pub const CHN_FOOTER_RESERVED2: usize = 228;

/// Размер зарезервированной области в конце футера
pub const CHN_FOOTER_RESERVED3: usize = 128;

/// Калибровочный полином `a + b*x + c*x^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calibration {
    pub zero: f32,
    pub slope: f32,
    pub quadratic: f32,
}

/// Футер CHN файла (фиксированный размер 512 байт)
///
/// ```text
/// [0..2]     signature         i16
/// [2..4]     reserved          i16
/// [4..16]    energy            3 x f32
/// [16..28]   peak_shape        3 x f32
/// [28..256]  reserved          228 байт
/// [256]      det_desc_len      u8
/// [257..320] det_desc          63 байта
/// [320]      samp_desc_len     u8
/// [321..384] samp_desc         63 байта
/// [384..512] reserved          128 байт
/// ```
///
/// Конвертер ничего не выводит в футер из отчёта: по умолчанию все поля
/// нулевые, но раскладка пишется целиком.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChnFooter {
    /// Сигнатура футера (конвертер оставляет 0)
    pub signature: i16,
    /// Калибровка по энергии
    pub energy: Calibration,
    /// Калибровка формы пика (FWHM)
    pub peak_shape: Calibration,
    detector_description: Vec<u8>,
    sample_description: Vec<u8>,
}

impl ChnFooter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Описание детектора (без заполнителя).
    pub fn detector_description(&self) -> &[u8] {
        &self.detector_description
    }

    /// Описание образца (без заполнителя).
    pub fn sample_description(&self) -> &[u8] {
        &self.sample_description
    }

    pub fn set_detector_description<B: Into<Vec<u8>>>(
        &mut self,
        desc: B,
    ) -> ChnResult<()> {
        self.detector_description = checked_description(desc.into())?;
        Ok(())
    }

    pub fn set_sample_description<B: Into<Vec<u8>>>(
        &mut self,
        desc: B,
    ) -> ChnResult<()> {
        self.sample_description = checked_description(desc.into())?;
        Ok(())
    }
}

fn checked_description(desc: Vec<u8>) -> ChnResult<Vec<u8>> {
    if desc.len() > CHN_DESCRIPTION_MAX {
        return Err(ChnError::DescriptionTooLong {
            len: desc.len(),
            max: CHN_DESCRIPTION_MAX,
        });
    }

    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_footer_is_zero() {
        let f = ChnFooter::new();

        assert_eq!(f.signature, 0);
        assert_eq!(f.energy, Calibration::default());
        assert!(f.detector_description().is_empty());
        assert!(f.sample_description().is_empty());
    }

    #[test]
    fn test_description_limit() {
        let mut f = ChnFooter::new();

        f.set_detector_description("HPGe 40%").unwrap();
        assert_eq!(f.detector_description(), b"HPGe 40%");

        f.set_sample_description(vec![b'x'; 63]).unwrap();

        let err = f.set_sample_description(vec![b'x'; 64]).unwrap_err();
        assert!(matches!(
            err,
            ChnError::DescriptionTooLong { len: 64, max: 63 }
        ));
        // Старое значение не затёрто
        assert_eq!(f.sample_description().len(), 63);
    }
}
