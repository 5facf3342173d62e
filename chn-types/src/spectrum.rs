use crate::{ChnError, ChnResult, CHN_SPECTRUM_SIZE};

/// Накопитель каналов спектра.
///
/// Буфер всегда содержит ровно [`CHN_SPECTRUM_SIZE`] значений; `filled` это
/// курсор следующего канала. Живёт в пределах одной конвертации.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spectrum {
    counts: Vec<i32>,
    filled: usize,
}

impl Spectrum {
    /// Создаёт обнулённый спектр.
    pub fn new() -> ChnResult<Self> {
        let mut counts = Vec::new();

        counts
            .try_reserve_exact(CHN_SPECTRUM_SIZE)
            .map_err(|e| ChnError::Allocation(e.to_string()))?;
        counts.resize(CHN_SPECTRUM_SIZE, 0);

        Ok(Self { counts, filled: 0 })
    }

    /// Спектр из готовых значений (например, прочитанных из файла).
    pub fn from_counts(counts: Vec<i32>) -> ChnResult<Self> {
        if counts.len() != CHN_SPECTRUM_SIZE {
            return Err(ChnError::format_violation(format!(
                "spectrum must hold {CHN_SPECTRUM_SIZE} channels, got {}",
                counts.len()
            )));
        }

        Ok(Self {
            counts,
            filled: CHN_SPECTRUM_SIZE,
        })
    }

    /// Дописывает значение в следующий канал.
    pub fn push(
        &mut self,
        count: i32,
    ) -> ChnResult<()> {
        if self.filled >= CHN_SPECTRUM_SIZE {
            return Err(ChnError::SpectrumOverflow {
                capacity: CHN_SPECTRUM_SIZE,
            });
        }

        self.counts[self.filled] = count;
        self.filled += 1;

        Ok(())
    }

    /// Количество заполненных каналов.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == CHN_SPECTRUM_SIZE
    }

    /// Все каналы, включая незаполненные (нули).
    pub fn counts(&self) -> &[i32] {
        &self.counts
    }

    /// Сумма отсчётов по всем каналам.
    pub fn total_counts(&self) -> i64 {
        self.counts.iter().map(|&c| c as i64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spectrum_is_zeroed() {
        let s = Spectrum::new().unwrap();

        assert_eq!(s.counts().len(), CHN_SPECTRUM_SIZE);
        assert!(s.counts().iter().all(|&c| c == 0));
        assert_eq!(s.filled(), 0);
    }

    #[test]
    fn test_push_until_overflow() {
        let mut s = Spectrum::new().unwrap();

        for i in 0..CHN_SPECTRUM_SIZE {
            s.push(i as i32).unwrap();
        }
        assert!(s.is_full());
        assert_eq!(s.counts()[8191], 8191);

        let err = s.push(1).unwrap_err();
        assert!(matches!(err, ChnError::SpectrumOverflow { capacity: 8192 }));
        assert_eq!(s.filled(), CHN_SPECTRUM_SIZE);
    }

    #[test]
    fn test_from_counts_checks_length() {
        assert!(Spectrum::from_counts(vec![0; 10]).is_err());

        let s = Spectrum::from_counts(vec![2; CHN_SPECTRUM_SIZE]).unwrap();
        assert_eq!(s.total_counts(), 2 * CHN_SPECTRUM_SIZE as i64);
    }
}
