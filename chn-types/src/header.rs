/// Сигнатура заголовка CHN файла.
pub const CHN_SIGNATURE: i16 = -1;

/// Размер фиксированного заголовка (32 байта)
pub const CHN_HEADER_SIZE: usize = 32;

/// Количество каналов спектра
pub const CHN_SPECTRUM_SIZE: usize = 8192;

/// Номер MCA, который пишет конвертер
pub const CHN_MCA_NUMBER: u16 = 1;

/// Номер сегмента, который пишет конвертер
pub const CHN_SEGMENT: u16 = 1;

/// Единица времени live/real полей: 1 тик = 20 мс
pub const CHN_TICKS_PER_SECOND: f32 = 50.0;

/// Дата начала набора: `DDMMMYY` + признак века (`1` для 20xx, иначе пробел).
pub type StartDate = [u8; 8];

/// Время начала набора: `HHMM`.
pub type StartTime = [u8; 4];

/// Заголовок CHN файла (фиксированный размер 32 байта)
///
/// Порядок полей повторяет раскладку на диске:
/// ```text
/// [0..2]   signature       i16
/// [2..4]   mca_number      u16
/// [4..6]   segment         u16
/// [6..8]   seconds         u16
/// [8..12]  realtime        i32 (тики)
/// [12..16] livetime        i32 (тики)
/// [16..24] start_date      DDMMMYY*
/// [24..28] start_time      HHMM
/// [28..30] channel_offset  u16
/// [30..32] channel_count   u16
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChnHeader {
    /// Сигнатура формата
    pub signature: i16,
    /// Номер MCA
    pub mca_number: u16,
    /// Номер сегмента
    pub segment: u16,
    /// Секунды времени старта (не используются, 0)
    pub seconds: u16,
    /// Реальное время набора в тиках
    pub realtime: i32,
    /// Живое время набора в тиках
    pub livetime: i32,
    /// Дата начала набора
    pub start_date: StartDate,
    /// Время начала набора
    pub start_time: StartTime,
    /// Смещение первого канала
    pub channel_offset: u16,
    /// Количество каналов
    pub channel_count: u16,
}

impl ChnHeader {
    /// Заголовок с константами конвертера и обнулёнными временными полями.
    pub fn new() -> Self {
        ChnHeader {
            signature: CHN_SIGNATURE,
            mca_number: CHN_MCA_NUMBER,
            segment: CHN_SEGMENT,
            seconds: 0,
            realtime: 0,
            livetime: 0,
            start_date: [0; 8],
            start_time: [0; 4],
            channel_offset: 0,
            channel_count: CHN_SPECTRUM_SIZE as u16,
        }
    }

    /// `true`, если дата старта уже записана интерпретатором.
    pub fn has_start_stamp(&self) -> bool {
        self.start_date != [0; 8]
    }
}

impl Default for ChnHeader {
    fn default() -> Self {
        Self::new()
    }
}
