use std::{path::PathBuf, time::Instant};

use chn_core::{ChnRecord, ParseStats, CHN_TICKS_PER_SECOND};

/// Итог одной конвертации для вывода / тестирования.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub duration_secs: f64,
    pub lines_read: usize,
    pub blank_lines: usize,
    pub channel_lines: usize,
    pub channels_filled: usize,
    pub total_counts: i64,
    pub livetime_secs: f64,
    pub realtime_secs: f64,
    pub start: String,
    pub date_reconstructed: bool,
    pub bytes_written: u64,
}

impl ConversionSummary {
    pub fn new(
        record: &ChnRecord,
        stats: &ParseStats,
        output_path: PathBuf,
        bytes_written: u64,
        started: &Instant,
    ) -> Self {
        let h = &record.header;

        Self {
            output_path,
            duration_secs: started.elapsed().as_secs_f64(),
            lines_read: stats.lines_read,
            blank_lines: stats.blank_lines,
            channel_lines: stats.channel_lines,
            channels_filled: record.spectrum.filled(),
            total_counts: record.spectrum.total_counts(),
            livetime_secs: h.livetime as f64 / CHN_TICKS_PER_SECOND as f64,
            realtime_secs: h.realtime as f64 / CHN_TICKS_PER_SECOND as f64,
            start: format!(
                "{} {}",
                String::from_utf8_lossy(&h.start_date),
                String::from_utf8_lossy(&h.start_time)
            ),
            date_reconstructed: stats.date_reconstructed,
            bytes_written,
        }
    }

    /// Доля живого времени (0.0-100.0); 0 если реальное время нулевое.
    pub fn live_fraction_pct(&self) -> f64 {
        if self.realtime_secs <= 0.0 {
            0.0
        } else {
            self.livetime_secs / self.realtime_secs * 100.0
        }
    }
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Output        : {:?}", self.output_path)?;
        writeln!(
            f,
            "  Start         : {}{}",
            self.start,
            if self.date_reconstructed { " (from clock)" } else { "" }
        )?;
        writeln!(
            f,
            "  Live / real   : {:.2}s / {:.2}s ({:.1}%)",
            self.livetime_secs,
            self.realtime_secs,
            self.live_fraction_pct()
        )?;
        writeln!(
            f,
            "  Lines         : {} ({} blank, {} channel)",
            self.lines_read, self.blank_lines, self.channel_lines
        )?;
        writeln!(f, "  Channels      : {}", self.channels_filled)?;
        writeln!(f, "  Total counts  : {}", self.total_counts)?;
        writeln!(f, "  Bytes written : {}", self.bytes_written)?;
        writeln!(f, "  Duration      : {:.3}s", self.duration_secs)?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}
