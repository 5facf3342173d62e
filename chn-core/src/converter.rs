use std::io::BufRead;

use log::{debug, info, warn};

use crate::{
    acquisition::{parse_acquisition_date, reconstruct_start, AcquisitionDate},
    clock::Clock,
    error::ChnResult,
    report::{parse_channels, parse_livetime, parse_realtime, strip_tag, trim_line},
    ChnFooter, ChnHeader, ChnRecord, Spectrum,
};

/// Номер физической строки отчёта с датой старта
pub const DATE_LINE: usize = 0;
/// Номер физической строки с живым временем
pub const LIVETIME_LINE: usize = 1;
/// Номер физической строки с реальным временем
pub const REALTIME_LINE: usize = 2;

/// Статистика, накопленная [`ReportParser`] за один проход.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    /// Всего прочитано физических строк (включая пустые).
    pub lines_read: usize,
    /// Пропущено пустых строк.
    pub blank_lines: usize,
    /// Строк со значениями каналов.
    pub channel_lines: usize,
    /// Дата старта восстановлена от часов.
    pub date_reconstructed: bool,
}

/// Построчный разборщик отчёта в запись CHN.
///
/// Диспетчеризация идёт по номеру физической строки: пустые строки
/// пропускаются, но номер всё равно увеличивается. Строки 0, 1 и 2 это
/// дата, живое и реальное время; всё остальное это каналы.
///
/// Состояние (заголовок, курсор спектра, результат разбора даты) живёт
/// ровно одну конвертацию.
pub struct ReportParser<C: Clock> {
    clock: C,
    header: ChnHeader,
    spectrum: Spectrum,
    date: Option<AcquisitionDate>,
    line_index: usize,
    stats: ParseStats,
}

impl<C: Clock> ReportParser<C> {
    pub fn new(clock: C) -> ChnResult<Self> {
        Ok(Self {
            clock,
            header: ChnHeader::new(),
            spectrum: Spectrum::new()?,
            date: None,
            line_index: 0,
            stats: ParseStats::default(),
        })
    }

    /// Обрабатывает очередную физическую строку отчёта.
    pub fn feed_line(
        &mut self,
        raw: &[u8],
    ) -> ChnResult<()> {
        let index = self.line_index;
        self.line_index += 1;
        self.stats.lines_read += 1;

        let line = trim_line(raw);
        if line.is_empty() {
            self.stats.blank_lines += 1;
            debug!("line {index}: blank, skipped");
            return Ok(());
        }

        match index {
            DATE_LINE => self.on_date(line),
            LIVETIME_LINE => self.on_livetime(line),
            REALTIME_LINE => self.on_realtime(line),
            _ => self.on_channels(index, line),
        }
    }

    /// Читает весь отчёт из `reader`.
    ///
    /// Строки не декодируются: метки могут быть в любой однобайтовой
    /// кодировке, а поля даты адресуются по байтовым позициям.
    pub fn feed_reader<R: BufRead>(
        &mut self,
        reader: R,
    ) -> ChnResult<()> {
        for raw in reader.split(b'\n') {
            self.feed_line(&raw?)?;
        }

        Ok(())
    }

    pub fn header(&self) -> &ChnHeader {
        &self.header
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Завершает разбор и собирает запись с пустым футером.
    pub fn finish(self) -> ChnRecord {
        info!(
            "Report parsed: lines={} blank={} channels={} total_counts={}",
            self.stats.lines_read,
            self.stats.blank_lines,
            self.spectrum.filled(),
            self.spectrum.total_counts(),
        );

        ChnRecord::new(self.header, self.spectrum, ChnFooter::new())
    }

    fn on_date(
        &mut self,
        line: &[u8],
    ) -> ChnResult<()> {
        let payload = strip_tag(line)?;
        let date = parse_acquisition_date(payload)?;

        match date {
            AcquisitionDate::Parsed(stamp) => {
                stamp.apply(&mut self.header);
                debug!("acquisition date: '{}'", String::from_utf8_lossy(payload));
            }
            AcquisitionDate::Deferred => {
                debug!(
                    "acquisition date '{}' unreadable, deferred to realtime",
                    String::from_utf8_lossy(payload)
                );
            }
        }

        self.date = Some(date);
        Ok(())
    }

    fn on_livetime(
        &mut self,
        line: &[u8],
    ) -> ChnResult<()> {
        self.header.livetime = parse_livetime(strip_tag(line)?)?;
        debug!("livetime: {} ticks", self.header.livetime);
        Ok(())
    }

    fn on_realtime(
        &mut self,
        line: &[u8],
    ) -> ChnResult<()> {
        let realtime = parse_realtime(strip_tag(line)?)?;
        realtime.apply(&mut self.header);
        debug!("realtime: {} ticks", realtime.ticks);

        // Восстановление возможно только после того, как известно время набора
        if self.date == Some(AcquisitionDate::Deferred) {
            let stamp = reconstruct_start(&self.clock, realtime.elapsed_secs as i64)?;
            stamp.apply(&mut self.header);
            self.stats.date_reconstructed = true;

            warn!(
                "Acquisition date missing in report, using now - {}s: {} {}",
                realtime.elapsed_secs,
                String::from_utf8_lossy(&stamp.date),
                String::from_utf8_lossy(&stamp.time),
            );
        }

        Ok(())
    }

    fn on_channels(
        &mut self,
        index: usize,
        line: &[u8],
    ) -> ChnResult<()> {
        let appended = parse_channels(&mut self.spectrum, strip_tag(line)?)?;
        self.stats.channel_lines += 1;
        debug!(
            "line {index}: {appended} channels (total {})",
            self.spectrum.filled()
        );
        Ok(())
    }
}

/// Конвертирует отчёт целиком в запись CHN.
pub fn convert_report<R: BufRead, C: Clock>(
    reader: R,
    clock: C,
) -> ChnResult<ChnRecord> {
    let mut parser = ReportParser::new(clock)?;

    parser.feed_reader(reader)?;

    Ok(parser.finish())
}
