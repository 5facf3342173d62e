use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use byteorder::{ReadBytesExt, WriteBytesExt};
use log::debug;
use tempfile::NamedTempFile;

use crate::{
    error::{ChnError, ChnResult},
    format::{ChnByteOrder, ChnFooterExt, ChnHeaderExt},
    ChnFooter, ChnHeader, ChnRecord, Spectrum, CHN_FILE_SIZE, CHN_FOOTER_SIZE, CHN_HEADER_SIZE,
    CHN_SPECTRUM_SIZE,
};

/// Писатель CHN записи в поток.
pub struct ChnWriter<W: Write> {
    writer: BufWriter<W>,
    bytes_written: u64,
}

/// Читатель CHN записи из потока.
pub struct ChnReader<R: Read> {
    reader: BufReader<R>,
}

impl<W: Write> ChnWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            bytes_written: 0,
        }
    }

    /// Пишет заголовок, 8192 канала и футер, строго в этом порядке.
    pub fn write_record(
        &mut self,
        record: &ChnRecord,
    ) -> ChnResult<()> {
        self.writer.write_all(&record.header.serialize()?)?;

        for &count in record.spectrum.counts() {
            self.writer.write_i32::<ChnByteOrder>(count)?;
        }

        self.writer.write_all(&record.footer.serialize()?)?;
        self.bytes_written += CHN_FILE_SIZE as u64;

        Ok(())
    }

    /// Сбрасывает буфер и возвращает внутренний поток.
    pub fn finish(mut self) -> ChnResult<W> {
        self.writer.flush()?;

        self.writer
            .into_inner()
            .map_err(|e| ChnError::Io(e.into_error()))
    }

    /// Количество байт, отданных в поток.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl<R: Read> ChnReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Читает и проверяет одну запись.
    ///
    /// Файл должен содержать ровно одну запись: лишние байты после футера
    /// считаются нарушением формата.
    pub fn read_record(&mut self) -> ChnResult<ChnRecord> {
        let mut hdr_buf = [0u8; CHN_HEADER_SIZE];
        self.reader.read_exact(&mut hdr_buf)?;
        let header = ChnHeader::deserialize(&hdr_buf)?;

        if header.channel_count as usize != CHN_SPECTRUM_SIZE {
            return Err(ChnError::format_violation(format!(
                "channel_count={} (expected {CHN_SPECTRUM_SIZE})",
                header.channel_count
            )));
        }

        let mut counts = vec![0i32; CHN_SPECTRUM_SIZE];
        self.reader.read_i32_into::<ChnByteOrder>(&mut counts)?;

        let mut ftr_buf = [0u8; CHN_FOOTER_SIZE];
        self.reader.read_exact(&mut ftr_buf)?;
        let footer = ChnFooter::deserialize(&ftr_buf)?;

        let mut trailing = [0u8; 1];
        if self.reader.read(&mut trailing)? != 0 {
            return Err(ChnError::format_violation("trailing data after footer"));
        }

        Ok(ChnRecord::new(header, Spectrum::from_counts(counts)?, footer))
    }
}

/// Записывает CHN файл через временный файл в том же каталоге.
///
/// Назначение заменяется только после успешной записи и `fsync`; при ошибке
/// временный файл удаляется, а прежнее содержимое `path` не трогается.
/// Возвращает количество записанных байт.
pub fn write_chn_file<P: AsRef<Path>>(
    path: P,
    record: &ChnRecord,
) -> ChnResult<u64> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    debug!("writing {:?} via {:?}", path, tmp.path());

    let mut writer = ChnWriter::new(tmp.as_file_mut());
    writer.write_record(record)?;
    let written = writer.bytes_written();
    writer.finish()?;

    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ChnError::Io(e.error))?;

    Ok(written)
}

/// Читает CHN файл целиком.
pub fn read_chn_file<P: AsRef<Path>>(path: P) -> ChnResult<ChnRecord> {
    let file = File::open(path)?;

    ChnReader::new(file).read_record()
}
