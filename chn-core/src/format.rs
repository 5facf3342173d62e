//! Раскладка формата CHN на диске.
//!
//! Файл состоит из трёх областей без промежуточного выравнивания:
//! заголовок (32 байта), 8192 канала по `i32` и футер (512 байт).
//! Все многобайтовые числа хранятся в порядке little-endian, как у
//! исходного потребителя формата.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    binary::{read_counted, skip_reserved, write_counted, write_reserved},
    error::{ChnError, ChnResult},
    Calibration, ChnFooter, ChnHeader, CHN_DESCRIPTION_MAX, CHN_FOOTER_RESERVED2,
    CHN_FOOTER_RESERVED3, CHN_FOOTER_SIZE, CHN_HEADER_SIZE, CHN_SIGNATURE,
};

/// Порядок байт формата.
pub type ChnByteOrder = LittleEndian;

/// Сериализация заголовка CHN.
pub trait ChnHeaderExt: Sized {
    /// Сериализация заголовка в 32 байта
    fn serialize(&self) -> ChnResult<[u8; CHN_HEADER_SIZE]>;

    /// Десериализация заголовка из 32 байт
    fn deserialize(buf: &[u8; CHN_HEADER_SIZE]) -> ChnResult<Self>;
}

/// Сериализация футера CHN.
pub trait ChnFooterExt: Sized {
    /// Сериализация футера в 512 байт
    fn serialize(&self) -> ChnResult<[u8; CHN_FOOTER_SIZE]>;

    /// Десериализация футера из 512 байт
    fn deserialize(buf: &[u8; CHN_FOOTER_SIZE]) -> ChnResult<Self>;
}

impl ChnHeaderExt for ChnHeader {
    fn serialize(&self) -> ChnResult<[u8; CHN_HEADER_SIZE]> {
        let mut buf = [0u8; CHN_HEADER_SIZE];
        let mut w = Cursor::new(&mut buf[..]);

        w.write_i16::<ChnByteOrder>(self.signature)?;
        w.write_u16::<ChnByteOrder>(self.mca_number)?;
        w.write_u16::<ChnByteOrder>(self.segment)?;
        w.write_u16::<ChnByteOrder>(self.seconds)?;
        w.write_i32::<ChnByteOrder>(self.realtime)?;
        w.write_i32::<ChnByteOrder>(self.livetime)?;
        w.write_all(&self.start_date)?;
        w.write_all(&self.start_time)?;
        w.write_u16::<ChnByteOrder>(self.channel_offset)?;
        w.write_u16::<ChnByteOrder>(self.channel_count)?;

        debug_assert_eq!(w.position() as usize, CHN_HEADER_SIZE);
        Ok(buf)
    }

    fn deserialize(buf: &[u8; CHN_HEADER_SIZE]) -> ChnResult<Self> {
        let mut r = &buf[..];

        let signature = r.read_i16::<ChnByteOrder>()?;
        if signature != CHN_SIGNATURE {
            return Err(ChnError::InvalidSignature { found: signature });
        }

        let mca_number = r.read_u16::<ChnByteOrder>()?;
        let segment = r.read_u16::<ChnByteOrder>()?;
        let seconds = r.read_u16::<ChnByteOrder>()?;
        let realtime = r.read_i32::<ChnByteOrder>()?;
        let livetime = r.read_i32::<ChnByteOrder>()?;

        let mut start_date = [0u8; 8];
        r.read_exact(&mut start_date)?;
        let mut start_time = [0u8; 4];
        r.read_exact(&mut start_time)?;

        let channel_offset = r.read_u16::<ChnByteOrder>()?;
        let channel_count = r.read_u16::<ChnByteOrder>()?;

        Ok(ChnHeader {
            signature,
            mca_number,
            segment,
            seconds,
            realtime,
            livetime,
            start_date,
            start_time,
            channel_offset,
            channel_count,
        })
    }
}

impl ChnFooterExt for ChnFooter {
    fn serialize(&self) -> ChnResult<[u8; CHN_FOOTER_SIZE]> {
        let mut buf = [0u8; CHN_FOOTER_SIZE];
        let mut w = Cursor::new(&mut buf[..]);

        w.write_i16::<ChnByteOrder>(self.signature)?;
        w.write_i16::<ChnByteOrder>(0)?; // reserved
        write_calibration(&mut w, &self.energy)?;
        write_calibration(&mut w, &self.peak_shape)?;
        write_reserved(&mut w, CHN_FOOTER_RESERVED2)?;
        write_counted(&mut w, self.detector_description(), CHN_DESCRIPTION_MAX)?;
        write_counted(&mut w, self.sample_description(), CHN_DESCRIPTION_MAX)?;
        write_reserved(&mut w, CHN_FOOTER_RESERVED3)?;

        debug_assert_eq!(w.position() as usize, CHN_FOOTER_SIZE);
        Ok(buf)
    }

    fn deserialize(buf: &[u8; CHN_FOOTER_SIZE]) -> ChnResult<Self> {
        let mut r = &buf[..];

        let signature = r.read_i16::<ChnByteOrder>()?;
        skip_reserved(&mut r, 2)?;
        let energy = read_calibration(&mut r)?;
        let peak_shape = read_calibration(&mut r)?;
        skip_reserved(&mut r, CHN_FOOTER_RESERVED2)?;
        let detector = read_counted(&mut r, CHN_DESCRIPTION_MAX)?;
        let sample = read_counted(&mut r, CHN_DESCRIPTION_MAX)?;
        skip_reserved(&mut r, CHN_FOOTER_RESERVED3)?;

        let mut footer = ChnFooter::new();
        footer.signature = signature;
        footer.energy = energy;
        footer.peak_shape = peak_shape;
        footer.set_detector_description(detector)?;
        footer.set_sample_description(sample)?;

        Ok(footer)
    }
}

fn write_calibration<W: Write>(
    w: &mut W,
    c: &Calibration,
) -> ChnResult<()> {
    w.write_f32::<ChnByteOrder>(c.zero)?;
    w.write_f32::<ChnByteOrder>(c.slope)?;
    w.write_f32::<ChnByteOrder>(c.quadratic)?;
    Ok(())
}

fn read_calibration<R: Read>(r: &mut R) -> ChnResult<Calibration> {
    Ok(Calibration {
        zero: r.read_f32::<ChnByteOrder>()?,
        slope: r.read_f32::<ChnByteOrder>()?,
        quadratic: r.read_f32::<ChnByteOrder>()?,
    })
}
