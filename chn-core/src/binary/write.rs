use std::io::{self, Read, Write};

use byteorder::WriteBytesExt;

use crate::error::{ChnError, ChnResult};

/// Пишет `len` нулевых байт зарезервированной области.
pub fn write_reserved<W: Write>(
    w: &mut W,
    len: usize,
) -> io::Result<()> {
    io::copy(&mut io::repeat(0).take(len as u64), w)?;
    Ok(())
}

/// Пишет строку с префиксом длины: `u8 len` + `width` байт, дополненных нулями.
pub fn write_counted<W: Write>(
    w: &mut W,
    bytes: &[u8],
    width: usize,
) -> ChnResult<()> {
    if bytes.len() > width || bytes.len() > u8::MAX as usize {
        return Err(ChnError::DescriptionTooLong {
            len: bytes.len(),
            max: width,
        });
    }

    w.write_u8(bytes.len() as u8)?;
    w.write_all(bytes)?;
    write_reserved(w, width - bytes.len())?;

    Ok(())
}
