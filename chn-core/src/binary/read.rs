use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::error::{ChnError, ChnResult};

/// Пропускает `len` байт зарезервированной области.
pub fn skip_reserved<R: Read>(
    r: &mut R,
    len: usize,
) -> io::Result<()> {
    let skipped = io::copy(&mut r.take(len as u64), &mut io::sink())?;

    if skipped != len as u64 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }

    Ok(())
}

/// Читает строку с префиксом длины, записанную [`write_counted`](super::write_counted).
pub fn read_counted<R: Read>(
    r: &mut R,
    width: usize,
) -> ChnResult<Vec<u8>> {
    let len = r.read_u8()? as usize;
    let mut field = vec![0u8; width];

    r.read_exact(&mut field)?;

    if len > width {
        return Err(ChnError::format_violation(format!(
            "description length {len} exceeds field width {width}"
        )));
    }

    field.truncate(len);
    Ok(field)
}
