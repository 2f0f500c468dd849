use std::io::ErrorKind::UnexpectedEof;
use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;

/// Length of the fixed, NUL padded name fields used by BSP and MD3 (`MAX_QPATH`).
pub const MAX_QPATH: usize = 64;

pub(crate) trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

/// Reads a `MAX_QPATH` sized name. Everything after the first NUL byte is garbage from the
/// exporting tool and gets discarded.
pub(crate) fn read_qpath<R: Read>(rdr: &mut R) -> Result<String, ParserError> {
    read_fixed_string(rdr, MAX_QPATH)
}

pub(crate) fn read_fixed_string<R: Read>(rdr: &mut R, len: usize) -> Result<String, ParserError> {
    let mut buf = vec![0u8; len];
    rdr.read_exact(&mut buf)?;
    let end = buf.iter().position(|&c| c == 0).unwrap_or(len);
    buf.truncate(end);
    Ok(String::from_utf8(buf)?)
}

/// Counts are stored as signed integers, anything negative means the file is broken.
pub(crate) fn read_count<R: Read>(rdr: &mut R, reason: &'static str) -> Result<usize, ParserError> {
    let count = rdr.read_i32::<LittleEndian>()?;
    usize::try_from(count).map_err(|_| ParserError::FormatError { reason })
}

/// Parses elements until the reader is exhausted. Only meant for readers that are limited to a
/// single lump, otherwise this happily reads into the next one.
pub(crate) fn read_chunk_array<T: Parseable<T>, R: Read>(
    rdr: &mut R,
) -> Result<Vec<T>, ParserError> {
    let mut list = Vec::<T>::new();
    let mut element = T::parse(rdr);
    while element.is_ok() {
        list.push(element?);
        element = T::parse(rdr);
    }

    // weird error handling because when EoF, we get that inside a parser error.
    match element {
        Err(ParserError::IOError(internal)) if internal.kind() == UnexpectedEof => (),
        err => return err.map(|_| Vec::with_capacity(0)),
    };
    Ok(list)
}

/// Reads `length` bytes at `offset`. Ranges the stream cannot back are rejected before anything
/// gets allocated, lump tables of corrupt files point anywhere.
pub(crate) fn read_at<R: Read + Seek>(
    rdr: &mut R,
    offset: u64,
    length: usize,
) -> Result<Vec<u8>, ParserError> {
    if length == 0 {
        return Ok(Vec::new());
    }

    let stream_len = rdr.seek(SeekFrom::End(0))?;
    let fits = offset.checked_add(length as u64).is_some_and(|end| end <= stream_len);
    if !fits {
        return Err(ParserError::FormatError {
            reason: "Lump exceeds the file size",
        });
    }

    let mut buf = vec![0u8; length];
    rdr.seek(SeekFrom::Start(offset))?;
    rdr.read_exact(&mut buf)?;
    Ok(buf)
}
