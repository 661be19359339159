//! Capture file of a session: the session description followed by every
//! received RTP packet, one record each.
//!
//! Record layout (all big-endian):
//!
//! ```text
//! version u32 | type u32 | body length u32 | capture time ms u64 | reserved u32 | body
//! ```

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::{
    dump_error::DumpError,
    dump_message::{DumpKind, DumpMessage},
};

pub const DUMP_VERSION: u32 = 1;
pub const DUMP_HEADER_LEN: usize = 24;
/// Upper bound on a single record body; guards against garbage lengths.
pub const MAX_DUMP_BODY_LEN: usize = 16 * 1024 * 1024;

pub struct DumpReader<R: Read> {
    inner: R,
}

impl<R: Read> DumpReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Next record, or `None` at a clean end of stream.
    pub fn read_message(&mut self) -> Result<Option<DumpMessage>, DumpError> {
        let mut header = [0u8; DUMP_HEADER_LEN];
        let got = read_full(&mut self.inner, &mut header)?;
        if got == 0 {
            return Ok(None);
        }
        if got < DUMP_HEADER_LEN {
            return Err(DumpError::Truncated {
                expected: DUMP_HEADER_LEN,
                got,
            });
        }

        let mut cur = &header[..];
        let version = cur.read_u32::<BigEndian>()?;
        let kind = cur.read_u32::<BigEndian>()?;
        let len = cur.read_u32::<BigEndian>()? as usize;
        let capture_ms = cur.read_u64::<BigEndian>()?;
        let _reserved = cur.read_u32::<BigEndian>()?;

        if version != DUMP_VERSION {
            return Err(DumpError::UnsupportedVersion(version));
        }
        let kind = DumpKind::try_from(kind)?;
        if len > MAX_DUMP_BODY_LEN {
            return Err(DumpError::BodyTooLarge(len));
        }

        let mut body = vec![0u8; len];
        let got = read_full(&mut self.inner, &mut body)?;
        if got < len {
            return Err(DumpError::Truncated { expected: len, got });
        }

        Ok(Some(DumpMessage {
            version,
            kind,
            capture_ms,
            body,
        }))
    }
}

impl<R: Read> Iterator for DumpReader<R> {
    type Item = Result<DumpMessage, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_message().transpose()
    }
}

/// Reads until `buf` is full or the stream ends; returns the bytes read.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub struct DumpWriter<W: Write> {
    inner: W,
}

impl<W: Write> DumpWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_message(
        &mut self,
        kind: DumpKind,
        capture_ms: u64,
        body: &[u8],
    ) -> Result<(), DumpError> {
        if body.len() > MAX_DUMP_BODY_LEN {
            return Err(DumpError::BodyTooLarge(body.len()));
        }
        self.inner.write_u32::<BigEndian>(DUMP_VERSION)?;
        self.inner.write_u32::<BigEndian>(kind as u32)?;
        self.inner.write_u32::<BigEndian>(body.len() as u32)?;
        self.inner.write_u64::<BigEndian>(capture_ms)?;
        self.inner.write_u32::<BigEndian>(0)?;
        self.inner.write_all(body)?;
        Ok(())
    }

    pub fn write_file_header(&mut self, capture_ms: u64) -> Result<(), DumpError> {
        self.write_message(DumpKind::FileHeader, capture_ms, &[])
    }

    pub fn write_sdp(&mut self, capture_ms: u64, sdp: &str) -> Result<(), DumpError> {
        self.write_message(DumpKind::Sdp, capture_ms, sdp.as_bytes())
    }

    pub fn write_rtp(&mut self, capture_ms: u64, packet: &[u8]) -> Result<(), DumpError> {
        self.write_message(DumpKind::Rtp, capture_ms, packet)
    }

    pub fn flush(&mut self) -> Result<(), DumpError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_layout_is_big_endian() {
        let mut w = DumpWriter::new(Vec::new());
        w.write_message(DumpKind::Rtp, 0x0102_0304_0506_0708, &[0xAA, 0xBB])
            .unwrap();
        let bytes = w.into_inner();
        assert_eq!(
            bytes,
            vec![
                0, 0, 0, 1, // version
                0, 0, 0, 3, // type
                0, 0, 0, 2, // len
                1, 2, 3, 4, 5, 6, 7, 8, // capture ms
                0, 0, 0, 0, // reserved
                0xAA, 0xBB,
            ]
        );
    }

    #[test]
    fn reads_records_back_in_order() {
        let mut w = DumpWriter::new(Vec::new());
        w.write_file_header(1).unwrap();
        w.write_sdp(2, "m=video 0 RTP/AVP 96\n").unwrap();
        w.write_rtp(3, &[0x80, 0x60]).unwrap();
        let r = DumpReader::new(Cursor::new(w.into_inner()));

        let kinds: Vec<DumpKind> = r.map(|m| m.unwrap().kind).collect();
        assert_eq!(kinds, vec![DumpKind::FileHeader, DumpKind::Sdp, DumpKind::Rtp]);
    }

    #[test]
    fn empty_stream_is_clean_eof() {
        let mut r = DumpReader::new(Cursor::new(Vec::new()));
        assert!(r.read_message().unwrap().is_none());
    }

    #[test]
    fn truncated_header_and_body_are_errors() {
        let mut r = DumpReader::new(Cursor::new(vec![0u8; 10]));
        assert!(matches!(
            r.read_message(),
            Err(DumpError::Truncated { expected: 24, got: 10 })
        ));

        let mut w = DumpWriter::new(Vec::new());
        w.write_rtp(0, &[1, 2, 3, 4]).unwrap();
        let mut bytes = w.into_inner();
        bytes.truncate(bytes.len() - 1);
        let mut r = DumpReader::new(Cursor::new(bytes));
        assert!(matches!(
            r.read_message(),
            Err(DumpError::Truncated { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn rejects_unknown_type_and_version() {
        let mut w = DumpWriter::new(Vec::new());
        w.write_rtp(0, &[]).unwrap();
        let mut bytes = w.into_inner();
        bytes[7] = 9;
        let mut r = DumpReader::new(Cursor::new(bytes.clone()));
        assert!(matches!(r.read_message(), Err(DumpError::UnknownKind(9))));

        bytes[3] = 2;
        let mut r = DumpReader::new(Cursor::new(bytes));
        assert!(matches!(r.read_message(), Err(DumpError::UnsupportedVersion(2))));
    }
}
