use std::io::{Read, Write};

use crate::codec::{read_varstr31, write_varstr31};
use crate::error::CodecError;

/// Write an extensible string.
///
/// `f` writes the sub-record into a scratch buffer, which is then emitted as
/// a single length-prefixed frame. Returns the number of bytes written to
/// `w`, prefix included.
pub fn write_extensible_string<W, F, E>(w: &mut W, f: F) -> Result<usize, E>
where
    W: Write + ?Sized,
    F: FnOnce(&mut Vec<u8>) -> Result<(), E>,
    E: From<CodecError>,
{
    let mut frame = Vec::new();
    f(&mut frame)?;
    Ok(write_varstr31(w, &frame)?)
}

/// Read an extensible string.
///
/// `f` decodes the sub-record from the frame contents. With `strict` set,
/// any bytes `f` leaves unread are a [`CodecError::TrailingData`] error.
/// Without it, the unread suffix is skipped and handed back alongside the
/// decoded value so callers can retain data from a newer protocol version.
pub fn read_extensible_string<R, T, F, E>(r: &mut R, strict: bool, f: F) -> Result<(T, Vec<u8>), E>
where
    R: Read + ?Sized,
    F: FnOnce(&mut &[u8]) -> Result<T, E>,
    E: From<CodecError>,
{
    let frame = read_varstr31(r)?;
    let mut rest = frame.as_slice();
    let value = f(&mut rest)?;
    if strict && !rest.is_empty() {
        return Err(CodecError::TrailingData { len: rest.len() }.into());
    }
    Ok((value, rest.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{read_varint63, write_varint63};
    use crate::error::CodecResult;

    fn frame_with_suffix(value: u64, suffix: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_extensible_string(&mut buf, |w| -> CodecResult<()> {
            write_varint63(w, value)?;
            w.extend_from_slice(suffix);
            Ok(())
        })
        .unwrap();
        buf
    }

    #[test]
    fn frame_is_length_prefixed() {
        let buf = frame_with_suffix(300, &[]);
        assert_eq!(buf, vec![0x02, 0xac, 0x02]);
    }

    #[test]
    fn empty_frame() {
        let mut buf = Vec::new();
        let n = write_extensible_string(&mut buf, |_| -> CodecResult<()> { Ok(()) }).unwrap();
        assert_eq!(n, 1);
        assert_eq!(buf, vec![0x00]);
    }

    #[test]
    fn strict_exact_frame_roundtrips() {
        let buf = frame_with_suffix(42, &[]);
        let (value, suffix) =
            read_extensible_string(&mut buf.as_slice(), true, |r| read_varint63(r)).unwrap();
        assert_eq!(value, 42);
        assert!(suffix.is_empty());
    }

    #[test]
    fn strict_rejects_trailing_bytes() {
        let buf = frame_with_suffix(42, &[0xde, 0xad]);
        let err =
            read_extensible_string(&mut buf.as_slice(), true, |r| read_varint63(r)).unwrap_err();
        assert!(matches!(err, CodecError::TrailingData { len: 2 }));
    }

    #[test]
    fn lenient_skips_trailing_bytes() {
        let mut buf = frame_with_suffix(42, &[0xde, 0xad]);
        buf.push(0x07);
        let mut r = buf.as_slice();
        let (value, suffix) = read_extensible_string(&mut r, false, |r| read_varint63(r)).unwrap();
        assert_eq!(value, 42);
        assert_eq!(suffix, vec![0xde, 0xad]);
        // the reader sits just past the frame
        assert_eq!(r, &[0x07]);
    }

    #[test]
    fn sub_reader_cannot_escape_frame() {
        let mut buf = Vec::new();
        write_extensible_string(&mut buf, |_| -> CodecResult<()> { Ok(()) }).unwrap();
        buf.push(0x05);
        let err = read_extensible_string(&mut buf.as_slice(), false, |r| read_varint63(r))
            .unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }
}
