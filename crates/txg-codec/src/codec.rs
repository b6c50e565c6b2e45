use std::io::{self, Read, Write};

use crate::error::{CodecError, CodecResult};

/// Largest value a varint63 may carry.
pub const MAX_VARINT63: u64 = i64::MAX as u64;

/// Largest value a varint31 may carry; also the longest varstr31.
pub const MAX_VARINT31: u64 = i32::MAX as u64;

/// Longest encoding of a 64-bit varint, in bytes.
pub const MAX_VARINT_LEN: usize = 10;

fn put_uvarint<W: Write + ?Sized>(w: &mut W, mut value: u64) -> CodecResult<usize> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut n = 0;
    while value >= 0x80 {
        buf[n] = (value as u8) | 0x80;
        value >>= 7;
        n += 1;
    }
    buf[n] = value as u8;
    n += 1;
    w.write_all(&buf[..n])?;
    Ok(n)
}

fn get_uvarint<R: Read + ?Sized>(r: &mut R) -> CodecResult<u64> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for i in 0..MAX_VARINT_LEN {
        let [byte] = read_fixed::<R, 1>(r)?;
        if byte < 0x80 {
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(CodecError::VarintOverflow);
            }
            return Ok(value | (u64::from(byte) << shift));
        }
        value |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    Err(CodecError::VarintOverflow)
}

/// Read exactly `N` raw bytes, such as a fixed 256-bit hash.
pub fn read_fixed<R: Read + ?Sized, const N: usize>(r: &mut R) -> CodecResult<[u8; N]> {
    let mut buf = [0u8; N];
    match r.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CodecError::UnexpectedEof),
        Err(e) => Err(e.into()),
    }
}

/// Write a varint63. Values with bit 63 set are rejected.
///
/// Returns the number of bytes written.
pub fn write_varint63<W: Write + ?Sized>(w: &mut W, value: u64) -> CodecResult<usize> {
    if value > MAX_VARINT63 {
        return Err(CodecError::OutOfRange { value, bits: 63 });
    }
    put_uvarint(w, value)
}

/// Write a varint31. Values of 2^31 or more are rejected.
pub fn write_varint31<W: Write + ?Sized>(w: &mut W, value: u64) -> CodecResult<usize> {
    if value > MAX_VARINT31 {
        return Err(CodecError::OutOfRange { value, bits: 31 });
    }
    put_uvarint(w, value)
}

/// Read a varint63.
pub fn read_varint63<R: Read + ?Sized>(r: &mut R) -> CodecResult<u64> {
    let value = get_uvarint(r)?;
    if value > MAX_VARINT63 {
        return Err(CodecError::OutOfRange { value, bits: 63 });
    }
    Ok(value)
}

/// Read a varint31.
pub fn read_varint31<R: Read + ?Sized>(r: &mut R) -> CodecResult<u64> {
    let value = get_uvarint(r)?;
    if value > MAX_VARINT31 {
        return Err(CodecError::OutOfRange { value, bits: 31 });
    }
    Ok(value)
}

/// Write a length-prefixed byte string.
pub fn write_varstr31<W: Write + ?Sized>(w: &mut W, data: &[u8]) -> CodecResult<usize> {
    let n = write_varint31(w, data.len() as u64)?;
    w.write_all(data)?;
    Ok(n + data.len())
}

/// Read a length-prefixed byte string.
///
/// The declared length is never trusted for allocation; a prefix longer than
/// the remaining input is reported as [`CodecError::UnexpectedEof`].
pub fn read_varstr31<R: Read + ?Sized>(r: &mut R) -> CodecResult<Vec<u8>> {
    let len = read_varint31(r)?;
    let mut data = Vec::new();
    (&mut *r).take(len).read_to_end(&mut data)?;
    if data.len() as u64 != len {
        return Err(CodecError::UnexpectedEof);
    }
    Ok(data)
}

/// Write a count-prefixed list of byte strings.
pub fn write_varstr_list<W, T>(w: &mut W, list: &[T]) -> CodecResult<usize>
where
    W: Write + ?Sized,
    T: AsRef<[u8]>,
{
    let mut n = write_varint31(w, list.len() as u64)?;
    for item in list {
        n += write_varstr31(w, item.as_ref())?;
    }
    Ok(n)
}

/// Read a count-prefixed list of byte strings.
pub fn read_varstr_list<R: Read + ?Sized>(r: &mut R) -> CodecResult<Vec<Vec<u8>>> {
    let count = read_varint31(r)?;
    let mut list = Vec::with_capacity(count.min(64) as usize);
    for _ in 0..count {
        list.push(read_varstr31(r)?);
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn varint63(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint63(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn varint_known_encodings() {
        assert_eq!(varint63(0), vec![0x00]);
        assert_eq!(varint63(1), vec![0x01]);
        assert_eq!(varint63(127), vec![0x7f]);
        assert_eq!(varint63(128), vec![0x80, 0x01]);
        assert_eq!(varint63(300), vec![0xac, 0x02]);
        assert_eq!(
            varint63(MAX_VARINT63),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]
        );
    }

    #[test]
    fn write_varint63_rejects_top_bit() {
        let mut buf = Vec::new();
        let err = write_varint63(&mut buf, 1 << 63).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { bits: 63, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn write_varint31_rejects_large() {
        let mut buf = Vec::new();
        assert!(write_varint31(&mut buf, MAX_VARINT31).is_ok());
        let err = write_varint31(&mut buf, MAX_VARINT31 + 1).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { bits: 31, .. }));
    }

    #[test]
    fn read_varint63_rejects_top_bit() {
        // u64::MAX as a plain uvarint
        let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        let err = read_varint63(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { bits: 63, .. }));
    }

    #[test]
    fn read_varint31_rejects_large() {
        let mut buf = Vec::new();
        write_varint63(&mut buf, MAX_VARINT31 + 1).unwrap();
        let err = read_varint31(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { bits: 31, .. }));
    }

    #[test]
    fn unterminated_varint_is_overflow() {
        let bytes = [0x80u8; 11];
        let err = read_varint63(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, CodecError::VarintOverflow));
    }

    #[test]
    fn truncated_varint_is_eof() {
        let bytes = [0x80u8, 0x80];
        let err = read_varint63(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn read_fixed_hash() {
        let bytes = [7u8; 33];
        let mut r = &bytes[..];
        let h: [u8; 32] = read_fixed(&mut r).unwrap();
        assert_eq!(h, [7u8; 32]);
        assert_eq!(r.len(), 1);
        let err = read_fixed::<_, 32>(&mut r).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn varstr_known_encoding() {
        let mut buf = Vec::new();
        let n = write_varstr31(&mut buf, b"abc").unwrap();
        assert_eq!(n, 4);
        assert_eq!(buf, vec![0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn varstr_short_read() {
        let bytes = [0x05u8, b'a', b'b'];
        let err = read_varstr31(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn varstr_huge_prefix_does_not_allocate() {
        let mut buf = Vec::new();
        write_varint31(&mut buf, MAX_VARINT31).unwrap();
        let err = read_varstr31(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn varstr_list_encoding() {
        let mut buf = Vec::new();
        write_varstr_list(&mut buf, &[b"a".to_vec(), Vec::new(), b"bc".to_vec()]).unwrap();
        assert_eq!(buf, vec![0x03, 0x01, b'a', 0x00, 0x02, b'b', b'c']);
        let list = read_varstr_list(&mut buf.as_slice()).unwrap();
        assert_eq!(list, vec![b"a".to_vec(), Vec::new(), b"bc".to_vec()]);
    }

    #[test]
    fn reader_position_advances() {
        let mut buf = Vec::new();
        write_varint63(&mut buf, 300).unwrap();
        write_varstr31(&mut buf, b"xy").unwrap();
        let mut r = buf.as_slice();
        assert_eq!(read_varint63(&mut r).unwrap(), 300);
        assert_eq!(read_varstr31(&mut r).unwrap(), b"xy".to_vec());
        assert!(r.is_empty());
    }

    proptest! {
        #[test]
        fn varint63_roundtrip(value in 0..=MAX_VARINT63) {
            let buf = varint63(value);
            prop_assert!(buf.len() <= MAX_VARINT_LEN);
            let mut r = buf.as_slice();
            prop_assert_eq!(read_varint63(&mut r).unwrap(), value);
            prop_assert!(r.is_empty());
        }

        #[test]
        fn varstr31_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut buf = Vec::new();
            write_varstr31(&mut buf, &data).unwrap();
            let mut r = buf.as_slice();
            prop_assert_eq!(read_varstr31(&mut r).unwrap(), data);
            prop_assert!(r.is_empty());
        }
    }
}
