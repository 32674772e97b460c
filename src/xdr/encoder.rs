//! XDR encoder
//!
//! Big-endian, every unit padded with zeros to a 4-byte boundary.

use base64::Engine;

use super::error::{XdrError, XdrResult};

/// Append-only XDR output buffer
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Union tag
    pub fn write_discriminant(&mut self, value: i32) {
        self.write_i32(value);
    }

    /// Fixed-length opaque: raw bytes plus padding, no length prefix
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.write_padding(bytes.len());
    }

    /// Variable-length opaque with a declared maximum
    pub fn write_var_opaque(&mut self, bytes: &[u8], max: u32) -> XdrResult<()> {
        let len = checked_len("opaque", bytes.len(), max)?;
        self.write_u32(len);
        self.write_fixed_opaque(bytes);
        Ok(())
    }

    pub fn write_string(&mut self, value: &str, max: u32) -> XdrResult<()> {
        let len = checked_len("string", value.len(), max)?;
        self.write_u32(len);
        self.write_fixed_opaque(value.as_bytes());
        Ok(())
    }

    /// Presence flag followed by the value when present
    pub fn write_option<T: WriteXdr>(&mut self, value: &Option<T>) -> XdrResult<()> {
        match value {
            Some(inner) => {
                self.write_bool(true);
                inner.write_xdr(self)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    /// Fixed array of homogeneous elements, no length prefix
    pub fn write_fixed_array<T: WriteXdr>(&mut self, values: &[T]) -> XdrResult<()> {
        for value in values {
            value.write_xdr(self)?;
        }
        Ok(())
    }

    /// Variable array of homogeneous elements with a declared maximum
    pub fn write_var_array<T: WriteXdr>(&mut self, values: &[T], max: u32) -> XdrResult<()> {
        let len = checked_len("array", values.len(), max)?;
        self.write_u32(len);
        self.write_fixed_array(values)
    }

    fn write_padding(&mut self, len: usize) {
        let pad = padding_len(len);
        self.buf.extend_from_slice(&[0u8; 3][..pad]);
    }
}

/// Zero bytes needed after `len` bytes to reach a 4-byte boundary
pub(crate) fn padding_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

fn checked_len(type_name: &'static str, len: usize, max: u32) -> XdrResult<u32> {
    match u32::try_from(len) {
        Ok(len32) if len32 <= max => Ok(len32),
        _ => Err(XdrError::ValueTooLong {
            type_name,
            len,
            max,
        }),
    }
}

/// Values that can be serialized to XDR
pub trait WriteXdr {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()>;

    fn to_xdr(&self) -> XdrResult<Vec<u8>> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w)?;
        Ok(w.into_bytes())
    }

    fn to_xdr_base64(&self) -> XdrResult<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_xdr()?))
    }
}

impl WriteXdr for u32 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_u32(*self);
        Ok(())
    }
}

impl WriteXdr for i32 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_i32(*self);
        Ok(())
    }
}

impl WriteXdr for u64 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_u64(*self);
        Ok(())
    }
}

impl WriteXdr for i64 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_i64(*self);
        Ok(())
    }
}

impl WriteXdr for bool {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_bool(*self);
        Ok(())
    }
}

impl<const N: usize> WriteXdr for [u8; N] {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_fixed_opaque(self);
        Ok(())
    }
}

impl<T: WriteXdr> WriteXdr for Option<T> {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_option(self)
    }
}

impl<T: WriteXdr> WriteXdr for Box<T> {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.as_ref().write_xdr(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_big_endian() {
        let mut w = XdrWriter::new();
        w.write_u32(1);
        w.write_i32(-1);
        w.write_u64(0x0102_0304_0506_0708);
        w.write_i64(-2);
        assert_eq!(
            w.as_bytes(),
            &[
                0, 0, 0, 1, //
                0xff, 0xff, 0xff, 0xff, //
                1, 2, 3, 4, 5, 6, 7, 8, //
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
            ]
        );
    }

    #[test]
    fn test_bool_occupies_four_bytes() {
        assert_eq!(true.to_xdr().unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(false.to_xdr().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_opaque_padding() {
        let mut w = XdrWriter::new();
        w.write_fixed_opaque(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE]);
        assert_eq!(w.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0, 0, 0]);
    }

    #[test]
    fn test_var_opaque_prefix_and_padding() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(&[1, 2, 3], 64).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 3, 1, 2, 3, 0]);
    }

    #[test]
    fn test_string_too_long() {
        let mut w = XdrWriter::new();
        let err = w.write_string("this string is longer than 28", 28).unwrap_err();
        assert!(matches!(err, XdrError::ValueTooLong { max: 28, .. }));
        assert!(w.is_empty());
    }

    #[test]
    fn test_option_flag() {
        assert_eq!(Some(7u32).to_xdr().unwrap(), vec![0, 0, 0, 1, 0, 0, 0, 7]);
        assert_eq!(None::<u32>.to_xdr().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_var_array_over_max() {
        let mut w = XdrWriter::new();
        assert!(w.write_var_array(&[1u32, 2, 3], 2).is_err());
    }

    #[test]
    fn test_padding_len() {
        assert_eq!(padding_len(0), 0);
        assert_eq!(padding_len(1), 3);
        assert_eq!(padding_len(2), 2);
        assert_eq!(padding_len(3), 1);
        assert_eq!(padding_len(4), 0);
    }
}
