//! XDR decoder
//!
//! A byte cursor that consumes exactly what the encoder produced, padding
//! included, and refuses anything the encoder could not have produced.

use base64::Engine;

use super::encoder::padding_len;
use super::error::{XdrError, XdrResult};

pub const DEFAULT_DEPTH_LIMIT: u32 = 500;
pub const DEFAULT_LEN_LIMIT: usize = 10 * 1024 * 1024;

/// Resource limits applied while decoding untrusted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of composite values
    pub depth: u32,
    /// Maximum number of bytes a single decode may consume
    pub len: usize,
}

impl Limits {
    pub const fn none() -> Self {
        Self {
            depth: u32::MAX,
            len: usize::MAX,
        }
    }

    pub const fn new(depth: u32, len: usize) -> Self {
        Self { depth, len }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_LIMIT, DEFAULT_LEN_LIMIT)
    }
}

/// Cursor over an XDR byte buffer
#[derive(Debug)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
    limits: Limits,
    depth: u32,
}

impl<'a> XdrReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, Limits::default())
    }

    pub fn with_limits(data: &'a [u8], limits: Limits) -> Self {
        Self {
            data,
            pos: 0,
            limits,
            depth: 0,
        }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails if any input is left unconsumed
    pub fn finish(self) -> XdrResult<()> {
        if self.remaining() != 0 {
            return Err(XdrError::TrailingBytes {
                offset: self.pos,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> XdrResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(XdrError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        if self.pos + n > self.limits.len {
            return Err(XdrError::LengthLimitExceeded { offset: self.pos });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> XdrResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Run `f` one nesting level deeper
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> XdrResult<T>) -> XdrResult<T> {
        if self.depth >= self.limits.depth {
            return Err(XdrError::DepthLimitExceeded { offset: self.pos });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn read_u32(&mut self) -> XdrResult<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> XdrResult<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> XdrResult<u64> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> XdrResult<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> XdrResult<bool> {
        let offset = self.pos;
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(XdrError::InvalidBool { offset, value }),
        }
    }

    /// Union tag; returns the tag and the offset it was read from
    pub fn read_discriminant(&mut self) -> XdrResult<(i32, usize)> {
        let offset = self.pos;
        Ok((self.read_i32()?, offset))
    }

    fn read_padding(&mut self, len: usize) -> XdrResult<()> {
        let offset = self.pos;
        let padding = self.take(padding_len(len))?;
        if padding.iter().any(|b| *b != 0) {
            return Err(XdrError::NonZeroPadding { offset });
        }
        Ok(())
    }

    /// Fixed-length opaque of `N` bytes plus padding
    pub fn read_fixed_opaque<const N: usize>(&mut self) -> XdrResult<[u8; N]> {
        let out = self.take_array::<N>()?;
        self.read_padding(N)?;
        Ok(out)
    }

    /// Length prefix checked against the declared maximum and the input left
    fn read_length(&mut self, max: u32, min_element_size: usize) -> XdrResult<usize> {
        let offset = self.pos;
        let len = self.read_u32()?;
        if len > max {
            return Err(XdrError::LengthExceedsMax { offset, len, max });
        }
        let needed = (len as usize).saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(XdrError::LengthExceedsRemaining {
                offset,
                len,
                remaining: self.remaining(),
            });
        }
        Ok(len as usize)
    }

    pub fn read_var_opaque(&mut self, max: u32) -> XdrResult<Vec<u8>> {
        let len = self.read_length(max, 1)?;
        let bytes = self.take(len)?.to_vec();
        self.read_padding(len)?;
        Ok(bytes)
    }

    pub fn read_string(&mut self, max: u32) -> XdrResult<String> {
        let offset = self.pos + 4;
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8 { offset })
    }

    pub fn read_option<T: ReadXdr>(&mut self) -> XdrResult<Option<T>> {
        let offset = self.pos;
        match self.read_u32()? {
            0 => Ok(None),
            1 => self.nested(|r| T::read_xdr(r)).map(Some),
            value => Err(XdrError::InvalidOptionalFlag { offset, value }),
        }
    }

    pub fn read_fixed_array<T: ReadXdr, const N: usize>(&mut self) -> XdrResult<[T; N]> {
        let offset = self.pos;
        let values = self.nested(|r| (0..N).map(|_| T::read_xdr(r)).collect::<XdrResult<Vec<T>>>())?;
        values
            .try_into()
            .map_err(|_| XdrError::UnexpectedEof {
                offset,
                needed: N,
                remaining: 0,
            })
    }

    /// Every XDR element occupies at least four bytes, which bounds the
    /// allocation before any element is decoded
    pub fn read_var_array<T: ReadXdr>(&mut self, max: u32) -> XdrResult<Vec<T>> {
        let len = self.read_length(max, 4)?;
        self.nested(|r| {
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(T::read_xdr(r)?);
            }
            Ok(values)
        })
    }
}

/// Values that can be deserialized from XDR
pub trait ReadXdr: Sized {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self>;

    /// Decode a complete buffer; trailing bytes are an error
    fn from_xdr(bytes: &[u8]) -> XdrResult<Self> {
        Self::from_xdr_with_limits(bytes, Limits::default())
    }

    fn from_xdr_with_limits(bytes: &[u8], limits: Limits) -> XdrResult<Self> {
        let mut r = XdrReader::with_limits(bytes, limits);
        let value = r.nested(|r| Self::read_xdr(r))?;
        r.finish()?;
        Ok(value)
    }

    fn from_xdr_base64(s: &str) -> XdrResult<Self> {
        Self::from_xdr_base64_with_limits(s, Limits::default())
    }

    fn from_xdr_base64_with_limits(s: &str, limits: Limits) -> XdrResult<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s.trim())
            .map_err(|e| XdrError::Base64(e.to_string()))?;
        Self::from_xdr_with_limits(&bytes, limits)
    }
}

impl ReadXdr for u32 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_u32()
    }
}

impl ReadXdr for i32 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_i32()
    }
}

impl ReadXdr for u64 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_u64()
    }
}

impl ReadXdr for i64 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_i64()
    }
}

impl ReadXdr for bool {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_bool()
    }
}

impl<const N: usize> ReadXdr for [u8; N] {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_fixed_opaque::<N>()
    }
}

impl<T: ReadXdr> ReadXdr for Option<T> {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.read_option()
    }
}

impl<T: ReadXdr> ReadXdr for Box<T> {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        r.nested(|r| T::read_xdr(r)).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers() {
        let data = [0, 0, 0, 5, 0xff, 0xff, 0xff, 0xfb];
        let mut r = XdrReader::new(&data);
        assert_eq!(r.read_u32().unwrap(), 5);
        assert_eq!(r.read_i32().unwrap(), -5);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_unexpected_eof_reports_offset() {
        let data = [0, 0, 0, 1, 0, 0];
        let mut r = XdrReader::new(&data);
        r.read_u32().unwrap();
        assert_eq!(
            r.read_u32(),
            Err(XdrError::UnexpectedEof {
                offset: 4,
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_invalid_bool() {
        let mut r = XdrReader::new(&[0, 0, 0, 2]);
        assert_eq!(r.read_bool(), Err(XdrError::InvalidBool { offset: 0, value: 2 }));
    }

    #[test]
    fn test_nonzero_padding_rejected() {
        let data = [0, 0, 0, 1, 0xAA, 0, 1, 0];
        let mut r = XdrReader::new(&data);
        assert_eq!(
            r.read_var_opaque(64),
            Err(XdrError::NonZeroPadding { offset: 5 })
        );
    }

    #[test]
    fn test_length_over_declared_max() {
        let data = [0, 0, 0, 29, 0, 0, 0, 0];
        let mut r = XdrReader::new(&data);
        assert_eq!(
            r.read_string(28),
            Err(XdrError::LengthExceedsMax {
                offset: 0,
                len: 29,
                max: 28
            })
        );
    }

    #[test]
    fn test_length_over_remaining() {
        let data = [0, 0, 0, 16, 1, 2, 3, 4];
        let mut r = XdrReader::new(&data);
        assert!(matches!(
            r.read_var_opaque(64),
            Err(XdrError::LengthExceedsRemaining { offset: 0, len: 16, .. })
        ));
    }

    #[test]
    fn test_huge_array_count_rejected_before_allocation() {
        let data = [0x7f, 0xff, 0xff, 0xff];
        let mut r = XdrReader::new(&data);
        assert!(matches!(
            r.read_var_array::<u32>(u32::MAX),
            Err(XdrError::LengthExceedsRemaining { .. })
        ));
    }

    #[test]
    fn test_invalid_option_flag() {
        let data = [0, 0, 0, 3];
        assert_eq!(
            Option::<u32>::from_xdr(&data),
            Err(XdrError::InvalidOptionalFlag { offset: 0, value: 3 })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0, 0, 0, 2, 0xff, 0xfe, 0, 0];
        let mut r = XdrReader::new(&data);
        assert_eq!(r.read_string(28), Err(XdrError::InvalidUtf8 { offset: 4 }));
    }

    #[test]
    fn test_trailing_bytes() {
        let data = [0, 0, 0, 1, 0, 0, 0, 0];
        assert_eq!(
            u32::from_xdr(&data),
            Err(XdrError::TrailingBytes {
                offset: 4,
                remaining: 4
            })
        );
    }

    #[test]
    fn test_length_limit() {
        let data = [0u8; 16];
        let limits = Limits::new(DEFAULT_DEPTH_LIMIT, 8);
        let mut r = XdrReader::with_limits(&data, limits);
        r.read_u64().unwrap();
        assert_eq!(r.read_u32(), Err(XdrError::LengthLimitExceeded { offset: 8 }));
    }

    #[test]
    fn test_depth_limit() {
        // Option<Option<u32>> needs two levels beneath the top-level one
        let data = [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 9];
        let shallow = Limits::new(2, DEFAULT_LEN_LIMIT);
        assert!(matches!(
            Option::<Option<u32>>::from_xdr_with_limits(&data, shallow),
            Err(XdrError::DepthLimitExceeded { .. })
        ));
        assert_eq!(
            Option::<Option<u32>>::from_xdr_with_limits(&data, Limits::new(3, DEFAULT_LEN_LIMIT)),
            Ok(Some(Some(9)))
        );
    }

    #[test]
    fn test_fixed_array() {
        let data = [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        let mut r = XdrReader::new(&data);
        assert_eq!(r.read_fixed_array::<u32, 3>().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_base64_rejects_garbage() {
        assert!(matches!(u32::from_xdr_base64("***"), Err(XdrError::Base64(_))));
        assert_eq!(u32::from_xdr_base64("AAAAKg==").unwrap(), 42);
    }
}
