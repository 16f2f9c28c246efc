//! Utility types for binary serialization.
//!
//! Provides VarInt encoding/decoding, the cursor-based `MslReader` and the
//! buffer-based `MslWriter` used by the MSL binary encoder, plus a
//! constant-time byte comparison and bounded random identifiers.

use rand::RngCore;

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A variable-length unsigned integer.
///
/// Values below 0xfd take a single byte. Larger values are written as a
/// marker byte (0xfd, 0xfe, 0xff) followed by a little-endian u16, u32 or
/// u64 respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 < 0x10000 {
            3
        } else if self.0 < 0x100000000 {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        if v < 0xfd {
            buf.push(v as u8);
        } else if v < 0x10000 {
            buf.push(0xfd);
            buf.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v < 0x100000000 {
            buf.push(0xfe);
            buf.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            buf.push(0xff);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

/// Map a signed integer onto an unsigned one so small magnitudes stay small.
pub fn zigzag_encode(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub fn zigzag_decode(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}

// ---------------------------------------------------------------------------
// MslReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for MSL binary data.
///
/// Wraps a byte slice and maintains a read position. Every read is bounds
/// checked and fails with `Truncated` instead of panicking.
pub struct MslReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MslReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        MslReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// # Returns
    /// The decoded `VarInt`, or an error if insufficient data.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        let value = match first {
            0xff => {
                let b = self.read_bytes(8)?;
                let mut arr = [0u8; 8];
                arr.copy_from_slice(b);
                u64::from_le_bytes(arr)
            }
            0xfe => {
                let b = self.read_bytes(4)?;
                u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u64
            }
            0xfd => {
                let b = self.read_bytes(2)?;
                u16::from_le_bytes([b[0], b[1]]) as u64
            }
            b => b as u64,
        };
        Ok(VarInt(value))
    }

    /// Read a VarInt length prefix followed by that many bytes.
    ///
    /// The length is checked against the remaining input before any
    /// allocation happens.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_varint()?.0;
        let len = usize::try_from(len).map_err(|_| PrimitivesError::LengthOverflow(len))?;
        self.read_bytes(len)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current read offset from the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }
}

// ---------------------------------------------------------------------------
// MslWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for MSL binary data.
pub struct MslWriter {
    buf: Vec<u8>,
}

impl MslWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        MslWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        MslWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Append a VarInt length prefix followed by the bytes themselves.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for MslWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare two byte slices in time independent of where they differ.
///
/// Slices of different length compare unequal immediately; the length of
/// a MAC or tag is not secret.
pub fn safe_equals(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// ---------------------------------------------------------------------------
// Random identifiers
// ---------------------------------------------------------------------------

/// Upper bound for MSL integers such as sequence numbers and message IDs.
///
/// 2^53 is the largest integer every MSL peer, JavaScript included, can
/// represent exactly.
pub const MAX_LONG_VALUE: u64 = 1 << 53;

const _: () = assert!(MAX_LONG_VALUE.is_power_of_two());

/// A random value in `[0, MAX_LONG_VALUE)`.
///
/// The bound is a power of two, so masking keeps the result uniform and no
/// draw is ever rejected.
pub fn random_long<R: RngCore + ?Sized>(rng: &mut R) -> u64 {
    rng.next_u64() & (MAX_LONG_VALUE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_byte_length() {
        assert_eq!(VarInt(0).to_bytes().len(), 1);
        assert_eq!(VarInt(252).to_bytes().len(), 1);
        assert_eq!(VarInt(253).to_bytes().len(), 3);
        assert_eq!(VarInt(65535).to_bytes().len(), 3);
        assert_eq!(VarInt(65536).to_bytes().len(), 5);
        assert_eq!(VarInt(4294967295).to_bytes().len(), 5);
        assert_eq!(VarInt(4294967296).to_bytes().len(), 9);
        assert_eq!(VarInt(u64::MAX).to_bytes().len(), 9);
    }

    #[test]
    fn test_varint_encoding() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (252, vec![0xfc]),
            (253, vec![0xfd, 0xfd, 0x00]),
            (65535, vec![0xfd, 0xff, 0xff]),
            (65536, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (4294967296, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);
            assert_eq!(vi.length(), expected.len());
            let mut reader = MslReader::new(&expected);
            assert_eq!(reader.read_varint().unwrap(), vi);
            assert_eq!(reader.remaining(), 0);
        }
    }

    #[test]
    fn test_reader_writer() {
        let mut writer = MslWriter::new();
        writer.write_u8(0x42);
        writer.write_varint(VarInt(300));
        writer.write_var_bytes(b"hello");

        let data = writer.into_bytes();
        let mut reader = MslReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_varint().unwrap(), VarInt(300));
        assert_eq!(reader.read_var_bytes().unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = MslReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(matches!(reader.read_u8(), Err(PrimitivesError::Truncated { .. })));

        // Truncated 0xfd varint.
        let mut reader = MslReader::new(&[0xfd, 0x01]);
        assert!(reader.read_varint().is_err());
    }

    #[test]
    fn test_var_bytes_length_exceeds_input() {
        // Claims 0xffff bytes but carries only two.
        let mut reader = MslReader::new(&[0xfd, 0xff, 0xff, 0x01, 0x02]);
        assert!(matches!(reader.read_var_bytes(), Err(PrimitivesError::Truncated { .. })));
    }

    #[test]
    fn test_zigzag() {
        for v in [0i64, 1, -1, 63, -64, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode(zigzag_encode(v)), v);
        }
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
    }

    #[test]
    fn test_safe_equals() {
        assert!(safe_equals(b"", b""));
        assert!(safe_equals(b"abc", b"abc"));
        assert!(!safe_equals(b"abc", b"abd"));
        assert!(!safe_equals(b"abc", b"ab"));
    }

    #[test]
    fn test_random_long_is_bounded() {
        let mut rng = rand::rngs::OsRng;
        for _ in 0..256 {
            assert!(random_long(&mut rng) < MAX_LONG_VALUE);
        }
    }

    #[test]
    fn test_random_long_masks_high_bits() {
        let mut all_ones = rand::rngs::mock::StepRng::new(u64::MAX, 0);
        assert_eq!(random_long(&mut all_ones), MAX_LONG_VALUE - 1);

        let mut exact_bound = rand::rngs::mock::StepRng::new(MAX_LONG_VALUE, 0);
        assert_eq!(random_long(&mut exact_bound), 0);

        let mut small = rand::rngs::mock::StepRng::new(42, 0);
        assert_eq!(random_long(&mut small), 42);
    }
}
