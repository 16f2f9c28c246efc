//! LZW payload compression.
//!
//! The dictionary starts with the 256 single-byte strings and gains one
//! entry for every code emitted after the first. It never resets. Codes are
//! packed most significant bit first with no header and no end code. The
//! first code is 8 bits wide; every later code is exactly as wide as the
//! largest code the dictionary could hold when it was written.

use std::collections::HashMap;

use crate::PrimitivesError;

/// Number of single-byte dictionary entries.
const INITIAL_CODES: u32 = 256;

/// Ratio between uncompressed and compressed size accepted by default.
pub const MAX_DEFLATE_RATIO: usize = 200;

fn code_width(max_code: u32) -> u32 {
    (u32::BITS - max_code.leading_zeros()).max(8)
}

#[derive(Default)]
struct CodeWriter {
    out: Vec<u8>,
    acc: u64,
    bits: u32,
}

impl CodeWriter {
    fn write(&mut self, code: u32, width: u32) {
        self.acc = (self.acc << width) | u64::from(code);
        self.bits += width;
        while self.bits >= 8 {
            self.bits -= 8;
            self.out.push((self.acc >> self.bits) as u8);
        }
        self.acc &= (1u64 << self.bits) - 1;
    }

    fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.out.push((self.acc << (8 - self.bits)) as u8);
        }
        self.out
    }
}

struct CodeReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> CodeReader<'a> {
    /// Next `width`-bit code, or `None` once only padding remains.
    fn read(&mut self, width: u32) -> Option<u32> {
        let width = width as usize;
        if self.data.len() * 8 - self.bit_pos < width {
            return None;
        }
        let mut code = 0u32;
        for _ in 0..width {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
            code = (code << 1) | u32::from(bit);
            self.bit_pos += 1;
        }
        Some(code)
    }
}

/// Compress `data`.
///
/// Returns `None` when the compressed form would be longer than the input,
/// in which case the payload should be sent uncompressed.
pub fn compress(data: &[u8]) -> Option<Vec<u8>> {
    let Some((&first, rest)) = data.split_first() else {
        return Some(Vec::new());
    };

    let mut dictionary: HashMap<(u32, u8), u32> = HashMap::new();
    let mut next_code = INITIAL_CODES;
    let mut writer = CodeWriter::default();
    let mut current = u32::from(first);

    for &byte in rest {
        if let Some(&code) = dictionary.get(&(current, byte)) {
            current = code;
            continue;
        }
        writer.write(current, code_width(next_code - 1));
        dictionary.insert((current, byte), next_code);
        next_code += 1;
        current = u32::from(byte);
    }
    writer.write(current, code_width(next_code - 1));

    let compressed = writer.finish();
    (compressed.len() <= data.len()).then_some(compressed)
}

/// Uncompress LZW codes produced by [`compress`].
///
/// Output larger than `max_ratio` times the input is refused as soon as the
/// limit is crossed.
pub fn uncompress(codes: &[u8], max_ratio: usize) -> Result<Vec<u8>, PrimitivesError> {
    let limit = codes.len().saturating_mul(max_ratio);
    let mut reader = CodeReader { data: codes, bit_pos: 0 };
    let mut dictionary: Vec<Vec<u8>> = (0..=u8::MAX).map(|b| vec![b]).collect();
    let mut out = Vec::new();
    let mut previous: Option<usize> = None;
    let mut codes_read: u32 = 0;

    while let Some(code) = reader.read(code_width(INITIAL_CODES - 1 + codes_read)) {
        let code = code as usize;
        let entry = match (dictionary.get(code), previous) {
            (Some(entry), _) => entry.clone(),
            // The code being defined by this very step: previous + its first byte.
            (None, Some(prev)) if code == dictionary.len() => {
                let mut entry = dictionary[prev].clone();
                entry.push(dictionary[prev][0]);
                entry
            }
            _ => {
                return Err(PrimitivesError::InvalidCompressedData(format!(
                    "code {} is not in the dictionary",
                    code
                )))
            }
        };

        if out.len() + entry.len() > limit {
            return Err(PrimitivesError::CompressionRatioExceeded { limit });
        }
        out.extend_from_slice(&entry);

        if let Some(prev) = previous {
            let mut added = dictionary[prev].clone();
            added.push(entry[0]);
            dictionary.push(added);
        }
        previous = Some(code);
        codes_read += 1;
    }

    Ok(out)
}
