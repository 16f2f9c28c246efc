//! MSL binary encoding (MSLB).
//!
//! Layout:
//! - identifier byte `0xB5`
//! - object: VarInt entry count, then entries
//! - entry: VarInt-prefixed UTF-8 key, one tag byte, the value
//!
//! Value tags: bytes 1, string 2, int 3 (zigzag VarInt), bool 4,
//! object 5, array 6 (VarInt count of tagged values).

use msl_primitives::util::{zigzag_decode, zigzag_encode, MslReader, MslWriter, VarInt};

use crate::{MslEncoderError, MslEncoderFormat, MslObject, MslValue};

const TAG_BYTES: u8 = 1;
const TAG_STRING: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_BOOL: u8 = 4;
const TAG_OBJECT: u8 = 5;
const TAG_ARRAY: u8 = 6;

/// Encode an object in the binary format, identifier byte included.
pub fn encode(obj: &MslObject) -> Vec<u8> {
    let mut w = MslWriter::with_capacity(64);
    w.write_u8(MslEncoderFormat::BINARY.identifier());
    write_object(&mut w, obj);
    w.into_bytes()
}

/// Decode a binary encoding, rejecting nesting deeper than `max_depth`.
pub fn decode(data: &[u8], max_depth: usize) -> Result<MslObject, MslEncoderError> {
    let mut r = MslReader::new(data);
    let identifier = r.read_u8()?;
    if identifier != MslEncoderFormat::BINARY.identifier() {
        return Err(MslEncoderError::UnknownIdentifier(identifier));
    }
    let obj = read_object(&mut r, 1, max_depth)?;
    if r.remaining() != 0 {
        return Err(MslEncoderError::Binary(format!(
            "{} trailing bytes at offset {}",
            r.remaining(),
            r.position()
        )));
    }
    Ok(obj)
}

fn write_object(w: &mut MslWriter, obj: &MslObject) {
    w.write_varint(VarInt::from(obj.len()));
    for (key, value) in obj.iter() {
        w.write_var_bytes(key.as_bytes());
        write_value(w, value);
    }
}

fn write_value(w: &mut MslWriter, value: &MslValue) {
    match value {
        MslValue::Bytes(b) => {
            w.write_u8(TAG_BYTES);
            w.write_var_bytes(b);
        }
        MslValue::String(s) => {
            w.write_u8(TAG_STRING);
            w.write_var_bytes(s.as_bytes());
        }
        MslValue::Int(i) => {
            w.write_u8(TAG_INT);
            w.write_varint(VarInt(zigzag_encode(*i)));
        }
        MslValue::Bool(b) => {
            w.write_u8(TAG_BOOL);
            w.write_u8(u8::from(*b));
        }
        MslValue::Object(o) => {
            w.write_u8(TAG_OBJECT);
            write_object(w, o);
        }
        MslValue::Array(items) => {
            w.write_u8(TAG_ARRAY);
            w.write_varint(VarInt::from(items.len()));
            for item in items {
                write_value(w, item);
            }
        }
    }
}

/// Read an element count and make sure the input could possibly hold it.
fn read_count(r: &mut MslReader<'_>, min_item_len: usize) -> Result<usize, MslEncoderError> {
    let count = r.read_varint()?.value();
    let count = usize::try_from(count)
        .map_err(|_| MslEncoderError::Binary(format!("element count {} too large", count)))?;
    if count.saturating_mul(min_item_len) > r.remaining() {
        return Err(MslEncoderError::Binary(format!(
            "element count {} exceeds remaining {} bytes",
            count,
            r.remaining()
        )));
    }
    Ok(count)
}

fn read_object(
    r: &mut MslReader<'_>,
    depth: usize,
    max_depth: usize,
) -> Result<MslObject, MslEncoderError> {
    if depth > max_depth {
        return Err(MslEncoderError::TooDeep(max_depth));
    }
    // Smallest entry: empty key length, tag, one value byte.
    let count = read_count(r, 3)?;
    let mut obj = MslObject::new();
    for _ in 0..count {
        let key_bytes = r.read_var_bytes()?;
        let key = std::str::from_utf8(key_bytes)
            .map_err(|e| MslEncoderError::Binary(format!("key is not UTF-8: {}", e)))?;
        if obj.has(key) {
            return Err(MslEncoderError::Binary(format!("duplicate key {}", key)));
        }
        let value = read_value(r, depth, max_depth)?;
        obj.put(key, value);
    }
    Ok(obj)
}

fn read_value(
    r: &mut MslReader<'_>,
    depth: usize,
    max_depth: usize,
) -> Result<MslValue, MslEncoderError> {
    let tag = r.read_u8()?;
    match tag {
        TAG_BYTES => Ok(MslValue::Bytes(r.read_var_bytes()?.to_vec())),
        TAG_STRING => {
            let raw = r.read_var_bytes()?;
            let s = std::str::from_utf8(raw)
                .map_err(|e| MslEncoderError::Binary(format!("string is not UTF-8: {}", e)))?;
            Ok(MslValue::String(s.to_string()))
        }
        TAG_INT => Ok(MslValue::Int(zigzag_decode(r.read_varint()?.value()))),
        TAG_BOOL => match r.read_u8()? {
            0 => Ok(MslValue::Bool(false)),
            1 => Ok(MslValue::Bool(true)),
            other => Err(MslEncoderError::Binary(format!("invalid boolean byte {}", other))),
        },
        TAG_OBJECT => Ok(MslValue::Object(read_object(r, depth + 1, max_depth)?)),
        TAG_ARRAY => {
            if depth + 1 > max_depth {
                return Err(MslEncoderError::TooDeep(max_depth));
            }
            // Smallest element: tag plus one value byte.
            let count = read_count(r, 2)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(r, depth + 1, max_depth)?);
            }
            Ok(MslValue::Array(items))
        }
        other => Err(MslEncoderError::Binary(format!(
            "unknown value tag {} at offset {}",
            other,
            r.position() - 1
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MslObject {
        let mut inner = MslObject::new();
        inner.put("n", -5i64);
        let mut obj = MslObject::new();
        obj.put("bytes", vec![0u8, 255])
            .put("str", "héllo")
            .put("int", 300i64)
            .put("bool", true)
            .put("obj", inner)
            .put("arr", vec![MslValue::Int(1), MslValue::from("x")]);
        obj
    }

    #[test]
    fn test_round_trip() {
        let obj = sample();
        let encoded = encode(&obj);
        assert_eq!(encoded[0], 0xB5);
        assert_eq!(decode(&encoded, 8).unwrap(), obj);
    }

    #[test]
    fn test_known_layout() {
        let mut obj = MslObject::new();
        obj.put("a", vec![0xAAu8]);
        assert_eq!(hex::encode(encode(&obj)), "b50101610101aa");
    }

    #[test]
    fn test_rejects_truncation_everywhere() {
        let encoded = encode(&sample());
        for len in 0..encoded.len() {
            assert!(decode(&encoded[..len], 8).is_err(), "prefix of {} bytes accepted", len);
        }
    }

    #[test]
    fn test_rejects_trailing_data() {
        let mut encoded = encode(&sample());
        encoded.push(0);
        assert!(matches!(decode(&encoded, 8), Err(MslEncoderError::Binary(_))));
    }

    #[test]
    fn test_rejects_bad_tag_and_bool() {
        // {"a": <tag 9>}
        assert!(decode(&[0xB5, 0x01, 0x01, b'a', 0x09, 0x00], 8).is_err());
        // {"a": bool 2}
        assert!(decode(&[0xB5, 0x01, 0x01, b'a', TAG_BOOL, 0x02], 8).is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let data = [0xB5, 0x02, 0x01, b'a', TAG_BOOL, 0x01, 0x01, b'a', TAG_BOOL, 0x00];
        assert!(matches!(decode(&data, 8), Err(MslEncoderError::Binary(_))));
    }

    #[test]
    fn test_rejects_oversized_count() {
        let data = [0xB5, 0xfd, 0xff, 0xff, 0x00];
        assert!(matches!(decode(&data, 8), Err(MslEncoderError::Binary(_))));
    }

    #[test]
    fn test_rejects_wrong_identifier() {
        assert!(matches!(decode(b"{}", 8), Err(MslEncoderError::UnknownIdentifier(b'{'))));
    }

    #[test]
    fn test_depth_limit() {
        let obj = sample();
        assert!(decode(&encode(&obj), 2).is_ok());
        assert!(matches!(decode(&encode(&obj), 1), Err(MslEncoderError::TooDeep(1))));
    }
}
