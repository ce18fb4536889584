use crate::byteparse::element_kind::ElementKind;
use crate::byteparse::endian::Endian;

/// Read an unsigned scalar of the width implied by `kind`. Fewer available
/// bytes than the width yield zero; extra bytes beyond the width are
/// ignored.
#[must_use]
pub fn decode_uint(kind: &ElementKind, endian: Endian, bytes: &[u8]) -> u64 {
    let width = match kind {
        ElementKind::U8 => 1,
        ElementKind::U16 => 2,
        ElementKind::U32 => 4,
        ElementKind::U64 => 8,
        _ => return 0,
    };
    read_uint(width, endian, bytes)
}

/// Read a signed scalar, sign-extending from the declared width. `Int`
/// picks the narrowest width covering the available bytes: 1 byte reads as
/// i8, 2-3 as i16, 4-7 as i32, 8 or more as i64.
#[must_use]
pub fn decode_int(kind: &ElementKind, endian: Endian, bytes: &[u8]) -> i64 {
    let width = match kind {
        ElementKind::I8 => 1,
        ElementKind::I16 => 2,
        ElementKind::I32 => 4,
        ElementKind::I64 => 8,
        ElementKind::Int => match bytes.len() {
            0 => return 0,
            1 => 1,
            2 | 3 => 2,
            4..=7 => 4,
            _ => 8,
        },
        _ => return 0,
    };
    read_int(width, endian, bytes)
}

fn read_uint(width: usize, endian: Endian, bytes: &[u8]) -> u64 {
    if bytes.len() < width {
        return 0;
    }
    match (width, endian) {
        (1, _) => u64::from(bytes[0]),
        (2, Endian::Big) => u64::from(u16::from_be_bytes(bytes[..2].try_into().unwrap())),
        (2, Endian::Little) => u64::from(u16::from_le_bytes(bytes[..2].try_into().unwrap())),
        (4, Endian::Big) => u64::from(u32::from_be_bytes(bytes[..4].try_into().unwrap())),
        (4, Endian::Little) => u64::from(u32::from_le_bytes(bytes[..4].try_into().unwrap())),
        (8, Endian::Big) => u64::from_be_bytes(bytes[..8].try_into().unwrap()),
        (8, Endian::Little) => u64::from_le_bytes(bytes[..8].try_into().unwrap()),
        _ => 0,
    }
}

fn read_int(width: usize, endian: Endian, bytes: &[u8]) -> i64 {
    if bytes.len() < width {
        return 0;
    }
    match (width, endian) {
        (1, _) => i64::from(bytes[0] as i8),
        (2, Endian::Big) => i64::from(i16::from_be_bytes(bytes[..2].try_into().unwrap())),
        (2, Endian::Little) => i64::from(i16::from_le_bytes(bytes[..2].try_into().unwrap())),
        (4, Endian::Big) => i64::from(i32::from_be_bytes(bytes[..4].try_into().unwrap())),
        (4, Endian::Little) => i64::from(i32::from_le_bytes(bytes[..4].try_into().unwrap())),
        (8, Endian::Big) => i64::from_be_bytes(bytes[..8].try_into().unwrap()),
        (8, Endian::Little) => i64::from_le_bytes(bytes[..8].try_into().unwrap()),
        _ => 0,
    }
}
