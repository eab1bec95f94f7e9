// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-width little-endian scalar codec.
//!
//! Widths of 1 and 2 bytes carry unsigned values (0..=255, 0..=65535). The 4-byte width carries a
//! signed 32-bit value (counters, relative encoder positions). Booleans are a single byte where
//! only `0x01` means `true`; any other byte, including garbage, reads as `false`.
//!
//! The codec does no bounds validation. Callers pass slices of exactly `width` bytes.

/// Supported scalar widths.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Width {
    One = 1,
    Two = 2,
    Four = 4,
}

impl Width {
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Width matching a window length, if it is one the codec supports.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }
}

pub const TRUE_BYTE: u8 = 0x01;
pub const FALSE_BYTE: u8 = 0x00;

/// Write `value` into `out` as `width` little-endian bytes, truncating to the width.
#[inline]
pub fn encode(value: i32, width: Width, out: &mut [u8]) {
    let n = width.bytes();
    out[..n].copy_from_slice(&value.to_le_bytes()[..n]);
}

/// Read `width` little-endian bytes. One- and two-byte values are unsigned; four-byte values are
/// signed.
#[inline]
pub fn decode(bytes: &[u8], width: Width) -> i32 {
    match width {
        Width::One => bytes[0] as i32,
        Width::Two => u16::from_le_bytes([bytes[0], bytes[1]]) as i32,
        Width::Four => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    }
}

#[inline]
pub fn encode_bool(value: bool) -> u8 {
    if value {
        TRUE_BYTE
    } else {
        FALSE_BYTE
    }
}

/// Permissive boolean decode: only `0x01` is `true`.
#[inline]
pub fn decode_bool(byte: u8) -> bool {
    byte == TRUE_BYTE
}
