// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-device views into the command and sensor frames.
//!
//! A device never sees a whole frame, only its own window. All accessors are bounds checked:
//! reads past the end of a window come back as zero and writes past the end are dropped.

use core::ops::Range;

use super::codec::{self, Width};

/// Byte range a device owns inside a frame.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Window {
    pub offset: usize,
    pub width: usize,
}

impl Window {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Read-only window into a completed command frame.
#[derive(Copy, Clone, Debug)]
pub struct CommandWindow<'a> {
    bytes: &'a [u8],
}

impl<'a> CommandWindow<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// First byte as a boolean. Anything other than `0x01` is `false`.
    #[inline]
    pub fn flag(&self) -> bool {
        self.bytes.first().copied().is_some_and(codec::decode_bool)
    }

    #[inline]
    pub fn u8(&self) -> u8 {
        self.bytes.first().copied().unwrap_or(0)
    }

    pub fn u16(&self) -> u16 {
        codec::decode(&self.padded::<2>(), Width::Two) as u16
    }

    pub fn i32(&self) -> i32 {
        codec::decode(&self.padded::<4>(), Width::Four)
    }

    /// Decode the window at its own width, if the codec supports that width.
    pub fn value(&self) -> Option<i32> {
        Width::from_len(self.len()).map(|w| codec::decode(self.bytes, w))
    }

    fn padded<const N: usize>(&self) -> [u8; N] {
        let mut out = [0u8; N];
        let n = self.bytes.len().min(N);
        out[..n].copy_from_slice(&self.bytes[..n]);
        out
    }
}

/// Writable window into the outgoing sensor frame.
#[derive(Debug)]
pub struct SensorWindow<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SensorWindow<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.bytes
    }

    pub fn put_flag(&mut self, value: bool) {
        self.put_le(&[codec::encode_bool(value)]);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.put_le(&[value]);
    }

    pub fn put_u16(&mut self, value: u16) {
        let mut raw = [0u8; 2];
        codec::encode(value as i32, Width::Two, &mut raw);
        self.put_le(&raw);
    }

    pub fn put_i32(&mut self, value: i32) {
        let mut raw = [0u8; 4];
        codec::encode(value, Width::Four, &mut raw);
        self.put_le(&raw);
    }

    /// Copy `raw` into the window. Bytes that do not fit are dropped and the rest of the window
    /// is zeroed.
    pub fn put_bytes(&mut self, raw: &[u8]) {
        self.put_le(raw);
    }

    fn put_le(&mut self, raw: &[u8]) {
        let n = raw.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&raw[..n]);
        self.bytes[n..].fill(0);
    }
}
