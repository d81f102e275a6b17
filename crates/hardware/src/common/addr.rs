//! Trace address type and its decomposition.
//!
//! This module defines the address type fed to the cache and the split of an
//! address into the fields the cache works with. It provides the following:
//! 1. **Type Safety:** Distinguishes trace addresses from tags and set indices.
//! 2. **Decoding:** Splits an address into tag, set index and block offset for a geometry.
//! 3. **Reassembly:** Rebuilds the original address from its decoded fields.

use crate::config::Geometry;

/// A byte address taken from a memory-access trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub u64);

/// The fields of an [`Address`] under a particular cache geometry.
///
/// With `s` set-index bits and `b` block-offset bits:
///
/// ```text
///  63                 s+b        b          0
/// +---------------------+---------+---------+
/// |         tag         |   set   | offset  |
/// +---------------------+---------+---------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// High-order bits identifying the block held by a line.
    pub tag: u64,
    /// Middle bits selecting the set; always `< 2^s`.
    pub set_index: usize,
    /// Low-order bits addressing a byte within the block.
    ///
    /// Hits and misses are decided at block granularity, so the cache never
    /// reads this field.
    pub block_offset: u64,
}

impl Address {
    /// Creates a new address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Splits the address into tag, set index and block offset.
    ///
    /// `set_index = (addr >> b) mod 2^s` and `tag = addr >> (s + b)`.
    /// Any address is valid input; the decomposition cannot fail.
    ///
    /// # Arguments
    ///
    /// * `geometry` - The cache geometry providing `s` and `b`.
    pub fn decode(&self, geometry: &Geometry) -> DecodedAddress {
        let s = geometry.set_bits();
        let b = geometry.block_bits();

        DecodedAddress {
            tag: shr(self.0, s + b),
            set_index: (shr(self.0, b) & low_mask(s)) as usize,
            block_offset: self.0 & low_mask(b),
        }
    }
}

impl DecodedAddress {
    /// Reassembles the address these fields were decoded from.
    ///
    /// # Arguments
    ///
    /// * `geometry` - The geometry used to decode the address.
    pub fn reassemble(&self, geometry: &Geometry) -> Address {
        let s = geometry.set_bits();
        let b = geometry.block_bits();

        Address(shl(self.tag, s + b) | shl(self.set_index as u64, b) | self.block_offset)
    }
}

impl From<u64> for Address {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

/// Mask with the low `bits` bits set; `bits >= 64` yields all ones.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Logical right shift where shifting out every bit yields zero.
#[inline(always)]
const fn shr(value: u64, bits: u32) -> u64 {
    if bits >= u64::BITS { 0 } else { value >> bits }
}

/// Left shift where shifting out every bit yields zero.
#[inline(always)]
const fn shl(value: u64, bits: u32) -> u64 {
    if bits >= u64::BITS { 0 } else { value << bits }
}
