//! Pixel packing for rotated blits
//!
//! A rotated blit walks a shadow column, so consecutive destination pixels
//! come from different shadow scanlines. Each packer gathers one group of
//! vertically adjacent pixels and assembles them into whole 32-bit stores.
//!
//! Stores are written little-endian, which makes the resulting memory image
//! identical to copying the same pixels one by one.

use hal::PixelDepth;

/// Packs a group of shadow pixels into 32-bit stores
pub trait PixelPacking {
    /// Depth this packer handles
    const DEPTH: PixelDepth;

    /// Pixels per group; equals `DEPTH.group_size()`
    const GROUP: usize;

    /// Stores produced for one group
    type Words: AsRef<[u32]>;

    /// Gathers `GROUP` pixels and packs them
    ///
    /// `at(k)` is the byte offset in `src` of the k-th pixel of the group,
    /// in destination order.
    fn pack(src: &[u8], at: impl Fn(usize) -> usize) -> Self::Words;
}

/// 8 bpp: four samples per store
#[derive(Debug, Clone, Copy)]
pub struct Packed8;

/// 16 bpp: two samples per store
#[derive(Debug, Clone, Copy)]
pub struct Packed16;

/// 24 bpp: four 3-byte pixels across three stores
#[derive(Debug, Clone, Copy)]
pub struct Packed24;

/// 32 bpp: one pixel per store
#[derive(Debug, Clone, Copy)]
pub struct Packed32;

impl PixelPacking for Packed8 {
    const DEPTH: PixelDepth = PixelDepth::Depth8;
    const GROUP: usize = 4;
    type Words = [u32; 1];

    #[inline]
    fn pack(src: &[u8], at: impl Fn(usize) -> usize) -> Self::Words {
        [u32::from(src[at(0)])
            | u32::from(src[at(1)]) << 8
            | u32::from(src[at(2)]) << 16
            | u32::from(src[at(3)]) << 24]
    }
}

impl PixelPacking for Packed16 {
    const DEPTH: PixelDepth = PixelDepth::Depth16;
    const GROUP: usize = 2;
    type Words = [u32; 1];

    #[inline]
    fn pack(src: &[u8], at: impl Fn(usize) -> usize) -> Self::Words {
        let sample = |k: usize| {
            let a = at(k);
            u32::from(u16::from_le_bytes([src[a], src[a + 1]]))
        };
        [sample(0) | sample(1) << 16]
    }
}

impl PixelPacking for Packed24 {
    const DEPTH: PixelDepth = PixelDepth::Depth24;
    const GROUP: usize = 4;
    type Words = [u32; 3];

    #[inline]
    fn pack(src: &[u8], at: impl Fn(usize) -> usize) -> Self::Words {
        let pixel = |k: usize| {
            let a = at(k);
            [
                u32::from(src[a]),
                u32::from(src[a + 1]),
                u32::from(src[a + 2]),
            ]
        };
        let p0 = pixel(0);
        let p1 = pixel(1);
        let p2 = pixel(2);
        let p3 = pixel(3);

        // Pixel boundaries fall inside the stores: 3+1, 2+2, 1+3 bytes
        [
            p0[0] | p0[1] << 8 | p0[2] << 16 | p1[0] << 24,
            p1[1] | p1[2] << 8 | p2[0] << 16 | p2[1] << 24,
            p2[2] | p3[0] << 8 | p3[1] << 16 | p3[2] << 24,
        ]
    }
}

impl PixelPacking for Packed32 {
    const DEPTH: PixelDepth = PixelDepth::Depth32;
    const GROUP: usize = 1;
    type Words = [u32; 1];

    #[inline]
    fn pack(src: &[u8], at: impl Fn(usize) -> usize) -> Self::Words {
        let a = at(0);
        [u32::from_le_bytes([src[a], src[a + 1], src[a + 2], src[a + 3]])]
    }
}

/// Writes packed stores to `dst` starting at byte `offset`
#[inline]
pub(crate) fn store(dst: &mut [u8], offset: usize, words: &[u32]) {
    for (i, word) in words.iter().enumerate() {
        let at = offset + i * 4;
        dst[at..at + 4].copy_from_slice(&word.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_bytes<P: PixelPacking>(src: &[u8], offsets: &[usize]) -> Vec<u8> {
        let words = P::pack(src, |k| offsets[k]);
        let words = words.as_ref();
        let mut out = vec![0u8; words.len() * 4];
        store(&mut out, 0, words);
        out
    }

    #[test]
    fn test_group_sizes_match_depth() {
        assert_eq!(Packed8::GROUP, Packed8::DEPTH.group_size());
        assert_eq!(Packed16::GROUP, Packed16::DEPTH.group_size());
        assert_eq!(Packed24::GROUP, Packed24::DEPTH.group_size());
        assert_eq!(Packed32::GROUP, Packed32::DEPTH.group_size());
    }

    #[test]
    fn test_pack8_order() {
        // Samples scattered through the source, gathered in group order
        let src = [0x11, 0xAA, 0x22, 0xBB, 0x33, 0xCC, 0x44];
        assert_eq!(Packed8::pack(&src, |k| k * 2), [0x4433_2211]);
        assert_eq!(packed_bytes::<Packed8>(&src, &[6, 4, 2, 0]), [0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn test_pack16_keeps_sample_bytes() {
        let src = [0x34, 0x12, 0xFF, 0xFF, 0x78, 0x56];
        assert_eq!(Packed16::pack(&src, |k| k * 4), [0x5678_1234]);
        assert_eq!(
            packed_bytes::<Packed16>(&src, &[0, 4]),
            [0x34, 0x12, 0x78, 0x56]
        );
    }

    #[test]
    fn test_pack24_reassembles_pixels() {
        // Four pixels, each on its own 8-byte "scanline"
        let mut src = vec![0u8; 32];
        for k in 0..4 {
            for b in 0..3 {
                src[k * 8 + b] = (k * 16 + b + 1) as u8;
            }
        }
        let bytes = packed_bytes::<Packed24>(&src, &[0, 8, 16, 24]);
        assert_eq!(
            bytes,
            [0x01, 0x02, 0x03, 0x11, 0x12, 0x13, 0x21, 0x22, 0x23, 0x31, 0x32, 0x33]
        );
    }

    #[test]
    fn test_pack32_is_identity() {
        let src = [0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(packed_bytes::<Packed32>(&src, &[0]), src);
    }

    #[test]
    fn test_store_little_endian() {
        let mut dst = [0u8; 10];
        store(&mut dst, 2, &[0x0403_0201, 0x0807_0605]);
        assert_eq!(dst, [0, 0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
