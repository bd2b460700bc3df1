//! Incremental checksums for the CRC-trailing packet variants.

use crc::{Crc, Digest, CRC_16_IBM_3740, CRC_32_MPEG_2, CRC_8_SMBUS};

/// A byte-at-a-time checksum with a fixed-width digest.
///
/// The framing layer feeds every unescaped body byte through `update` and
/// emits the digest most-significant-byte-first. All provided algorithms are
/// non-reflected with zero xor-out, so a receiver that also runs the trailer
/// bytes through `update` reads a digest of zero exactly when the packet
/// arrived intact.
pub trait Checksum {
    /// Width of the digest in bytes.
    const WIDTH: usize;

    /// Restart the running digest for a new packet.
    fn reset(&mut self);

    /// Fold one byte into the running digest.
    fn update(&mut self, byte: u8);

    /// The current digest, in the low `WIDTH` bytes.
    fn value(&self) -> u64;
}

macro_rules! crc_checksum {
    ($(#[$doc:meta])* $name:ident, $width:ty, $bytes:expr, $table:ident, $algo:expr) => {
        static $table: Crc<$width> = Crc::<$width>::new(&$algo);

        $(#[$doc])*
        pub struct $name {
            digest: Digest<'static, $width>,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    digest: $table.digest(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Checksum for $name {
            const WIDTH: usize = $bytes;

            fn reset(&mut self) {
                self.digest = $table.digest();
            }

            fn update(&mut self, byte: u8) {
                self.digest.update(&[byte]);
            }

            fn value(&self) -> u64 {
                u64::from(self.digest.clone().finalize())
            }
        }
    };
}

crc_checksum!(
    /// CRC-8/SMBUS: poly 0x07, init 0, no reflection, xorout 0.
    Crc8Smbus,
    u8,
    1,
    CRC_8_SMBUS_TABLE,
    CRC_8_SMBUS
);

crc_checksum!(
    /// CRC-16/CCITT-FALSE (IBM-3740): poly 0x1021, init 0xFFFF,
    /// no reflection, xorout 0.
    Crc16CcittFalse,
    u16,
    2,
    CRC_16_IBM_3740_TABLE,
    CRC_16_IBM_3740
);

crc_checksum!(
    /// CRC-32/MPEG-2: poly 0x04C11DB7, init 0xFFFFFFFF,
    /// no reflection, xorout 0.
    Crc32Mpeg2,
    u32,
    4,
    CRC_32_MPEG_2_TABLE,
    CRC_32_MPEG_2
);
