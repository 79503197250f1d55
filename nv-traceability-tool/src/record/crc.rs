/// CRC32 using the IEEE 802.3 polynomial (0xEDB88320, bit-reversed 0x04C11DB7).
///
/// `init` is the CRC of the preceding data, `0` for a new checksum, which makes the result
/// identical to zlib's `crc32()`.
pub fn crc32(init: u32, data: &[u8]) -> u32 {
    let mut crc: u32 = !init;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB88320;
            } else {
                crc >>= 1;
            }
        }
    }

    !crc
}

/// Software checksum provider used to seal and verify images on the host.
pub struct SoftCrc;

impl nv_traceability::platform::Crc for SoftCrc {
    fn crc32(init: u32, data: &[u8]) -> u32 {
        crc32(init, data)
    }
}
