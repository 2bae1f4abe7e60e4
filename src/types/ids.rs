//! Random identifier generation.
//!
//! Ids are `"<prefix>-<hex>"` where the hex part is a 16-bit value drawn from
//! the operating system's secure random source. There is no collision check:
//! only 65536 suffixes exist per prefix, and the storage primary key is what
//! rejects a duplicate.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, TracksError};

/// Generates a new id for the given prefix using the OS random source.
pub fn next_id(prefix: &str) -> Result<String> {
    next_id_with(&mut OsRng, prefix)
}

/// Generates a new id drawing its two random bytes from `rng`.
pub fn next_id_with<R: RngCore + ?Sized>(rng: &mut R, prefix: &str) -> Result<String> {
    let mut bytes = [0u8; 2];
    rng.try_fill_bytes(&mut bytes).map_err(TracksError::random_source)?;
    Ok(format_id(prefix, u16::from_be_bytes(bytes)))
}

/// Formats an id as `"{prefix}-{value}"` with the value in unpadded lowercase hex.
pub fn format_id(prefix: &str, value: u16) -> String {
    format!("{}-{:x}", prefix, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    /// Hands out the same two bytes on every call.
    struct FixedBytes([u8; 2]);

    impl RngCore for FixedBytes {
        fn next_u32(&mut self) -> u32 {
            u32::from(u16::from_be_bytes(self.0))
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (i, b) in dest.iter_mut().enumerate() {
                *b = self.0[i % 2];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// A random source that is always exhausted.
    struct BrokenSource;

    impl RngCore for BrokenSource {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy source unavailable",
            )))
        }
    }

    fn has_id_format(id: &str, prefix: &str) -> bool {
        let Some(suffix) = id.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')) else {
            return false;
        };
        (1..=4).contains(&suffix.len())
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn bytes_combine_big_endian() {
        let id = next_id_with(&mut FixedBytes([0x1a, 0x2b]), "track").unwrap();
        assert_eq!(id, "track-1a2b");
    }

    #[test]
    fn no_leading_zero_padding() {
        assert_eq!(next_id_with(&mut FixedBytes([0x00, 0x0f]), "track").unwrap(), "track-f");
        assert_eq!(next_id_with(&mut FixedBytes([0x00, 0x00]), "track").unwrap(), "track-0");
        assert_eq!(next_id_with(&mut FixedBytes([0x01, 0x00]), "track").unwrap(), "track-100");
        assert_eq!(next_id_with(&mut FixedBytes([0xff, 0xff]), "track").unwrap(), "track-ffff");
    }

    #[test]
    fn every_value_matches_format() {
        for value in 0..=u16::MAX {
            let id = format_id("track", value);
            assert!(has_id_format(&id, "track"), "bad id {}", id);
            let suffix = id.trim_start_matches("track-");
            assert_eq!(u16::from_str_radix(suffix, 16).unwrap(), value);
        }
    }

    #[test]
    fn broken_source_is_reported() {
        let err = next_id_with(&mut BrokenSource, "track").unwrap_err();
        assert!(err.is(ErrorCode::RandomSource));
        assert!(err.to_string().contains("entropy source unavailable"));
    }

    #[test]
    fn os_ids_match_format() {
        for _ in 0..1000 {
            let id = next_id("track").unwrap();
            assert!(has_id_format(&id, "track"), "bad id {}", id);
        }
    }

    #[test]
    fn os_ids_spread_over_full_range() {
        // 16 buckets keyed on the top nibble; 1250 expected per bucket.
        const SAMPLES: usize = 20_000;
        let mut buckets = [0usize; 16];
        for _ in 0..SAMPLES {
            let id = next_id("t").unwrap();
            let value = u16::from_str_radix(&id[2..], 16).unwrap();
            buckets[usize::from(value >> 12)] += 1;
        }
        for (nibble, count) in buckets.iter().enumerate() {
            assert!(
                (900..=1600).contains(count),
                "bucket {:x} has {} samples",
                nibble,
                count
            );
        }
    }
}
