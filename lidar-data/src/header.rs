//! Layout of the header region of a serialized lidar measurement.
//!
//! The header is a run of 32-bit little-endian words:
//!
//! ```text
//! word 0                    horizontal angle (f32 bits)
//! word 1                    channel count
//! word SIZE + channel       point count of `channel`
//! ```

/// Width in bytes of one header word.
pub const WORD_SIZE: usize = 4;

/// Word holding the raw bits of the horizontal angle.
pub const HORIZONTAL_ANGLE: usize = 0;

/// Word holding the number of channels.
pub const CHANNEL_COUNT: usize = 1;

/// Number of fixed words preceding the per-channel point counts.
pub const SIZE: usize = 2;

/// Byte length of a header describing `channel_count` channels.
pub fn header_len(channel_count: usize) -> usize {
    WORD_SIZE * (SIZE + channel_count)
}

/// Reads the word at `index`.
///
/// Panics if the word does not lie entirely inside `bytes`.
#[inline]
pub fn read_word(bytes: &[u8], index: usize) -> u32 {
    let word = &bytes[WORD_SIZE * index..WORD_SIZE * (index + 1)];
    u32::from_le_bytes([word[0], word[1], word[2], word[3]])
}

/// Overwrites the word at `index`.
#[inline]
pub fn write_word(bytes: &mut [u8], index: usize, value: u32) {
    let start = WORD_SIZE * index;
    bytes[start..start + WORD_SIZE].copy_from_slice(&value.to_le_bytes());
}
