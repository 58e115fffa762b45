use crate::error::{LidarS11nError, Result};
use lidar_data::header::{
    header_len, read_word, CHANNEL_COUNT, HORIZONTAL_ANGLE, SIZE, WORD_SIZE,
};

/// A view over the header of a serialized lidar measurement.
///
/// The view borrows the bytes it decodes and never copies them, so it cannot
/// outlive the buffer it was built from.
#[derive(Clone, Copy, Debug)]
pub struct LidarHeaderView<'a> {
    bytes: &'a [u8],
}

impl<'a> LidarHeaderView<'a> {
    /// Wraps `bytes`, trusting that they start with a complete header.
    pub fn new(bytes: &'a [u8]) -> LidarHeaderView<'a> {
        debug_assert!(bytes.len() >= WORD_SIZE * SIZE);
        LidarHeaderView { bytes }
    }

    /// Wraps `bytes` after checking that the whole header, including every
    /// per-channel point count, lies inside them.
    pub fn try_new(bytes: &'a [u8]) -> Result<LidarHeaderView<'a>> {
        if bytes.len() < WORD_SIZE * SIZE {
            return Err(LidarS11nError::HeaderTooShort(bytes.len()));
        }
        let view = LidarHeaderView { bytes };
        let channel_count = view.channel_count();
        let expected = header_len(channel_count as usize);
        if bytes.len() < expected {
            return Err(LidarS11nError::TruncatedHeader {
                channel_count,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(view)
    }

    pub fn horizontal_angle(&self) -> f32 {
        f32::from_bits(read_word(self.bytes, HORIZONTAL_ANGLE))
    }

    pub fn channel_count(&self) -> u32 {
        read_word(self.bytes, CHANNEL_COUNT)
    }

    pub fn point_count(&self, channel: usize) -> u32 {
        debug_assert!(channel < self.channel_count() as usize);
        read_word(self.bytes, SIZE + channel)
    }

    pub fn try_point_count(&self, channel: usize) -> Option<u32> {
        if channel >= self.channel_count() as usize {
            return None;
        }
        let end = WORD_SIZE * (SIZE + channel + 1);
        if self.bytes.len() < end {
            return None;
        }
        Some(read_word(self.bytes, SIZE + channel))
    }

    /// Byte length of the header, i.e. where the points region starts.
    pub fn header_len(&self) -> usize {
        header_len(self.channel_count() as usize)
    }

    pub fn point_counts(&self) -> impl Iterator<Item = u32> + 'a {
        let view = *self;
        (0..view.channel_count() as usize).map(move |channel| view.point_count(channel))
    }

    pub fn total_point_count(&self) -> u64 {
        self.point_counts().map(u64::from).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(angle: f32, counts: &[u32]) -> Vec<u8> {
        let mut words = vec![angle.to_bits(), counts.len() as u32];
        words.extend_from_slice(counts);
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_fields() {
        let bytes = header(90., &[3, 0, 5]);
        let view = LidarHeaderView::new(&bytes);
        assert_eq!(view.horizontal_angle(), 90.);
        assert_eq!(view.channel_count(), 3);
        assert_eq!(view.point_count(0), 3);
        assert_eq!(view.point_count(1), 0);
        assert_eq!(view.point_count(2), 5);
        assert_eq!(view.header_len(), 20);
        assert_eq!(view.point_counts().collect::<Vec<_>>(), vec![3, 0, 5]);
        assert_eq!(view.total_point_count(), 8);
    }

    #[test]
    fn test_angle_bits_pass_through() {
        let nan = f32::from_bits(0x7FC0_0001);
        let bytes = header(nan, &[]);
        let view = LidarHeaderView::new(&bytes);
        assert_eq!(view.horizontal_angle().to_bits(), 0x7FC0_0001);

        let bytes = header(-0.0, &[]);
        assert_eq!(
            LidarHeaderView::new(&bytes).horizontal_angle().to_bits(),
            (-0.0f32).to_bits()
        );
    }

    #[test]
    fn test_zero_channels() {
        let bytes = header(1.5, &[]);
        let view = LidarHeaderView::try_new(&bytes).unwrap();
        assert_eq!(view.channel_count(), 0);
        assert_eq!(view.header_len(), 8);
        assert_eq!(view.point_counts().count(), 0);
        assert_eq!(view.try_point_count(0), None);
    }

    #[test]
    fn test_distinct_buffers_do_not_alias() {
        let a = header(10., &[1, 2]);
        let b = header(20., &[7, 8, 9]);
        let view_a = LidarHeaderView::new(&a);
        let view_b = LidarHeaderView::new(&b);
        assert_eq!(view_a.horizontal_angle(), 10.);
        assert_eq!(view_b.horizontal_angle(), 20.);
        assert_eq!(view_a.channel_count(), 2);
        assert_eq!(view_b.channel_count(), 3);
        assert_eq!(view_a.point_count(1), 2);
        assert_eq!(view_b.point_count(1), 8);
    }

    #[test]
    fn test_try_new() {
        assert!(matches!(
            LidarHeaderView::try_new(&[0u8; 7]),
            Err(LidarS11nError::HeaderTooShort(7))
        ));

        let bytes = header(0., &[4, 4, 4]);
        assert!(matches!(
            LidarHeaderView::try_new(&bytes[..16]),
            Err(LidarS11nError::TruncatedHeader {
                channel_count: 3,
                expected: 20,
                actual: 16
            })
        ));
        assert!(LidarHeaderView::try_new(&bytes).is_ok());
    }

    #[test]
    fn test_try_point_count() {
        let bytes = header(0., &[6, 2]);
        let view = LidarHeaderView::new(&bytes);
        assert_eq!(view.try_point_count(0), Some(6));
        assert_eq!(view.try_point_count(1), Some(2));
        assert_eq!(view.try_point_count(2), None);

        // Channel count claims more words than the buffer holds.
        let view = LidarHeaderView::new(&bytes[..12]);
        assert_eq!(view.try_point_count(0), Some(6));
        assert_eq!(view.try_point_count(1), None);
    }

    #[test]
    #[should_panic]
    fn test_point_count_out_of_range() {
        let bytes = header(0., &[1]);
        LidarHeaderView::new(&bytes).point_count(1);
    }
}
