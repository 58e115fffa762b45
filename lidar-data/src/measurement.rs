use crate::detection::LidarDetection;
use crate::header::{self, read_word, write_word, CHANNEL_COUNT, HORIZONTAL_ANGLE, SIZE};

/// One measurement of a rotating lidar, as built by the producer.
///
/// The header and the points are kept in their wire encoding so that they can
/// be handed to a serializer as two byte regions without conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct LidarData {
    header: Vec<u8>,
    points: Vec<u8>,
}

impl LidarData {
    pub fn new(channel_count: u32) -> LidarData {
        let mut header = vec![0u8; header::header_len(channel_count as usize)];
        write_word(&mut header, CHANNEL_COUNT, channel_count);
        LidarData {
            header,
            points: Vec::new(),
        }
    }

    pub fn horizontal_angle(&self) -> f32 {
        f32::from_bits(read_word(&self.header, HORIZONTAL_ANGLE))
    }

    pub fn set_horizontal_angle(&mut self, angle: f32) {
        write_word(&mut self.header, HORIZONTAL_ANGLE, angle.to_bits());
    }

    pub fn channel_count(&self) -> u32 {
        read_word(&self.header, CHANNEL_COUNT)
    }

    /// Number of points recorded for `channel`.
    ///
    /// Panics if `channel` is not below the channel count.
    pub fn point_count(&self, channel: usize) -> u32 {
        assert!(channel < self.channel_count() as usize);
        read_word(&self.header, SIZE + channel)
    }

    pub fn total_point_count(&self) -> usize {
        self.points.len() / LidarDetection::SIZE
    }

    /// Clears the points and zeroes every per-channel count.
    ///
    /// `points_per_channel` is only used to reserve room for the next sweep.
    pub fn reset_memory(&mut self, points_per_channel: &[u32]) {
        assert_eq!(points_per_channel.len(), self.channel_count() as usize);
        for channel in 0..points_per_channel.len() {
            write_word(&mut self.header, SIZE + channel, 0);
        }
        let total: usize = points_per_channel.iter().map(|&n| n as usize).sum();
        self.points.clear();
        self.points.reserve(total * LidarDetection::SIZE);
    }

    /// Writes a full sweep, one detection list per channel, in channel order.
    pub fn write_point_sync(&mut self, detections: &[Vec<LidarDetection>]) {
        assert_eq!(detections.len(), self.channel_count() as usize);
        self.points.clear();
        for (channel, channel_detections) in detections.iter().enumerate() {
            write_word(
                &mut self.header,
                SIZE + channel,
                channel_detections.len() as u32,
            );
            for detection in channel_detections {
                detection.write_to(&mut self.points);
            }
        }
    }

    /// Header region in wire encoding.
    pub fn header_bytes(&self) -> &[u8] {
        &self.header
    }

    /// Points region in wire encoding.
    pub fn points_bytes(&self) -> &[u8] {
        &self.points
    }
}
