use crate::header_view::LidarHeaderView;
use crate::raw_data::RawData;
use lidar_data::LidarDetection;

/// Kind of sensor a piece of [`SensorData`] originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Lidar,
}

/// Deserialized sensor output, tagged by the sensor that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SensorData {
    Lidar(LidarMeasurement),
}

impl SensorData {
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorData::Lidar(_) => SensorKind::Lidar,
        }
    }

    pub fn as_lidar(&self) -> Option<&LidarMeasurement> {
        match self {
            SensorData::Lidar(measurement) => Some(measurement),
        }
    }

    pub fn into_lidar(self) -> Option<LidarMeasurement> {
        match self {
            SensorData::Lidar(measurement) => Some(measurement),
        }
    }
}

/// A received lidar measurement.
///
/// Owns the serialized bytes and decodes the header and the points from them
/// on every access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LidarMeasurement {
    data: RawData,
}

impl LidarMeasurement {
    pub(crate) fn new(data: RawData) -> LidarMeasurement {
        LidarMeasurement { data }
    }

    pub fn header(&self) -> LidarHeaderView<'_> {
        LidarHeaderView::new(self.data.as_bytes())
    }

    pub fn horizontal_angle(&self) -> f32 {
        self.header().horizontal_angle()
    }

    pub fn channel_count(&self) -> u32 {
        self.header().channel_count()
    }

    /// Number of detections of `channel`.
    ///
    /// Panics if `channel` is not below the channel count.
    pub fn point_count(&self, channel: usize) -> u32 {
        self.check_channel(channel);
        self.header().point_count(channel)
    }

    /// Total number of detections over all channels.
    pub fn len(&self) -> usize {
        self.points_bytes().len() / LidarDetection::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points_bytes(&self) -> &[u8] {
        &self.data.as_bytes()[self.header().header_len()..]
    }

    /// Detections of every channel, in channel order.
    pub fn detections(&self) -> impl Iterator<Item = LidarDetection> + '_ {
        self.points_bytes()
            .chunks_exact(LidarDetection::SIZE)
            .map(LidarDetection::read_from)
    }

    /// Detections of a single channel.
    ///
    /// Panics if `channel` is not below the channel count.
    pub fn channel_detections(
        &self,
        channel: usize,
    ) -> impl Iterator<Item = LidarDetection> + '_ {
        self.check_channel(channel);
        let header = self.header();
        let skipped: usize = (0..channel)
            .map(|c| header.point_count(c) as usize)
            .sum();
        let count = header.point_count(channel) as usize;
        let start = skipped * LidarDetection::SIZE;
        let end = start + count * LidarDetection::SIZE;
        self.points_bytes()[start..end]
            .chunks_exact(LidarDetection::SIZE)
            .map(LidarDetection::read_from)
    }

    pub fn raw_data(&self) -> &RawData {
        &self.data
    }

    pub fn into_raw_data(self) -> RawData {
        self.data
    }

    fn check_channel(&self, channel: usize) {
        let channel_count = self.channel_count();
        assert!(
            channel < channel_count as usize,
            "channel {channel} out of range for {channel_count} channels"
        );
    }
}
