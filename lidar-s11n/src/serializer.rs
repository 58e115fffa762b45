use crate::buffer::Buffer;
use crate::error::{LidarS11nError, Result};
use crate::header_view::LidarHeaderView;
use crate::raw_data::RawData;
use crate::sensor_data::{LidarMeasurement, SensorData};
use lidar_data::{LidarData, LidarDetection};

/// Serializes the data generated by lidar sensors.
///
/// The serialized form is the header region of [`LidarData`] immediately
/// followed by its points region. Nothing else is written, so the header is
/// the only source for the length of the points region.
pub struct LidarSerializer;

impl LidarSerializer {
    pub fn deserialize_header(data: &RawData) -> LidarHeaderView<'_> {
        LidarHeaderView::new(data.as_bytes())
    }

    /// Offset of the points region inside `data`.
    pub fn header_offset(data: &RawData) -> usize {
        Self::deserialize_header(data).header_len()
    }

    /// Appends `data` to `output`.
    ///
    /// `sensor` describes the producer and is not part of the lidar encoding.
    pub fn serialize<S: ?Sized>(_sensor: &S, data: &LidarData, mut output: Buffer) -> Buffer {
        output.copy_from(&[data.header_bytes(), data.points_bytes()]);
        output
    }

    /// Takes ownership of received bytes without inspecting them.
    pub fn deserialize(data: RawData) -> SensorData {
        SensorData::Lidar(LidarMeasurement::new(data))
    }

    /// Like [`LidarSerializer::deserialize`], but rejects bytes whose header
    /// does not fit or whose points region disagrees with the header counts.
    pub fn try_deserialize(data: RawData) -> Result<SensorData> {
        let header = LidarHeaderView::try_new(data.as_bytes())?;
        let total_point_count = header.total_point_count();
        let expected = points_len(total_point_count)
            .ok_or(LidarS11nError::PointCountOverflow(total_point_count))?;
        let actual = (data.len() - header.header_len()) as u64;
        if expected != actual {
            return Err(LidarS11nError::PointsLengthMismatch { expected, actual });
        }
        Ok(Self::deserialize(data))
    }
}

// Byte length of `total_point_count` detections, if it fits in memory.
fn points_len(total_point_count: u64) -> Option<u64> {
    total_point_count
        .checked_mul(LidarDetection::SIZE as u64)
        .filter(|&len| usize::try_from(len).is_ok())
}
