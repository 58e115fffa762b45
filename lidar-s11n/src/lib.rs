//! Serialization of rotating lidar measurements.
//!
//! A measurement travels as its header region followed by its points region:
//!
//! ```text
//! offset 0                   horizontal angle (f32 bits)
//! offset 4                   channel count
//! offset 8 + 4 * i           point count of channel i
//! offset 8 + 4 * channels    points, channel after channel
//! ```
//!
//! All words are little-endian. The format carries no version or length
//! field; [`LidarSerializer::try_deserialize`] is the opt-in path for bytes
//! that come from an untrusted producer.

mod buffer;
mod constants;
mod error;
mod header_view;
mod raw_data;
mod sensor_data;
mod serializer;
pub mod stream;

pub use crate::buffer::Buffer;
pub use crate::error::{LidarS11nError, Result};
pub use crate::header_view::LidarHeaderView;
pub use crate::raw_data::RawData;
pub use crate::sensor_data::{LidarMeasurement, SensorData, SensorKind};
pub use crate::serializer::LidarSerializer;
pub use crate::stream::{run_stream, StreamConfig, StreamThreads};
pub use lidar_data::{LidarData, LidarDetection};
