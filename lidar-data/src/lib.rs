pub mod detection;
pub mod header;
pub mod measurement;

pub use detection::LidarDetection;
pub use measurement::LidarData;
