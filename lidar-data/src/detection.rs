#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single point returned by a lidar ray.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LidarDetection {
    /// Position in the sensor frame, in meters.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Attenuated return strength.
    pub intensity: f32,
}

impl LidarDetection {
    /// Bytes taken by one detection in the points region.
    pub const SIZE: usize = 16;

    pub fn new(x: f32, y: f32, z: f32, intensity: f32) -> LidarDetection {
        LidarDetection { x, y, z, intensity }
    }

    /// Appends the little-endian encoding of this detection.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for value in [self.x, self.y, self.z, self.intensity] {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }

    /// Decodes a detection from the first `SIZE` bytes of `bytes`.
    pub fn read_from(bytes: &[u8]) -> LidarDetection {
        let f = |i: usize| {
            f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
        };
        LidarDetection {
            x: f(0),
            y: f(4),
            z: f(8),
            intensity: f(12),
        }
    }
}
