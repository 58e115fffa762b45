use crate::raw_data::RawData;
use bytes::BytesMut;

/// Growable byte sink that serializers append to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer {
    bytes: BytesMut,
}

impl Buffer {
    pub fn new() -> Buffer {
        Buffer::default()
    }

    pub fn with_capacity(capacity: usize) -> Buffer {
        Buffer {
            bytes: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends `regions` in order with a single reservation.
    pub fn copy_from(&mut self, regions: &[&[u8]]) {
        let total: usize = regions.iter().map(|region| region.len()).sum();
        self.bytes.reserve(total);
        for region in regions {
            self.bytes.extend_from_slice(region);
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Hands the bytes over to the receiving side without copying.
    pub fn freeze(self) -> RawData {
        RawData::from(self.bytes.freeze())
    }
}
