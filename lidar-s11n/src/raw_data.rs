use crate::buffer::Buffer;
use bytes::Bytes;

/// Immutable bytes delivered by a transport.
///
/// Clones share the same allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawData {
    bytes: Bytes,
}

impl RawData {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Bytes> for RawData {
    fn from(bytes: Bytes) -> Self {
        RawData { bytes }
    }
}

impl From<Vec<u8>> for RawData {
    fn from(bytes: Vec<u8>) -> Self {
        RawData {
            bytes: Bytes::from(bytes),
        }
    }
}

impl From<Buffer> for RawData {
    fn from(buffer: Buffer) -> Self {
        buffer.freeze()
    }
}
