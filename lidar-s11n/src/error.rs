pub type Result<T> = std::result::Result<T, LidarS11nError>;

/// Errors reported by the checked decoding path.
///
/// The unchecked accessors never return these; they trust the producer.
#[derive(Debug, thiserror::Error)]
pub enum LidarS11nError {
    #[error("Buffer of {0} bytes cannot hold the fixed header words.")]
    HeaderTooShort(usize),

    #[error(
        "Header declares {channel_count} channels ({expected} bytes) but buffer has {actual} bytes."
    )]
    TruncatedHeader {
        channel_count: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Header declares {0} points, more than fit in memory.")]
    PointCountOverflow(u64),

    #[error("Header declares {expected} bytes of points but {actual} bytes follow it.")]
    PointsLengthMismatch { expected: u64, actual: u64 },
}
