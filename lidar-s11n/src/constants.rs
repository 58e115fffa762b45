use std::time::Duration;

// Measurements waiting to be serialized.
pub(crate) const MEASUREMENT_CHANNEL_CAPACITY: usize = 10;
// Serialized buffers in flight between the two stream threads.
pub(crate) const TRANSPORT_CHANNEL_CAPACITY: usize = 200;
// Decoded measurements waiting for the consumer.
pub(crate) const SENSOR_DATA_CHANNEL_CAPACITY: usize = 10;
pub(crate) const TERMINATOR_CHANNEL_CAPACITY: usize = 10;
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);
