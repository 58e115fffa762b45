use crate::buffer::Buffer;
use crate::constants::{
    MEASUREMENT_CHANNEL_CAPACITY, POLL_INTERVAL, SENSOR_DATA_CHANNEL_CAPACITY,
    TERMINATOR_CHANNEL_CAPACITY, TRANSPORT_CHANNEL_CAPACITY,
};
use crate::raw_data::RawData;
use crate::sensor_data::SensorData;
use crate::serializer::LidarSerializer;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use lidar_data::LidarData;
use std::thread::JoinHandle;
use std::time::Duration;

/// Channel sizes and polling period of a sensor stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    pub measurement_capacity: usize,
    pub transport_capacity: usize,
    pub sensor_data_capacity: usize,
    /// How long a thread waits for input before checking for termination.
    pub poll_interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            measurement_capacity: MEASUREMENT_CHANNEL_CAPACITY,
            transport_capacity: TRANSPORT_CHANNEL_CAPACITY,
            sensor_data_capacity: SENSOR_DATA_CHANNEL_CAPACITY,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Struct that contains stream threads.
pub struct StreamThreads {
    pub(crate) serializer_terminator_tx: Sender<bool>,
    pub(crate) deserializer_terminator_tx: Sender<bool>,
    pub(crate) serializer_thread: Option<JoinHandle<()>>,
    pub(crate) deserializer_thread: Option<JoinHandle<()>>,
}

/// Launches a stream that serializes every measurement sent to it and hands
/// the deserialized result to the returned receiver.
///
/// # Arguments
///
/// * `sensor` - Producer passed to [`LidarSerializer::serialize`].
/// * `config` - Channel sizes and polling period.
pub fn run_stream<S>(
    sensor: S,
    config: StreamConfig,
) -> (StreamThreads, Sender<LidarData>, Receiver<SensorData>)
where
    S: Send + 'static,
{
    let (serializer_terminator_tx, serializer_terminator_rx) =
        bounded(TERMINATOR_CHANNEL_CAPACITY);
    let (deserializer_terminator_tx, deserializer_terminator_rx) =
        bounded(TERMINATOR_CHANNEL_CAPACITY);
    let (measurement_tx, measurement_rx) = bounded::<LidarData>(config.measurement_capacity);
    let (transport_tx, transport_rx) = bounded::<RawData>(config.transport_capacity);
    let (sensor_data_tx, sensor_data_rx) = bounded::<SensorData>(config.sensor_data_capacity);

    let poll_interval = config.poll_interval;
    let serializer_thread = Some(std::thread::spawn(move || {
        serialize_measurements(
            &sensor,
            measurement_rx,
            transport_tx,
            serializer_terminator_rx,
            poll_interval,
        );
    }));

    let deserializer_thread = Some(std::thread::spawn(move || {
        deserialize_measurements(
            transport_rx,
            sensor_data_tx,
            deserializer_terminator_rx,
            poll_interval,
        );
    }));

    let stream_threads = StreamThreads {
        serializer_terminator_tx,
        deserializer_terminator_tx,
        serializer_thread,
        deserializer_thread,
    };

    (stream_threads, measurement_tx, sensor_data_rx)
}

pub(crate) fn serialize_measurements<S>(
    sensor: &S,
    measurement_rx: Receiver<LidarData>,
    transport_tx: Sender<RawData>,
    terminator_rx: Receiver<bool>,
    poll_interval: Duration,
) {
    log::debug!("Serializer thread started");
    while !do_terminate(&terminator_rx) {
        let data = match measurement_rx.recv_timeout(poll_interval) {
            Ok(data) => data,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let capacity = data.header_bytes().len() + data.points_bytes().len();
        let buffer = LidarSerializer::serialize(sensor, &data, Buffer::with_capacity(capacity));
        if !forward(&transport_tx, buffer.freeze(), &terminator_rx, poll_interval) {
            break;
        }
    }
    log::debug!("Serializer thread stopped");
}

pub(crate) fn deserialize_measurements(
    transport_rx: Receiver<RawData>,
    sensor_data_tx: Sender<SensorData>,
    terminator_rx: Receiver<bool>,
    poll_interval: Duration,
) {
    log::debug!("Deserializer thread started");
    while !do_terminate(&terminator_rx) {
        let raw = match transport_rx.recv_timeout(poll_interval) {
            Ok(raw) => raw,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let data = LidarSerializer::deserialize(raw);
        if !forward(&sensor_data_tx, data, &terminator_rx, poll_interval) {
            break;
        }
    }
    log::debug!("Deserializer thread stopped");
}

// Blocks until `item` is sent. Returns false if the stream must stop instead.
fn forward<T>(
    tx: &Sender<T>,
    mut item: T,
    terminator_rx: &Receiver<bool>,
    poll_interval: Duration,
) -> bool {
    loop {
        match tx.send_timeout(item, poll_interval) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(unsent)) => {
                if do_terminate(terminator_rx) {
                    log::warn!("Stream terminated with a measurement in flight");
                    return false;
                }
                item = unsent;
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                log::warn!("Receiver disconnected, dropping measurement");
                return false;
            }
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join stream threads.
/// This function is automatically called when `stream_threads` is dropped.
pub fn join(stream_threads: &mut StreamThreads) {
    // Threads that already exited have dropped their receivers.
    let _ = stream_threads.serializer_terminator_tx.send(true);
    let _ = stream_threads.deserializer_terminator_tx.send(true);

    for thread in [
        stream_threads.serializer_thread.take(),
        stream_threads.deserializer_thread.take(),
    ]
    .into_iter()
    .flatten()
    {
        if thread.join().is_err() {
            log::error!("Stream thread panicked");
        }
    }
}

impl Drop for StreamThreads {
    fn drop(&mut self) {
        join(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_data::SensorKind;
    use lidar_data::LidarDetection;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn measurement(angle: f32, counts: &[usize]) -> LidarData {
        let mut data = LidarData::new(counts.len() as u32);
        data.set_horizontal_angle(angle);
        let sweep: Vec<Vec<LidarDetection>> = counts
            .iter()
            .map(|&n| vec![LidarDetection::new(angle, 0., 0., 1.); n])
            .collect();
        data.write_point_sync(&sweep);
        data
    }

    #[test]
    fn test_stream_round_trip() {
        init_logger();
        let (threads, measurement_tx, sensor_data_rx) = run_stream((), StreamConfig::default());

        for i in 0..20 {
            measurement_tx
                .send(measurement(i as f32 * 18., &[i % 3, 1, 0]))
                .unwrap();
        }

        for i in 0..20 {
            let data = sensor_data_rx.recv().unwrap();
            assert_eq!(data.kind(), SensorKind::Lidar);
            let lidar = data.into_lidar().unwrap();
            assert_eq!(lidar.horizontal_angle(), i as f32 * 18.);
            assert_eq!(lidar.channel_count(), 3);
            assert_eq!(lidar.point_count(0), (i % 3) as u32);
            assert_eq!(lidar.point_count(1), 1);
            assert_eq!(lidar.point_count(2), 0);
            assert_eq!(lidar.len(), i % 3 + 1);
        }

        drop(threads);
    }

    #[test]
    fn test_stream_stops_when_producer_disconnects() {
        init_logger();
        let config = StreamConfig {
            poll_interval: Duration::from_millis(1),
            ..StreamConfig::default()
        };
        let (mut threads, measurement_tx, sensor_data_rx) = run_stream((), config);
        measurement_tx.send(measurement(1., &[2])).unwrap();
        drop(measurement_tx);

        assert_eq!(sensor_data_rx.recv().unwrap().as_lidar().unwrap().len(), 2);
        // Both threads exit on their own, closing the output channel.
        assert!(sensor_data_rx.recv().is_err());

        join(&mut threads);
        assert!(threads.serializer_thread.is_none());
        assert!(threads.deserializer_thread.is_none());
    }

    #[test]
    fn test_drop_joins_idle_threads() {
        init_logger();
        let (threads, _measurement_tx, _sensor_data_rx) =
            run_stream((), StreamConfig::default());
        drop(threads);
    }

    #[test]
    fn test_drop_with_unread_output() {
        init_logger();
        let config = StreamConfig {
            sensor_data_capacity: 1,
            ..StreamConfig::default()
        };
        let (threads, measurement_tx, sensor_data_rx) = run_stream((), config);
        for _ in 0..5 {
            measurement_tx.send(measurement(0., &[1])).unwrap();
        }
        // The first measurement fills the output channel and the rest stay
        // queued; dropping must not wait for a reader.
        let first = sensor_data_rx.recv().unwrap();
        assert_eq!(first.as_lidar().unwrap().channel_count(), 1);
        drop(threads);
    }

    #[test]
    fn test_do_terminate() {
        let (tx, rx) = bounded(1);
        assert!(!do_terminate(&rx));
        tx.send(true).unwrap();
        assert!(do_terminate(&rx));
    }
}
