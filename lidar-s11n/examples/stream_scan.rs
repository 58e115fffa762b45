use clap::Parser;
use lidar_data::{LidarData, LidarDetection};
use lidar_s11n::{run_stream, StreamConfig};
use serde::Serialize;

/// Streams synthetic rotating scans through the serializer.
#[derive(Parser)]
struct Args {
    /// Number of lidar channels.
    #[arg(long, default_value_t = 16)]
    channels: u32,
    /// Points per channel in each measurement.
    #[arg(long, default_value_t = 32)]
    points: usize,
    /// Number of measurements to stream.
    #[arg(long, default_value_t = 10)]
    measurements: usize,
}

#[derive(Serialize)]
struct Summary {
    horizontal_angle: f32,
    channel_count: u32,
    point_counts: Vec<u32>,
    first_detection: Option<LidarDetection>,
}

fn synthetic_sweep(channels: u32, points: usize, angle: f32) -> Vec<Vec<LidarDetection>> {
    (0..channels)
        .map(|channel| {
            let elevation = (channel as f32 - channels as f32 / 2.).to_radians();
            (0..points)
                .map(|i| {
                    let azimuth = (angle + i as f32 * 0.2).to_radians();
                    let range = 10.;
                    LidarDetection::new(
                        range * elevation.cos() * azimuth.cos(),
                        range * elevation.cos() * azimuth.sin(),
                        range * elevation.sin(),
                        0.8,
                    )
                })
                .collect()
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let measurements = args.measurements;

    let (stream_threads, measurement_tx, sensor_data_rx) = run_stream((), StreamConfig::default());

    let producer = std::thread::spawn(move || {
        let step = 360. / args.measurements.max(1) as f32;
        let mut data = LidarData::new(args.channels);
        for i in 0..args.measurements {
            let angle = i as f32 * step;
            data.reset_memory(&vec![args.points as u32; args.channels as usize]);
            data.set_horizontal_angle(angle);
            data.write_point_sync(&synthetic_sweep(args.channels, args.points, angle));
            if measurement_tx.send(data.clone()).is_err() {
                break;
            }
        }
    });

    for sensor_data in sensor_data_rx.iter().take(measurements) {
        let Some(lidar) = sensor_data.as_lidar() else {
            continue;
        };
        let summary = Summary {
            horizontal_angle: lidar.horizontal_angle(),
            channel_count: lidar.channel_count(),
            point_counts: lidar.header().point_counts().collect(),
            first_detection: lidar.detections().next(),
        };
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("{e}"),
        }
    }

    producer.join().unwrap();
    drop(stream_threads);
}
