use criterion::{Criterion, black_box, criterion_group, criterion_main};

use arm_model::{ArmModel, ArmModelSettings, SensorFrame};
use nalgebra::{UnitQuaternion, Vector3};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;

const DELTA_TIME: f32 = 0.011; // ~90Hz headset frame rate
const GRAVITY: f32 = 9.807;

// Pre-generated sensor frames to eliminate RNG overhead during benchmarks
struct PreGeneratedFrames {
    frames: Vec<SensorFrame>,
    index: usize,
}

impl PreGeneratedFrames {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut frames = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * DELTA_TIME;

            // A user slowly sweeping the controller while glancing around
            let swing_phase = time * 0.5 * 2.0 * PI;
            let pitch = 0.6 * swing_phase.sin() + rng.random_range(-0.01..0.01);
            let yaw = 0.4 * (swing_phase * 0.7).cos() + rng.random_range(-0.01..0.01);
            let orientation = UnitQuaternion::from_euler_angles(pitch, yaw, 0.0);

            let acceleration = Vector3::new(
                2.0 * swing_phase.cos() + rng.random_range(-0.1..0.1),
                GRAVITY + rng.random_range(-0.1..0.1),
                -1.5 * swing_phase.sin() + rng.random_range(-0.1..0.1),
            );

            let gaze_phase = time * 0.2 * 2.0 * PI;
            let head_direction = Vector3::new(
                0.3 * gaze_phase.sin(),
                0.1 * (gaze_phase * 1.3).cos(),
                -1.0,
            );

            frames.push(SensorFrame {
                connected: true,
                acceleration,
                orientation,
                gyro: Vector3::new(0.0, 0.3 * gaze_phase.cos(), 0.0),
                head_direction,
                head_position: Vector3::zeros(),
                delta_time: DELTA_TIME,
            });
        }

        Self { frames, index: 0 }
    }

    fn next(&mut self) -> SensorFrame {
        let frame = self.frames[self.index];
        self.index = (self.index + 1) % self.frames.len();
        frame
    }
}

/// Benchmark the per-frame update with a stationary controller
fn bench_update_stationary(c: &mut Criterion) {
    let mut arm = ArmModel::new();
    let frame = SensorFrame {
        connected: true,
        acceleration: Vector3::new(0.0, GRAVITY, 0.0),
        head_direction: Vector3::new(0.0, 0.0, -1.0),
        delta_time: DELTA_TIME,
        ..Default::default()
    };

    c.bench_function("arm_update_stationary", |b| {
        b.iter(|| {
            arm.update(black_box(&frame));
        })
    });
}

/// Benchmark the per-frame update over realistic motion
fn bench_update_motion(c: &mut Criterion) {
    let mut arm = ArmModel::new();
    let mut data = PreGeneratedFrames::new(4096, 42);

    c.bench_function("arm_update_motion", |b| {
        b.iter(|| {
            let frame = data.next();
            arm.update(black_box(&frame));
        })
    });
}

/// Benchmark the accelerometer-assisted path
fn bench_update_accelerometer_assist(c: &mut Criterion) {
    let settings = ArmModelSettings {
        use_accelerometer: true,
        ..Default::default()
    };
    let mut arm = ArmModel::with_settings(settings);
    let mut data = PreGeneratedFrames::new(4096, 7);

    c.bench_function("arm_update_accelerometer_assist", |b| {
        b.iter(|| {
            let frame = data.next();
            arm.update(black_box(&frame));
        })
    });
}

criterion_group!(
    benches,
    bench_update_stationary,
    bench_update_motion,
    bench_update_accelerometer_assist
);
criterion_main!(benches);
