use arm_model::{ArmModel, SensorFrame};
use nalgebra::{UnitQuaternion, Vector3};

const DELTA_TIME: f32 = 0.016; // ~60Hz frame time

fn main() {
    let mut arm = ArmModel::new();

    for i in 0..10 {
        // this loop should run once per rendered frame with live sensor data
        let pitch = i as f32 * 0.1;
        let frame = SensorFrame {
            connected: true,
            acceleration: Vector3::new(0.0, 9.807, 0.0), // replace with accelerometer data in m/s²
            orientation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch),
            gyro: Vector3::zeros(),
            head_direction: Vector3::new(0.0, 0.0, -1.0),
            head_position: Vector3::zeros(),
            delta_time: DELTA_TIME,
        };

        arm.update(&frame);

        let wrist = arm.controller_position();
        println!(
            "Wrist: ({:.3}, {:.3}, {:.3})  Elbow: ({:.3}, {:.3}, {:.3})  Alpha: {:.2}",
            wrist.x,
            wrist.y,
            wrist.z,
            arm.elbow_position().x,
            arm.elbow_position().y,
            arm.elbow_position().z,
            arm.controller_alpha()
        );
    }
}
