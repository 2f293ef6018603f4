use std::cell::RefCell;
use std::rc::Rc;

use batmobile_rs::domain::simulation::{
    DriveController, DriveInput, DriveSettings, WheelCommand, WheelPhysics, WheelPose,
    WheelPosition, WheelVisuals,
};
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Apply(WheelPosition),
    Step,
    Read(WheelPosition, u32),
    Write(WheelPosition),
}

/// Records every call and stamps each pose with the number of completed steps.
struct RecordingPhysics {
    log: Rc<RefCell<Vec<Call>>>,
    commands: [WheelCommand; 4],
    steps: u32,
}

impl RecordingPhysics {
    fn new(log: Rc<RefCell<Vec<Call>>>) -> Self {
        Self {
            log,
            commands: [WheelCommand::default(); 4],
            steps: 0,
        }
    }
}

impl WheelPhysics for RecordingPhysics {
    fn apply(&mut self, wheel: WheelPosition, command: &WheelCommand) {
        self.log.borrow_mut().push(Call::Apply(wheel));
        self.commands[wheel.index()] = *command;
    }

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
        self.log.borrow_mut().push(Call::Step);
    }

    fn world_pose(&self, wheel: WheelPosition) -> WheelPose {
        self.log.borrow_mut().push(Call::Read(wheel, self.steps));
        WheelPose {
            position: Vec3::new(wheel.index() as f32, self.steps as f32, 0.0),
            rotation: Quat::from_rotation_x(self.steps as f32),
        }
    }
}

struct RecordingVisuals {
    log: Rc<RefCell<Vec<Call>>>,
    poses: [Option<WheelPose>; 4],
}

impl WheelVisuals for RecordingVisuals {
    fn set_world_pose(&mut self, wheel: WheelPosition, pose: WheelPose) {
        self.log.borrow_mut().push(Call::Write(wheel));
        self.poses[wheel.index()] = Some(pose);
    }
}

fn controller() -> DriveController {
    DriveController::new(DriveSettings::default())
}

#[test]
fn test_full_steer_sets_both_front_wheels_only() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut physics = RecordingPhysics::new(log);
    let mut drive = controller();

    drive.apply(&DriveInput::new(1.0, 0.0, false), 1.0, &mut physics);

    let fl = physics.commands[WheelPosition::FrontLeft.index()];
    let fr = physics.commands[WheelPosition::FrontRight.index()];
    assert_eq!(fl.steer_angle, Some(30.0));
    assert_eq!(fr.steer_angle, Some(30.0));
    assert_eq!(physics.commands[WheelPosition::RearLeft.index()].steer_angle, None);
    assert_eq!(physics.commands[WheelPosition::RearRight.index()].steer_angle, None);
}

#[test]
fn test_alert_motor_torque_on_front_wheels() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut physics = RecordingPhysics::new(log);
    let mut drive = controller();

    drive.apply(&DriveInput::new(0.0, 0.5, false), 1.2, &mut physics);

    for wheel in [WheelPosition::FrontLeft, WheelPosition::FrontRight] {
        let torque = physics.commands[wheel.index()].motor_torque.unwrap();
        assert!((torque - 600.0).abs() < 1e-3, "{wheel:?} got {torque}");
    }
    for wheel in [WheelPosition::RearLeft, WheelPosition::RearRight] {
        assert_eq!(physics.commands[wheel.index()].motor_torque, None);
    }
}

#[test]
fn test_brake_torque_is_uniform() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut physics = RecordingPhysics::new(log);
    let mut drive = controller();
    drive.set_brake_torque(120.0);

    drive.apply(&DriveInput::default(), 1.0, &mut physics);
    assert!(physics.commands.iter().all(|c| c.brake_torque == 120.0));
    assert_eq!(drive.last_commands(), &physics.commands);
}

#[test]
fn test_physics_update_reads_poses_only_after_step() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut physics = RecordingPhysics::new(log.clone());
    let mut visuals = RecordingVisuals {
        log: log.clone(),
        poses: [None; 4],
    };
    let mut drive = controller();

    drive.physics_update(
        &DriveInput::new(0.2, 1.0, true),
        1.0,
        0.02,
        &mut physics,
        &mut visuals,
    );

    let log = log.borrow();
    let step_at = log.iter().position(|e| *e == Call::Step).unwrap();
    assert_eq!(log.iter().filter(|e| **e == Call::Step).count(), 1);
    for (i, event) in log.iter().enumerate() {
        match event {
            Call::Apply(_) => assert!(i < step_at),
            Call::Read(_, steps) => {
                assert!(i > step_at);
                assert_eq!(*steps, 1);
            }
            Call::Write(_) => assert!(i > step_at),
            Call::Step => {}
        }
    }
}

#[test]
fn test_sync_copies_poses_verbatim() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut physics = RecordingPhysics::new(log.clone());
    let mut visuals = RecordingVisuals {
        log,
        poses: [None; 4],
    };
    physics.step(0.02);

    DriveController::sync_visuals(&physics, &mut visuals);

    for wheel in WheelPosition::ALL {
        let pose = visuals.poses[wheel.index()].unwrap();
        assert_eq!(pose.position, Vec3::new(wheel.index() as f32, 1.0, 0.0));
        assert_eq!(pose.rotation, Quat::from_rotation_x(1.0));
    }
}
