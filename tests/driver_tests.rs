//! Integration tests for the motor driver lifecycle and power commands

use l9110s::{hal::MockPwm, MotorDriver, MotorError, MotorState};

#[test]
fn forward_reverse_detach_scenario() {
    let mut forward = MockPwm::new();
    let mut reverse = MockPwm::new();

    assert_eq!(MotorDriver::<MockPwm>::bit_resolution(), 8);
    assert_eq!(MotorDriver::<MockPwm>::max_duty(), 255);

    {
        let mut motor = MotorDriver::new();
        motor.attach(&mut forward, &mut reverse).unwrap();
        assert!(motor.attached());

        motor.set_power(true, 200).unwrap();
        assert!(motor.forward());
        assert_eq!(motor.duty(), 200);
        let (f, r) = motor.outputs().unwrap();
        assert_eq!(f.last_duty(), Some(200));
        assert_eq!(r.last_duty(), Some(0));

        motor.set_power(false, 50).unwrap();
        assert!(!motor.forward());
        assert_eq!(motor.duty(), 50);
        let (f, r) = motor.outputs().unwrap();
        assert_eq!(f.last_duty(), Some(0));
        assert_eq!(r.last_duty(), Some(50));

        motor.detach().unwrap();
        assert!(!motor.attached());
    }

    assert_eq!(forward.last_duty(), Some(0));
    assert_eq!(reverse.last_duty(), Some(0));
    assert!(!forward.enabled);
    assert!(!reverse.enabled);
}

#[test]
fn exactly_one_line_nonzero_for_every_duty() {
    for forward_dir in [true, false] {
        for duty in 0..=MotorDriver::<MockPwm>::max_duty() {
            let mut f = MockPwm::new();
            let mut r = MockPwm::new();
            let mut motor = MotorDriver::new();
            motor.attach(&mut f, &mut r).unwrap();
            motor.set_power(forward_dir, duty).unwrap();

            assert_eq!(motor.duty(), duty);
            assert_eq!(motor.forward(), forward_dir);

            let (fo, ro) = motor.outputs().unwrap();
            let (active, idle) = if forward_dir { (fo, ro) } else { (ro, fo) };
            assert_eq!(active.last_duty(), Some(duty));
            assert_eq!(idle.last_duty(), Some(0));
        }
    }
}

#[test]
fn set_power_before_attach_writes_nothing() {
    let mut motor: MotorDriver<'_, MockPwm> = MotorDriver::new();

    assert_eq!(motor.set_power(true, 100), Err(MotorError::NotAttached));
    assert_eq!(motor.set_throttle(0.5), Err(MotorError::NotAttached));
    assert_eq!(motor.stop(), Err(MotorError::NotAttached));

    assert!(!motor.forward());
    assert_eq!(motor.duty(), 0);
}

#[test]
fn set_power_after_detach_fails() {
    let mut f = MockPwm::new();
    let mut r = MockPwm::new();
    {
        let mut motor = MotorDriver::new();
        motor.attach(&mut f, &mut r).unwrap();
        motor.detach().unwrap();
        assert!(motor.set_power(true, 10).unwrap_err().is_not_attached());
    }
    // detach wrote one zero to each line, nothing after
    assert_eq!(f.writes, [0]);
    assert_eq!(r.writes, [0]);
}

#[test]
fn attach_enables_both_outputs() {
    let mut f = MockPwm::new();
    let mut r = MockPwm::new();
    {
        let mut motor = MotorDriver::new();
        motor.attach(&mut f, &mut r).unwrap();
        let (fo, ro) = motor.outputs().unwrap();
        assert!(fo.enabled);
        assert!(ro.enabled);
    }
    assert_eq!(f.enable_count, 1);
    assert_eq!(r.enable_count, 1);
}

#[test]
fn calls_chain() {
    let mut f = MockPwm::new();
    let mut r = MockPwm::new();
    let mut motor = MotorDriver::new();

    let stall = motor
        .set_stall_duty(42)
        .attach(&mut f, &mut r)
        .unwrap()
        .stall_duty();
    assert_eq!(stall, 42);

    assert!(!motor.detach().unwrap().attached());
}

#[test]
fn state_tracks_lifecycle() {
    let mut f = MockPwm::new();
    let mut r = MockPwm::new();
    let mut motor = MotorDriver::new();
    assert_eq!(
        motor.state(),
        MotorState {
            attached: false,
            forward: false,
            duty: 0,
            stall_duty: 1,
        }
    );

    motor.attach(&mut f, &mut r).unwrap();
    motor.set_power(true, 128).unwrap();
    assert_eq!(
        motor.state(),
        MotorState {
            attached: true,
            forward: true,
            duty: 128,
            stall_duty: 1,
        }
    );

    motor.detach().unwrap();
    let state = motor.state();
    assert!(!state.attached);
    assert_eq!(state.duty, 0);
}

#[test]
fn throttle_sweep_respects_stall() {
    let mut f = MockPwm::new();
    let mut r = MockPwm::new();
    let mut motor = MotorDriver::new();
    motor.set_stall_duty(80);
    motor.attach(&mut f, &mut r).unwrap();

    for i in -10..=10 {
        let throttle = i as f32 / 10.0;
        motor.set_throttle(throttle).unwrap();

        if i == 0 {
            assert_eq!(motor.duty(), 0);
        } else {
            assert!(motor.duty() >= 80, "duty {} below stall", motor.duty());
            assert_eq!(motor.forward(), i > 0);
        }
    }
}
