//! Drive Task Module
//!
//! Owns the TB6612FNG dual motor driver and applies the per-side outputs
//! computed by the control loop. All direction and speed policy lives in
//! the core; this task only translates signed duty percentages into
//! driver commands.

use crate::system::drive_command;
use crate::system::resources::MotorDriverResources;
use defmt::info;
use embassy_rp::gpio;
use embassy_rp::pwm;
use tb6612fng::{DriveCommand, Motor, Tb6612fng};
use vehicle_core::motor::WheelDrive;

/// Maps a signed duty percent to a driver command for one side.
fn side_command(speed: i8) -> DriveCommand {
    if speed > 0 {
        DriveCommand::Forward(speed as u8)
    } else if speed < 0 {
        DriveCommand::Backward(-speed as u8)
    } else {
        DriveCommand::Stop
    }
}

#[embassy_executor::task]
pub async fn drive(r: MotorDriverResources) {
    // Configure PWM for motor control
    // We use 10kHz frequency as cheaper DC motors often work better at lower frequencies
    let desired_freq_hz = 10_000;
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq(); // 150MHz

    // Calculate minimum divider needed to keep period under 16-bit limit (65535)
    let divider = ((clock_freq_hz / desired_freq_hz) / 65535 + 1) as u8;
    let period = (clock_freq_hz / (desired_freq_hz * divider as u32)) as u16 - 1;

    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = divider.into();
    pwm_config.top = period;

    // Initialize TB6612FNG motor driver pins
    let stby = gpio::Output::new(r.standby_pin, gpio::Level::Low);

    // motor A, here defined to be the left motor
    let left_fwd = gpio::Output::new(r.left_forward_pin, gpio::Level::Low);
    let left_bckw = gpio::Output::new(r.left_backward_pin, gpio::Level::Low);
    let left_pwm = pwm::Pwm::new_output_a(r.left_slice, r.left_pwm_pin, pwm_config.clone());
    let left_motor = Motor::new(left_fwd, left_bckw, left_pwm).unwrap();

    // motor B, here defined to be the right motor
    let right_fwd = gpio::Output::new(r.right_forward_pin, gpio::Level::Low);
    let right_bckw = gpio::Output::new(r.right_backward_pin, gpio::Level::Low);
    let right_pwm = pwm::Pwm::new_output_b(r.right_slice, r.right_pwm_pin, pwm_config.clone());
    let right_motor = Motor::new(right_fwd, right_bckw, right_pwm).unwrap();

    let mut control = Tb6612fng::new(left_motor, right_motor, stby).unwrap();
    control.disable_standby().unwrap();

    loop {
        let WheelDrive { left, right } = drive_command::wait().await;
        info!("drive L:{} R:{}", left, right);
        // Re-applying an unchanged output is a no-op at the pins.
        control.motor_a.drive(side_command(left)).unwrap();
        control.motor_b.drive(side_command(right)).unwrap();
    }
}
