//! Hardware Resource Management
//!
//! Assigns pins and peripherals to the tasks that own them. Each task
//! receives its own resource group at spawn time, so hardware access
//! never overlaps.
//!
//! # Resource Groups
//! - Motor Driver: TB6612FNG direction pins and PWM slices for both sides
//! - Lamps: headlight, brake light, indicator and horn output lines
//! - IR Receiver: demodulated NEC data line
//! - Link: UART for the serial command link (radio module)

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, UART0};
use embassy_rp::uart::InterruptHandler as UartInterruptHandler;

assign_resources! {
    /// TB6612FNG dual motor driver pins and PWM channels
    motor_driver: MotorDriverResources {
        standby_pin: PIN_22,
        // Left drive side PWM
        left_slice: PWM_SLICE6,
        left_pwm_pin: PIN_28,
        left_forward_pin: PIN_21,
        left_backward_pin: PIN_20,
        // Right drive side PWM
        right_slice: PWM_SLICE5,
        right_pwm_pin: PIN_27,
        right_forward_pin: PIN_19,
        right_backward_pin: PIN_18,
    },
    /// Lamp and horn output lines
    lamps: LampResources {
        headlight_pin: PIN_6,
        brakelight_pin: PIN_7,
        indicator_left_pin: PIN_8,
        indicator_right_pin: PIN_9,
        horn_pin: PIN_10,
    },
    /// NEC IR receiver data line (active low)
    ir_receiver: IrReceiverResources {
        ir_pin: PIN_5,
    },
    /// Serial command link (radio module on UART0)
    link: LinkResources {
        uart: UART0,
        tx_pin: PIN_0,
        rx_pin: PIN_1,
        tx_dma: DMA_CH0,
        rx_dma: DMA_CH1,
    },
}

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => UartInterruptHandler<UART0>;
});
