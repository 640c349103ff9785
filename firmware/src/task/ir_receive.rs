//! IR receiver task
//!
//! Polls the demodulated output of a 38kHz IR receiver and decodes NEC
//! frames: 9ms lead pulse, 4.5ms space, then 32 bits (address, inverted
//! address, command, inverted command). Valid frames are matched against
//! the remote's code table; everything else is dropped.

use crate::system::command;
use crate::system::resources::IrReceiverResources;
use defmt::{info, warn};
use embassy_rp::gpio::{Input, Level, Pull};
use embassy_time::{Duration, Instant};
use vehicle_core::dispatch;

/// Waits for the IR pin to reach the given level, returning the elapsed
/// time in microseconds, or `None` on timeout.
fn wait_for_level(pin: &Input, level: Level, timeout_us: u64) -> Option<u64> {
    let start = Instant::now();
    let timeout = Duration::from_micros(timeout_us);

    loop {
        let current = if pin.is_high() {
            Level::High
        } else {
            Level::Low
        };
        if current == level {
            return Some(start.elapsed().as_micros());
        }
        if start.elapsed() > timeout {
            return None;
        }
    }
}

/// Decodes one NEC frame into its 32-bit value, or `None` on bad timing
/// or a failed checksum. The line must already be in the lead pulse;
/// a whole frame is bounded at ~70ms of polling.
fn receive_frame(ir_pin: &Input) -> Option<u32> {
    // Lead pulse (9ms low on the receiver output)
    let t = wait_for_level(ir_pin, Level::High, 12_000)?;
    if !(8_000..=10_000).contains(&t) {
        return None;
    }

    // Space (4.5ms high)
    let t = wait_for_level(ir_pin, Level::Low, 7_000)?;
    if !(3_500..=5_000).contains(&t) {
        return None;
    }

    let mut data = [0u8; 4];
    for i in 0..32 {
        // 0.56ms carrier burst, then the bit-length gap
        wait_for_level(ir_pin, Level::High, 1_000)?;
        let t = wait_for_level(ir_pin, Level::Low, 2_500)?;
        if t < 200 {
            return None;
        }
        if t > 1_200 {
            // 1.69ms gap encodes a '1'
            data[i / 8] |= 1 << (i % 8);
        }
    }

    // Address and command must match their inverted copies
    if data[0].wrapping_add(data[1]) != 0xFF || data[2].wrapping_add(data[3]) != 0xFF {
        return None;
    }

    // Bits arrive LSB-first; the code table uses the conventional
    // MSB-first frame value.
    Some(u32::from_be_bytes([
        data[0].reverse_bits(),
        data[1].reverse_bits(),
        data[2].reverse_bits(),
        data[3].reverse_bits(),
    ]))
}

#[embassy_executor::task]
pub async fn ir_receive(r: IrReceiverResources) {
    let mut ir_pin = Input::new(r.ir_pin, Pull::Up);
    info!("IR receiver ready");

    loop {
        // Suspend until a burst starts; the tight timing polls below run
        // only while a frame is actually in flight, so an idle remote
        // never holds up the other tasks.
        ir_pin.wait_for_low().await;

        if let Some(frame) = receive_frame(&ir_pin) {
            match dispatch::lookup_ir(frame) {
                Some(intent) => command::send(intent).await,
                None => warn!("unmapped IR code 0x{:08X}", frame),
            }
        }

        // Let the frame tail (or noise) drain before re-arming.
        ir_pin.wait_for_high().await;
    }
}
