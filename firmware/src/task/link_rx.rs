//! Command link receiver
//!
//! Reads newline-terminated UTF-8 command tokens from the serial-attached
//! radio module and queues the parsed intents. The link is a pure byte
//! stream; reconnect handling and liveness belong to the module, not to
//! this task.

use crate::system::command;
use crate::system::resources::{Irqs, LinkResources};
use defmt::{info, warn};
use embassy_rp::uart::{Config, Uart};
use vehicle_core::dispatch;

/// Longest valid token is "indicator-right" (15 bytes); anything beyond
/// this is garbage and gets dropped up to the next newline.
const MAX_TOKEN_LEN: usize = 32;

#[embassy_executor::task]
pub async fn link_rx(r: LinkResources) {
    let mut uart = Uart::new(
        r.uart,
        r.tx_pin,
        r.rx_pin,
        Irqs,
        r.tx_dma,
        r.rx_dma,
        Config::default(),
    );
    info!("Command link ready");

    let mut buf = [0u8; MAX_TOKEN_LEN];
    let mut len = 0usize;
    let mut overflowed = false;

    loop {
        let mut byte = [0u8; 1];
        if uart.read(&mut byte).await.is_err() {
            // Framing or overrun noise; drop the partial token.
            len = 0;
            overflowed = false;
            continue;
        }

        match byte[0] {
            b'\r' => {}
            b'\n' => {
                if !overflowed && len > 0 {
                    handle_token(&buf[..len]).await;
                }
                len = 0;
                overflowed = false;
            }
            b => {
                if len < MAX_TOKEN_LEN {
                    buf[len] = b;
                    len += 1;
                } else {
                    overflowed = true;
                }
            }
        }
    }
}

async fn handle_token(raw: &[u8]) {
    let Ok(token) = core::str::from_utf8(raw) else {
        warn!("non-UTF8 bytes on command link");
        return;
    };
    match dispatch::parse_token(token) {
        Some(intent) => command::send(intent).await,
        None => warn!("unknown command: {}", token),
    }
}
