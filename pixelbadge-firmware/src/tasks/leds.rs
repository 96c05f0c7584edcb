//! LED output task
//!
//! Waits for frames from the controller and clocks them out over PIO.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use pixelbadge_hal_rp2040::leds::Rp2040LedMatrix;

use crate::channels::FRAME_SIGNAL;

#[embassy_executor::task]
pub async fn led_task(mut leds: Rp2040LedMatrix<'static, PIO0, 0>) {
    info!("LED task started");

    leds.clear().await;

    loop {
        let frame = FRAME_SIGNAL.wait().await;
        leds.write(&frame).await;
    }
}
