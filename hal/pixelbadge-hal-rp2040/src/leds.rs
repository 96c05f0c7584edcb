//! WS2812 matrix output over PIO
//!
//! The matrix is wired as one 64-pixel chain in row-major order, pixel 0
//! in the top-left corner.

use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::Peri;
use smart_leds::RGB8;

/// LEDs on the badge matrix
pub const LED_COUNT: usize = 64;

/// PIO-driven WS2812 chain for the badge matrix
pub struct Rp2040LedMatrix<'d, P: Instance, const S: usize> {
    driver: PioWs2812<'d, P, S, LED_COUNT>,
}

impl<'d, P: Instance, const S: usize> Rp2040LedMatrix<'d, P, S> {
    /// Load the WS2812 program and claim the state machine
    pub fn new(
        common: &mut Common<'d, P>,
        sm: StateMachine<'d, P, S>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = PioWs2812Program::new(common);
        Self {
            driver: PioWs2812::new(common, sm, dma, pin, &program),
        }
    }

    /// Push a full frame down the chain
    pub async fn write(&mut self, pixels: &[RGB8; LED_COUNT]) {
        self.driver.write(pixels).await;
    }

    /// Turn every LED off
    pub async fn clear(&mut self) {
        self.write(&[RGB8::default(); LED_COUNT]).await;
    }
}
