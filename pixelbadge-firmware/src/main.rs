//! Pixelbadge - 8x8 LED Matrix Status Badge Firmware
//!
//! Main firmware binary for RP2040-based badges. The badge logic runs in
//! the main task as a 10 ms polling loop; LED output and flash writes run
//! in their own tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::rtc::Rtc;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pixelbadge_core::character::Catalog;
use pixelbadge_core::config::FIRMWARE_VERSION;
use pixelbadge_core::state::Event;
use pixelbadge_core::{Board, Controller};
use pixelbadge_hal_rp2040::flash::Rp2040FlashStorage;
use pixelbadge_hal_rp2040::gpio::Rp2040Input;
use pixelbadge_hal_rp2040::leds::Rp2040LedMatrix;

use crate::board::{BadgeButton, BadgeClock, Offline, SignalMatrix, SignalStore, SystemReset};
use crate::config::BadgePersistence;

mod board;
mod channels;
mod config;
mod tasks;

/// Main loop period
const POLL_INTERVAL_MS: u64 = 10;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pixelbadge firmware v{} starting...", FIRMWARE_VERSION);

    let p = embassy_rp::init(Default::default());

    // Persisted data is read before anything else touches the flash
    let storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH1);
    let mut persistence = BadgePersistence::new(storage);
    let config = persistence.load_config().await;
    let selection = persistence.load_selection().await;

    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Built-in character catalog is invalid: {:?}", e);
            panic!("invalid character catalog");
        }
    };
    info!("{} characters available", catalog.len());

    // WS2812 chain on GPIO0, driven by PIO0 state machine 0
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let leds = Rp2040LedMatrix::new(&mut common, sm0, p.DMA_CH0, p.PIN_0);

    let button = Rp2040Input::new(Input::new(p.PIN_10, Pull::Up));

    spawner.spawn(tasks::led_task(leds)).unwrap();
    spawner
        .spawn(tasks::storage_task(persistence.into_storage()))
        .unwrap();

    let board = Board {
        leds: SignalMatrix,
        button: BadgeButton::new(button),
        clock: BadgeClock::new(Rtc::new(p.RTC)),
        store: SignalStore::new(selection),
        network: Offline,
        system: SystemReset,
    };
    let mut controller = Controller::new(board, config, catalog);

    for event in controller.boot() {
        log_event(&event);
    }
    info!("Boot complete in {:?}", controller.mode());

    loop {
        for event in controller.poll() {
            log_event(&event);
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Reset(reason) => info!("Resetting: {:?}", reason),
        e if e.is_error_event() => warn!("Failure: {:?}", e),
        e if e.is_scheduled_event() => info!("Schedule: {:?}", e),
        e if e.is_user_event() => debug!("Input: {:?}", e),
        e => debug!("Event: {:?}", e),
    }
}
