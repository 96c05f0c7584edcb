//! Board wiring of the controller's collaborator traits
//!
//! Pin assignments (badge v1):
//! - GPIO0: WS2812 data
//! - GPIO10: button to ground, internal pull-up

use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::Rtc;
use embassy_time::Instant;
use smart_leds::RGB8;

use pixelbadge_core::character::CharacterId;
use pixelbadge_core::traits::{
    Button, Clock, DownloadProgress, LedMatrix, Release, SelectionStore, StoreError,
    SystemControl, UpdateError, UpdateTransport, WallTime,
};
use pixelbadge_core::{Rgb, PIXEL_COUNT};
use pixelbadge_hal::gpio::ActiveLow;
use pixelbadge_hal_rp2040::gpio::Rp2040Input;
use pixelbadge_hal_rp2040::leds::LED_COUNT;

use crate::channels::{FRAME_SIGNAL, SELECTION_SAVE};

/// Hands frames to the LED task
pub struct SignalMatrix;

impl LedMatrix for SignalMatrix {
    fn write(&mut self, pixels: &[Rgb; PIXEL_COUNT]) {
        let mut out = [RGB8::default(); LED_COUNT];
        for (led, px) in out.iter_mut().zip(pixels.iter()) {
            *led = RGB8::new(px.r, px.g, px.b);
        }
        FRAME_SIGNAL.signal(out);
    }
}

pub struct BadgeButton {
    pin: ActiveLow<Rp2040Input<'static>>,
}

impl BadgeButton {
    pub fn new(pin: Rp2040Input<'static>) -> Self {
        Self {
            pin: ActiveLow::new(pin),
        }
    }
}

impl Button for BadgeButton {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_asserted()
    }
}

/// Uptime plus the on-chip RTC
///
/// The RTC only runs once something has set it, so the wall clock reads
/// `None` until then and scheduled checks are skipped.
pub struct BadgeClock {
    start: Instant,
    rtc: Rtc<'static, RTC>,
}

impl BadgeClock {
    pub fn new(rtc: Rtc<'static, RTC>) -> Self {
        Self {
            start: Instant::now(),
            rtc,
        }
    }
}

impl Clock for BadgeClock {
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    fn wall_time(&self) -> Option<WallTime> {
        if !self.rtc.is_running() {
            return None;
        }
        let now = self.rtc.now().ok()?;
        Some(WallTime {
            year: now.year,
            month: now.month,
            day: now.day,
            // RTC counts from Sunday
            weekday: (now.day_of_week as u8 + 6) % 7,
            hour: now.hour,
            minute: now.minute,
            second: now.second,
        })
    }
}

/// Selection store backed by the storage task
///
/// Loading happens once at boot, before the controller exists; saves are
/// queued to the storage task and reported as accepted.
pub struct SignalStore {
    loaded: Option<CharacterId>,
}

impl SignalStore {
    pub fn new(loaded: Option<CharacterId>) -> Self {
        Self { loaded }
    }
}

impl SelectionStore for SignalStore {
    fn load(&mut self) -> Option<CharacterId> {
        self.loaded.clone()
    }

    fn save(&mut self, id: &str) -> Result<(), StoreError> {
        let mut owned = CharacterId::new();
        owned.push_str(id).map_err(|_| StoreError::Serialize)?;
        SELECTION_SAVE.signal(owned.clone());
        self.loaded = Some(owned);
        Ok(())
    }
}

/// Update transport for boards without a radio
///
/// Every update attempt ends in the error display and a reset.
pub struct Offline;

impl UpdateTransport for Offline {
    fn start_connection(&mut self) -> Result<(), UpdateError> {
        Err(UpdateError::Unavailable)
    }

    fn is_connected(&mut self) -> bool {
        false
    }

    fn disconnect(&mut self) {}

    fn fetch_release(&mut self, _url: &str) -> Result<Release, UpdateError> {
        Err(UpdateError::Unavailable)
    }

    fn download(
        &mut self,
        _url: &str,
        _progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<(), UpdateError> {
        Err(UpdateError::Unavailable)
    }

    fn install(&mut self) -> Result<(), UpdateError> {
        Err(UpdateError::Unavailable)
    }
}

pub struct SystemReset;

impl SystemControl for SystemReset {
    fn reset(&mut self) {
        cortex_m::peripheral::SCB::sys_reset();
    }
}
