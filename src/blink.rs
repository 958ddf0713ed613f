//! Square-wave blinker driven by a 1 ms tick.
//!
//! `BlinkState` is the bare state machine. `Blinker` owns it together with the
//! output pin behind a critical-section mutex, so the tick handler and the
//! zone classifier can share one handle without ever seeing a half-written
//! period/counter pair.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::{OutputPin, PinState};

/// Where the blinker currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Output forced low.
    Off,
    /// Output flips every `2 * period_ms` ticks.
    Toggling(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkState {
    period_ms: u32,
    elapsed_ms: u32,
    level: bool,
}

impl BlinkState {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0,
            level: false,
        }
    }

    pub const fn period_ms(&self) -> u32 { self.period_ms }

    pub const fn elapsed_ms(&self) -> u32 { self.elapsed_ms }

    pub const fn level(&self) -> bool { self.level }

    pub const fn mode(&self) -> Mode {
        match self.period_ms {
            0 => Mode::Off,
            period_ms => Mode::Toggling(period_ms),
        }
    }

    /// Advances the state by one tick.
    ///
    /// Returns the level the output has to be driven to, or `None` when the
    /// pin stays untouched this tick.
    pub fn tick(&mut self) -> Option<bool> {
        if self.period_ms == 0 {
            self.level = false;
            return Some(false);
        }

        self.elapsed_ms += 1;
        if self.elapsed_ms >= self.period_ms.saturating_mul(2) {
            self.elapsed_ms = 0;
            self.level = !self.level;
            return Some(self.level);
        }
        None
    }

    /// Switches to a new period and restarts the count from zero.
    ///
    /// A zero period forces the output low right away; any other period keeps
    /// the current level until the next toggle boundary.
    pub fn reconfigure(&mut self, period_ms: u32) -> Option<bool> {
        self.period_ms = period_ms;
        self.elapsed_ms = 0;
        if period_ms == 0 {
            self.level = false;
            return Some(false);
        }
        None
    }
}

/// The one operation the blinker exposes to whoever decides the period.
pub trait BlinkControl {
    fn reconfigure(&self, period_ms: u32);
}

/// Shared blink handle owning the state and the output pin.
pub struct Blinker<P> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<(BlinkState, P)>>,
}

impl<P: OutputPin> Blinker<P> {
    pub fn new(pin: P, period_ms: u32) -> Self {
        Self {
            inner: Mutex::new(RefCell::new((BlinkState::new(period_ms), pin))),
        }
    }

    /// Runs one tick. Always asks the timer driver to keep going.
    pub fn tick(&self) -> bool {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let (state, pin) = &mut *guard;
            if let Some(level) = state.tick() {
                drive(pin, level);
            }
        });
        true
    }

    pub fn state(&self) -> BlinkState {
        self.inner.lock(|cell| cell.borrow().0)
    }
}

impl<P: OutputPin> BlinkControl for Blinker<P> {
    fn reconfigure(&self, period_ms: u32) {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let (state, pin) = &mut *guard;
            if let Some(level) = state.reconfigure(period_ms) {
                drive(pin, level);
            }
        });
    }
}

// fire-and-forget
fn drive<P: OutputPin>(pin: &mut P, level: bool) {
    let _ = pin.set_state(PinState::from(level));
}

#[cfg(feature = "rp")]
pub use self::task::{run, Config};

#[cfg(feature = "rp")]
mod task {
    use embassy_rp::gpio;
    use embassy_time::{Duration, Ticker};

    use super::Blinker;

    pub struct Config {
        pub tick: Duration,
    }

    #[embassy_executor::task]
    pub async fn run(config: Config, blinker: &'static Blinker<gpio::Output<'static>>) {
        defmt::info!("blink tick every {} us", config.tick.as_micros());

        let mut ticker = Ticker::every(config.tick);
        while blinker.tick() {
            ticker.next().await;
        }
    }
}
