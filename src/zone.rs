//! Voltage band classification.
//!
//! 0..1.0V: off
//! 1..2.0V: slow blink
//! 2..3.3V: fast blink

use core::fmt;

use crate::blink::BlinkControl;

/// Largest 12-bit conversion result.
pub const FULL_SCALE: u16 = 4095;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    Off,
    Slow,
    Fast,
}

impl Zone {
    pub const fn index(self) -> usize {
        match self {
            Zone::Off => 0,
            Zone::Slow => 1,
            Zone::Fast => 2,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Off => "OFF",
            Zone::Slow => "SLOW",
            Zone::Fast => "FAST",
        };
        f.write_str(name)
    }
}

/// Raw-sample cut points between the three zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    pub low: u16,
    pub high: u16,
}

impl Thresholds {
    /// Converts two voltage cut points to raw samples, rounding half up.
    pub fn from_cut_points(full_scale: u16, vref: f32, low_v: f32, high_v: f32) -> Self {
        Self {
            low: to_raw(full_scale, vref, low_v),
            high: to_raw(full_scale, vref, high_v),
        }
    }

    pub fn classify(&self, sample: u16) -> Zone { classify(sample, self.low, self.high) }
}

fn to_raw(full_scale: u16, vref: f32, volts: f32) -> u16 {
    (full_scale as f32 * volts / vref + 0.5) as u16
}

pub fn classify(sample: u16, threshold_low: u16, threshold_high: u16) -> Zone {
    if sample < threshold_low {
        Zone::Off
    } else if sample < threshold_high {
        Zone::Slow
    } else {
        Zone::Fast
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub full_scale: u16,
    pub vref: f32,
    pub cut_low: f32,
    pub cut_high: f32,
    /// Period handed to the blinker per zone, indexed by `Zone::index`.
    /// These are tick-handler periods; the visible half-cycle is twice as long.
    pub periods: [u32; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_scale: FULL_SCALE,
            vref: 3.3,
            cut_low: 1.0,
            cut_high: 2.0,
            periods: [0, 300, 500],
        }
    }
}

impl Config {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_cut_points(self.full_scale, self.vref, self.cut_low, self.cut_high)
    }

    pub fn period_for(&self, zone: Zone) -> u32 { self.periods[zone.index()] }

    pub fn to_voltage(&self, raw: u16) -> f32 {
        let mut ret = raw as f32;
        ret *= self.vref;
        ret /= self.full_scale as f32 + 1.0;
        ret
    }
}

/// Tracks the zone last applied to the blinker.
///
/// There is no hysteresis: a single sample on the other side of a threshold
/// switches zones.
pub struct ZoneClassifier {
    thresholds: Thresholds,
    periods: [u32; 3],
    current: Option<Zone>,
}

impl ZoneClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            thresholds: config.thresholds(),
            periods: config.periods,
            current: None,
        }
    }

    pub fn thresholds(&self) -> Thresholds { self.thresholds }

    pub fn current(&self) -> Option<Zone> { self.current }

    pub fn period_for(&self, zone: Zone) -> u32 { self.periods[zone.index()] }

    /// Classifies `sample` and reconfigures `blink` when the zone changed.
    ///
    /// Returns the newly entered zone, `None` when nothing changed.
    pub fn on_sample(&mut self, sample: u16, blink: &impl BlinkControl) -> Option<Zone> {
        let zone = self.thresholds.classify(sample);
        if self.current == Some(zone) {
            return None;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("zone {} -> {} at {}", self.current, zone, sample);

        self.current = Some(zone);
        blink.reconfigure(self.period_for(zone));
        Some(zone)
    }
}
