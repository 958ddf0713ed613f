use rpi_pico_zone_blink::blink::{BlinkControl, Blinker, Mode};

use crate::mock_pin::RecordingPin;

fn ticks<P: embedded_hal::digital::OutputPin>(blinker: &Blinker<P>, n: u32) {
    for _ in 0..n {
        assert!(blinker.tick(), "tick must always ask to be rescheduled");
    }
}

#[test]
fn pin_written_only_on_toggle() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 300);

    ticks(&blinker, 599);
    assert_eq!(pin.write_count(), 0);

    ticks(&blinker, 1);
    assert_eq!(pin.writes(), [true]);
    assert_eq!(blinker.state().elapsed_ms(), 0);
}

#[test]
fn slow_zone_returns_to_start_after_two_toggles() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 300);
    let start = blinker.state().level();

    ticks(&blinker, 1200);

    assert_eq!(pin.writes(), [!start, start]);
    assert_eq!(blinker.state().level(), start);
}

#[test]
fn reconfigure_off_writes_pin_immediately() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 2);
    ticks(&blinker, 4);
    assert!(blinker.state().level());
    pin.clear();

    blinker.reconfigure(0);

    assert_eq!(pin.writes(), [false]);
    assert!(!blinker.state().level());
    assert_eq!(blinker.state().mode(), Mode::Off);
}

#[test]
fn off_keeps_forcing_low() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 0);

    ticks(&blinker, 3);

    assert_eq!(pin.writes(), [false, false, false]);
    assert_eq!(blinker.state().elapsed_ms(), 0);
}

#[test]
fn slow_to_fast_mid_cycle() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 300);
    ticks(&blinker, 600 + 123);
    assert!(blinker.state().level());
    assert_eq!(blinker.state().elapsed_ms(), 123);
    pin.clear();

    blinker.reconfigure(500);
    assert_eq!(pin.write_count(), 0);
    assert_eq!(blinker.state().elapsed_ms(), 0);
    assert!(blinker.state().level());

    ticks(&blinker, 999);
    assert_eq!(pin.write_count(), 0);
    assert!(blinker.state().level());

    ticks(&blinker, 1);
    assert_eq!(pin.writes(), [false]);
}

#[test]
fn leaving_off_does_not_write_until_first_toggle() {
    let pin = RecordingPin::new();
    let blinker = Blinker::new(pin.clone(), 0);
    blinker.tick();
    pin.clear();

    blinker.reconfigure(300);
    assert_eq!(pin.write_count(), 0);
    assert!(!blinker.state().level());

    ticks(&blinker, 600);
    assert_eq!(pin.writes(), [true]);
}
