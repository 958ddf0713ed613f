#![no_std]
#![no_main]

use core::fmt::Write;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_rp::{adc, bind_interrupts, gpio, uart};
use embassy_time::Duration;
use heapless::String;
use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};

use rpi_pico_zone_blink::blink::{self, Blinker};
use rpi_pico_zone_blink::sampler::Sampler;
use rpi_pico_zone_blink::zone::{self, ZoneClassifier};

// the first sample always reconfigures, this only covers the time before it
const INITIAL_PERIOD_MS: u32 = 300;

type Led = gpio::Output<'static>;

static BLINKER: StaticCell<Blinker<Led>> = StaticCell::new();

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

fn blink_run(spawner: &Spawner, blinker: &'static Blinker<Led>) {
    let config = blink::Config {
        tick: Duration::from_millis(1),
    };
    unwrap!(spawner.spawn(blink::run(config, blinker)));
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut uart_0 = uart::Uart::new_blocking(p.UART0, p.PIN_16, p.PIN_17, uart::Config::default());
    let _ = uart_0.blocking_write("Hello World!\r\n".as_bytes());
    info!("board ok");

    let led = gpio::Output::new(gpio::AnyPin::from(p.PIN_4), gpio::Level::Low);
    let blinker: &'static Blinker<Led> = BLINKER.init(Blinker::new(led, INITIAL_PERIOD_MS));

    let mut adc_0 = adc::Adc::new(p.ADC, Irqs, adc::Config::default());
    let mut sampler = Sampler::new(p.PIN_28);

    let zone_config = zone::Config::default();
    let mut classifier = ZoneClassifier::new(&zone_config);
    let thresholds = classifier.thresholds();
    info!("thresholds: low {}, high {}", thresholds.low, thresholds.high);

    blink_run(&spawner, blinker);
    info!("setup done");

    let mut frame = String::<64>::new();
    loop {
        let Ok(sample) = sampler.raw(&mut adc_0).await else {
            warn!("adc conversion failed");
            continue;
        };
        let Some(zone) = classifier.on_sample(sample, blinker) else {
            continue;
        };

        let voltage = zone_config.to_voltage(sample);
        let period_ms = classifier.period_for(zone);
        info!("zone {}: raw {}, {} V, period {} ms", zone, sample, voltage, period_ms);

        frame.clear();
        let _ = write!(frame, "zone: {}, rp_vol: {}\r\n", zone, voltage);
        let _ = uart_0.blocking_write(frame.as_bytes());
    }
}
