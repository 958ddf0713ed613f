use embassy_rp::adc::AdcPin;
use embassy_rp::{adc, gpio, Peripheral};

/// Analog input feeding the zone classifier.
pub struct Sampler<'a> {
    channel: adc::Channel<'a>,
}

impl<'a> Sampler<'a> {
    pub fn new(s: impl Peripheral<P = impl AdcPin> + 'a) -> Self {
        let channel = adc::Channel::new_pin(s, gpio::Pull::None);
        Self { channel }
    }

    /// One 12-bit conversion, 0..=4095.
    pub async fn raw(&mut self, adc: &mut adc::Adc<'_, adc::Async>) -> Result<u16, adc::Error> {
        adc.read(&mut self.channel).await
    }
}
