//! Raw hardware sampling for the poll loop

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::digital::v2::InputPin;

/// The analog lines of the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum AnalogInput {
    /// The resistor ladder keypad
    Keypad,
    /// Slider 1, reported on the Rx axis
    Slider1,
    /// Slider 2, reported on the Ry axis
    Slider2,
}

/// Immediate, non blocking reads of the panel inputs. None means the sample
/// could not be taken this cycle.
pub trait Sampler {
    /// True while the encoder switch is held down
    fn switch_pressed(&mut self) -> Option<bool>;

    /// A reading in `0..=1023`
    fn analog(&mut self, input: AnalogInput) -> Option<u16>;
}

/// A [Sampler] over `embedded-hal` pins and a one shot ADC
pub struct HalSampler<ADC, A, SW, KP, S1, S2> {
    adc: A,
    switch: SW,
    keypad: KP,
    slider1: S1,
    slider2: S2,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, SW, KP, S1, S2> HalSampler<ADC, A, SW, KP, S1, S2>
where
    A: OneShot<ADC, u16, KP> + OneShot<ADC, u16, S1> + OneShot<ADC, u16, S2>,
    SW: InputPin,
    KP: Channel<ADC>,
    S1: Channel<ADC>,
    S2: Channel<ADC>,
{
    /// Creates a sampler. The ADC must be configured for 10 bit conversions
    /// and the switch pin pulled up, as the switch closes to ground.
    pub fn new(adc: A, switch: SW, keypad: KP, slider1: S1, slider2: S2) -> Self {
        Self {
            adc,
            switch,
            keypad,
            slider1,
            slider2,
            _adc: PhantomData,
        }
    }

    /// Releases the ADC and pins
    pub fn free(self) -> (A, SW, KP, S1, S2) {
        (
            self.adc,
            self.switch,
            self.keypad,
            self.slider1,
            self.slider2,
        )
    }
}

impl<ADC, A, SW, KP, S1, S2> Sampler for HalSampler<ADC, A, SW, KP, S1, S2>
where
    A: OneShot<ADC, u16, KP> + OneShot<ADC, u16, S1> + OneShot<ADC, u16, S2>,
    SW: InputPin,
    KP: Channel<ADC>,
    S1: Channel<ADC>,
    S2: Channel<ADC>,
{
    fn switch_pressed(&mut self) -> Option<bool> {
        self.switch.is_low().ok()
    }

    fn analog(&mut self, input: AnalogInput) -> Option<u16> {
        match input {
            AnalogInput::Keypad => {
                <A as OneShot<ADC, u16, KP>>::read(&mut self.adc, &mut self.keypad).ok()
            }
            AnalogInput::Slider1 => {
                <A as OneShot<ADC, u16, S1>>::read(&mut self.adc, &mut self.slider1).ok()
            }
            AnalogInput::Slider2 => {
                <A as OneShot<ADC, u16, S2>>::read(&mut self.adc, &mut self.slider2).ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::mock::{MockAdc, MockAdcPeripheral, MockChannel, MockPin};

    type TestSampler<'a> = HalSampler<
        MockAdcPeripheral,
        MockAdc,
        MockPin<'a>,
        MockChannel<0>,
        MockChannel<1>,
        MockChannel<2>,
    >;

    fn mock_sampler(adc: MockAdc, switch: MockPin<'_>) -> TestSampler<'_> {
        HalSampler::new(adc, switch, MockChannel, MockChannel, MockChannel)
    }

    #[test]
    fn switch_is_active_low() {
        let level = Cell::new(true);
        let mut sampler = mock_sampler(MockAdc::new([0, 0, 0]), MockPin::new(&level));

        assert_eq!(sampler.switch_pressed(), Some(false));
        level.set(false);
        assert_eq!(sampler.switch_pressed(), Some(true));
    }

    #[test]
    fn each_input_reads_its_own_channel() {
        let level = Cell::new(true);
        let mut sampler = mock_sampler(MockAdc::new([450, 12, 1023]), MockPin::new(&level));

        assert_eq!(sampler.analog(AnalogInput::Keypad), Some(450));
        assert_eq!(sampler.analog(AnalogInput::Slider1), Some(12));
        assert_eq!(sampler.analog(AnalogInput::Slider2), Some(1023));
    }

    #[test]
    fn failed_reads_become_none() {
        let level = Cell::new(true);
        let mut adc = MockAdc::new([450, 12, 1023]);
        adc.failing_channel = Some(1);
        let mut sampler = mock_sampler(adc, MockPin::broken(&level));

        assert_eq!(sampler.switch_pressed(), None);
        assert_eq!(sampler.analog(AnalogInput::Slider1), None);
        assert_eq!(sampler.analog(AnalogInput::Keypad), Some(450));
    }

    #[test]
    fn free_hands_back_the_adc_and_switch() {
        let level = Cell::new(false);
        let mut sampler = mock_sampler(MockAdc::new([450, 12, 1023]), MockPin::new(&level));
        assert_eq!(sampler.switch_pressed(), Some(true));

        let (adc, switch, ..) = sampler.free();
        assert_eq!(adc.readings, [450, 12, 1023]);
        assert_eq!(switch.is_low(), Ok(true));
    }
}
