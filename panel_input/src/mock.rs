//! Mocked pins, ADC, sampler and HID transport for testing the decoders

use core::cell::Cell;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::digital::v2::InputPin;
use heapless::Vec;

use crate::{
    report::HidTransport,
    sampler::{AnalogInput, Sampler},
    Axis, ButtonId,
};

type MockError = &'static str;

/// A digital input whose level is driven from the test through a shared cell
pub(crate) struct MockPin<'a> {
    level: &'a Cell<bool>,
    broken: bool,
}

impl<'a> MockPin<'a> {
    pub(crate) fn new(level: &'a Cell<bool>) -> Self {
        MockPin {
            level,
            broken: false,
        }
    }

    /// A pin whose every read fails
    pub(crate) fn broken(level: &'a Cell<bool>) -> Self {
        MockPin {
            level,
            broken: true,
        }
    }
}

impl InputPin for MockPin<'_> {
    type Error = MockError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        if self.broken {
            return Err("pin fault");
        }
        Ok(self.level.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Stands in for the ADC peripheral type
pub(crate) struct MockAdcPeripheral;

/// An analog pin on channel `ID` of the mock ADC
pub(crate) struct MockChannel<const ID: u8>;

impl<const ID: u8> Channel<MockAdcPeripheral> for MockChannel<ID> {
    type ID = u8;

    fn channel() -> u8 {
        ID
    }
}

/// An ADC returning fixed readings per channel
pub(crate) struct MockAdc {
    pub(crate) readings: [u16; 3],
    pub(crate) failing_channel: Option<u8>,
}

impl MockAdc {
    pub(crate) fn new(readings: [u16; 3]) -> Self {
        MockAdc {
            readings,
            failing_channel: None,
        }
    }
}

impl<PIN> OneShot<MockAdcPeripheral, u16, PIN> for MockAdc
where
    PIN: Channel<MockAdcPeripheral, ID = u8>,
{
    type Error = MockError;

    fn read(&mut self, _pin: &mut PIN) -> nb::Result<u16, Self::Error> {
        let channel = PIN::channel();
        if self.failing_channel == Some(channel) {
            return Err(nb::Error::Other("conversion failed"));
        }
        self.readings
            .get(usize::from(channel))
            .copied()
            .ok_or(nb::Error::Other("no such channel"))
    }
}

/// A sampler returning whatever the test put in its fields
#[derive(Default)]
pub(crate) struct MockSampler {
    pub(crate) switch_pressed: Option<bool>,
    pub(crate) keypad: Option<u16>,
    pub(crate) slider1: Option<u16>,
    pub(crate) slider2: Option<u16>,
}

impl MockSampler {
    /// Switch released, no key, both sliders at rest
    pub(crate) fn idle() -> Self {
        MockSampler {
            switch_pressed: Some(false),
            keypad: Some(0),
            slider1: Some(0),
            slider2: Some(0),
        }
    }
}

impl Sampler for MockSampler {
    fn switch_pressed(&mut self) -> Option<bool> {
        self.switch_pressed
    }

    fn analog(&mut self, input: AnalogInput) -> Option<u16> {
        match input {
            AnalogInput::Keypad => self.keypad,
            AnalogInput::Slider1 => self.slider1,
            AnalogInput::Slider2 => self.slider2,
        }
    }
}

/// Something the decoders asked the transport to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HidEvent {
    Button(ButtonId, bool),
    Axis(Axis, u16),
    Sent,
}

/// A HID transport that records every call in order
#[derive(Default)]
pub(crate) struct MockHid {
    pub(crate) events: Vec<HidEvent, 64>,
    pub(crate) fail_sends: bool,
}

impl MockHid {
    pub(crate) fn sends(&self) -> usize {
        self.events
            .iter()
            .filter(|event| **event == HidEvent::Sent)
            .count()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: HidEvent) {
        // 64 entries is plenty for a single test, a full buffer is a test bug
        assert!(self.events.push(event).is_ok(), "mock HID log overflow");
    }
}

impl HidTransport for MockHid {
    type Error = MockError;

    fn set_button(&mut self, id: ButtonId, pressed: bool) {
        self.record(HidEvent::Button(id, pressed));
    }

    fn set_axis(&mut self, axis: Axis, value: u16) {
        self.record(HidEvent::Axis(axis, value));
    }

    fn send_state(&mut self) -> Result<(), Self::Error> {
        if self.fail_sends {
            return Err("endpoint busy");
        }
        self.record(HidEvent::Sent);
        Ok(())
    }
}
