#![deny(missing_docs)]
#![deny(unsafe_code)]
#![no_std]

//! PANEL INPUT
//!
//! Debounce and decode logic for a USB HID control panel made of a rotary
//! encoder with a push switch, a resistor ladder keypad on a single analog
//! line and two analog sliders. Raw samples go in, logical button and axis
//! changes come out through a [HidTransport], and a single dirty flag
//! decides when a report is actually sent.
//!
//! The encoder clock edge is captured in interrupt context by a
//! [RotaryCapture], which writes a lock free [RotaryMailbox]. Everything else
//! runs from the periodic poll via [Panel::update] and [Panel::report].
//!
//! Built using [`embedded-hal`] traits
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

pub mod capture;
pub mod config;
pub mod joystick;
pub mod keypad;
pub mod panel;
pub mod report;
pub mod rotary;
pub mod sampler;
pub mod slider;

#[cfg(test)]
mod mock;

pub use capture::{Direction, RotaryCapture, RotaryMailbox};
pub use joystick::{JoystickReport, JOYSTICK_DESCRIPTOR};
pub use keypad::{KeypadDecoder, KeypadLadder};
pub use panel::{Panel, PanelOptions};
pub use report::{HidTransport, ReportAggregator};
pub use rotary::{RotaryLayout, RotaryModeState};
pub use sampler::{AnalogInput, HalSampler, Sampler};
pub use slider::SliderDecoder;

/// A logical HID button number, independent of the control that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ButtonId(pub u8);

impl ButtonId {
    /// The zero based button number as sent in the HID report
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// The HID axes driven by the sliders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Axis {
    /// X rotation, driven by slider 1
    Rx,
    /// Y rotation, driven by slider 2
    Ry,
}
