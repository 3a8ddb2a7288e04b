//! The poll side of the panel: all decoder state and the two entry points
//! the poll task calls every cycle.

use crate::{
    capture::RotaryMailbox,
    config::{KEYPAD_LADDER, ROTARY_LAYOUT},
    keypad::KeypadDecoder,
    report::{HidTransport, ReportAggregator},
    rotary::RotaryModeState,
    sampler::{AnalogInput, Sampler},
    slider::SliderDecoder,
    Axis,
};

const SLIDERS: [(AnalogInput, Axis); 2] = [
    (AnalogInput::Slider1, Axis::Rx),
    (AnalogInput::Slider2, Axis::Ry),
];

/// Start up behaviour of a [Panel]
#[derive(Clone, Copy, Debug, Default)]
pub struct PanelOptions {
    /// Send no reports until the encoder switch has been pressed once. The
    /// encoder starts without a mode and the first press selects mode 0.
    pub hold_reports_until_mode_selected: bool,
}

/// Owns the state of every decoder on the panel
pub struct Panel<'a> {
    mailbox: &'a RotaryMailbox,
    rotary: RotaryModeState,
    keypad: KeypadDecoder,
    sliders: [SliderDecoder; 2],
    report: ReportAggregator,
    options: PanelOptions,
}

impl<'a> Panel<'a> {
    /// Creates a panel reading encoder events from `mailbox`
    pub fn new(mailbox: &'a RotaryMailbox, options: PanelOptions) -> Self {
        let rotary = if options.hold_reports_until_mode_selected {
            RotaryModeState::parked(ROTARY_LAYOUT)
        } else {
            RotaryModeState::new(ROTARY_LAYOUT)
        };

        Self {
            mailbox,
            rotary,
            keypad: KeypadDecoder::new(KEYPAD_LADDER),
            sliders: [SliderDecoder::new(), SliderDecoder::new()],
            report: ReportAggregator::new(),
            options,
        }
    }

    /// The encoder state machine
    pub fn rotary(&self) -> &RotaryModeState {
        &self.rotary
    }

    /// The keypad decoder
    pub fn keypad(&self) -> &KeypadDecoder {
        &self.keypad
    }

    /// True if the next [Panel::report] has something to send
    pub fn is_dirty(&self) -> bool {
        self.report.is_dirty()
    }

    /// Runs every decoder once: encoder mode, encoder rotation, keypad, then
    /// both sliders. An input that could not be sampled keeps its state.
    pub fn update<S, H>(&mut self, sampler: &mut S, hid: &mut H)
    where
        S: Sampler,
        H: HidTransport,
    {
        if let Some(pressed) = sampler.switch_pressed() {
            let was_parked = self.rotary.mode().is_none();
            if self.rotary.update_mode(pressed) && was_parked {
                // nothing was sent while parked
                self.report.mark_dirty();
            }
        }

        let event = self.mailbox.take();
        self.rotary.consume(event, &mut self.report, hid);

        if let Some(value) = sampler.analog(AnalogInput::Keypad) {
            self.keypad.update(value, &mut self.report, hid);
        }

        for ((input, axis), slider) in SLIDERS.iter().zip(self.sliders.iter_mut()) {
            let Some(value) = sampler.analog(*input) else {
                continue;
            };

            if let Some(rescaled) = slider.update(value, &mut self.report) {
                hid.set_axis(*axis, rescaled);

                #[cfg(feature = "logging")]
                defmt::debug!("{}: {}", axis, rescaled);
            }
        }
    }

    /// Sends a report if anything changed since the last one. While reports
    /// are held, pending changes are dropped instead.
    pub fn report<H>(&mut self, hid: &mut H) -> Result<bool, H::Error>
    where
        H: HidTransport,
    {
        if self.options.hold_reports_until_mode_selected && self.rotary.mode().is_none() {
            self.report.discard();
            return Ok(false);
        }

        self.report.flush_if_dirty(hid)
    }
}
