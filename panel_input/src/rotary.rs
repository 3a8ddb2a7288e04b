//! Encoder modes and the buttons a detent resolves to.
//!
//! Each press of the encoder switch moves to the next mode, and every mode
//! maps left and right rotation onto its own pair of logical buttons. A
//! detent presses its button for one poll cycle; the next cycle releases it
//! unless the same direction arrived again.

use crate::{
    capture::Direction,
    report::{HidTransport, ReportAggregator},
    ButtonId,
};

/// The rotary button table: `[left, right]` for each mode in turn
#[derive(Clone, Copy)]
pub struct RotaryLayout {
    buttons: &'static [ButtonId],
}

impl RotaryLayout {
    /// Creates a layout, failing const evaluation if the table is empty or
    /// does not hold a whole number of left/right pairs
    pub const fn new(buttons: &'static [ButtonId]) -> Self {
        if buttons.is_empty() || buttons.len() % 2 != 0 {
            panic!("Rotary button table must hold one left/right pair per mode");
        }
        if buttons.len() / 2 > u8::MAX as usize {
            panic!("Too many rotary modes");
        }

        Self { buttons }
    }

    /// The number of selectable modes
    pub const fn mode_count(&self) -> u8 {
        (self.buttons.len() / 2) as u8
    }

    /// The button for `direction` in `mode`
    pub fn button(&self, mode: u8, direction: Direction) -> Option<ButtonId> {
        self.buttons
            .get(usize::from(mode) * 2 + direction.index())
            .copied()
    }
}

/// Mode selection and the currently pressed rotary button
pub struct RotaryModeState {
    layout: RotaryLayout,
    /// None while parked, before the first switch press
    mode: Option<u8>,
    switch_pressed: bool,
    previous_switch_pressed: bool,
    previous_button: Option<ButtonId>,
}

impl RotaryModeState {
    /// Starts in mode 0
    pub fn new(layout: RotaryLayout) -> Self {
        Self::with_mode(layout, Some(0))
    }

    /// Starts without a mode. Rotation resolves to no button until the
    /// switch is pressed for the first time, which selects mode 0.
    pub fn parked(layout: RotaryLayout) -> Self {
        Self::with_mode(layout, None)
    }

    fn with_mode(layout: RotaryLayout, mode: Option<u8>) -> Self {
        Self {
            layout,
            mode,
            switch_pressed: false,
            previous_switch_pressed: false,
            previous_button: None,
        }
    }

    /// The current mode, or None while parked
    pub fn mode(&self) -> Option<u8> {
        self.mode
    }

    /// The rotary button currently held pressed, if any
    pub fn active_button(&self) -> Option<ButtonId> {
        self.previous_button
    }

    /// Feeds the current switch level. On a release to press edge the mode
    /// advances by one, wrapping to 0 after the last. Returns true if the
    /// mode changed.
    pub fn update_mode(&mut self, pressed: bool) -> bool {
        self.switch_pressed = pressed;
        if self.switch_pressed == self.previous_switch_pressed {
            return false;
        }
        self.previous_switch_pressed = self.switch_pressed;

        if !self.switch_pressed {
            return false;
        }

        let next = match self.mode {
            Some(mode) if mode + 1 < self.layout.mode_count() => mode + 1,
            _ => 0,
        };
        self.mode = Some(next);

        #[cfg(feature = "logging")]
        defmt::info!("Rotary1Mode: {}", next + 1);

        true
    }

    /// The button an event resolves to in the current mode
    pub fn button_for_event(&self, event: Option<Direction>) -> Option<ButtonId> {
        let direction = event?;
        let mode = self.mode?;
        self.layout.button(mode, direction)
    }

    /// Applies one poll cycle's event. A button that is no longer active is
    /// released before the new one is pressed.
    pub fn consume<H>(
        &mut self,
        event: Option<Direction>,
        report: &mut ReportAggregator,
        hid: &mut H,
    ) where
        H: HidTransport,
    {
        let new_button = self.button_for_event(event);

        if let Some(previous) = self.previous_button {
            if Some(previous) != new_button {
                hid.set_button(previous, false);
                report.mark_dirty();
                self.previous_button = None;
            }
        }

        if let Some(button) = new_button {
            hid.set_button(button, true);
            report.mark_dirty();
            self.previous_button = Some(button);

            #[cfg(feature = "logging")]
            defmt::debug!("Rotary1Button: {}", button.index());
        }
    }
}
