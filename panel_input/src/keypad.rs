//! Resistor ladder keypad.
//!
//! Every key closes a different resistive path, so a single analog reading
//! identifies at most one key. Readings are mapped to keys through an ordered
//! table of band upper bounds.

use crate::{
    report::{HidTransport, ReportAggregator},
    ButtonId,
};

/// The band table of a resistor ladder
#[derive(Clone, Copy)]
pub struct KeypadLadder {
    ids: &'static [ButtonId],
    thresholds: &'static [u16],
    no_press_floor: u16,
}

impl KeypadLadder {
    /// Creates a ladder. `thresholds` must be strictly increasing and hold
    /// one more entry than `ids`; `thresholds[i]` is the upper bound of the
    /// band of `ids[i - 1]`. Readings at or below `no_press_floor` mean no
    /// key. Const evaluation fails on a malformed table.
    pub const fn new(
        ids: &'static [ButtonId],
        thresholds: &'static [u16],
        no_press_floor: u16,
    ) -> Self {
        if ids.is_empty() || thresholds.len() != ids.len() + 1 {
            panic!("Keypad ladder needs one threshold more than it has keys");
        }

        let mut i = 1;
        while i < thresholds.len() {
            if thresholds[i] <= thresholds[i - 1] {
                panic!("Keypad ladder thresholds must be strictly increasing");
            }
            i += 1;
        }

        Self {
            ids,
            thresholds,
            no_press_floor,
        }
    }

    /// Maps a reading to a key.
    ///
    /// The band is the first threshold the reading does not exceed. A
    /// reading above every threshold lands in the top band and resolves to
    /// the last key. A reading above the floor but within the first
    /// threshold sits below the lowest key and resolves to no key.
    pub fn decode(&self, value: u16) -> Option<ButtonId> {
        if value <= self.no_press_floor {
            return None;
        }

        let band = self
            .thresholds
            .iter()
            .position(|&threshold| value <= threshold)
            .unwrap_or(self.thresholds.len().saturating_sub(1));

        band.checked_sub(1)
            .and_then(|index| self.ids.get(index))
            .copied()
    }
}

/// Tracks the key currently held on one ladder
pub struct KeypadDecoder {
    ladder: KeypadLadder,
    current: Option<ButtonId>,
}

impl KeypadDecoder {
    /// Creates a decoder with no key held
    pub fn new(ladder: KeypadLadder) -> Self {
        Self {
            ladder,
            current: None,
        }
    }

    /// The key currently held, if any
    pub fn current(&self) -> Option<ButtonId> {
        self.current
    }

    /// Maps a reading to a key without changing any state
    pub fn decode(&self, value: u16) -> Option<ButtonId> {
        self.ladder.decode(value)
    }

    /// Applies a new reading. When the key changes the old one is released
    /// before the new one is pressed.
    pub fn update<H>(&mut self, value: u16, report: &mut ReportAggregator, hid: &mut H)
    where
        H: HidTransport,
    {
        let new_button = self.ladder.decode(value);
        if new_button == self.current {
            return;
        }

        if let Some(button) = self.current.take() {
            hid.set_button(button, false);
            report.mark_dirty();

            #[cfg(feature = "logging")]
            defmt::debug!("KeyPad1Release: {}", button.index());
        }

        if let Some(button) = new_button {
            hid.set_button(button, true);
            report.mark_dirty();

            #[cfg(feature = "logging")]
            defmt::debug!("KeyPad1Press: {}", button.index());
        }

        self.current = new_button;
    }
}
