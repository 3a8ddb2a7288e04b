//! The dirty flag and the one place a HID report is sent from

use crate::{Axis, ButtonId};

/// The HID side of the panel: holds the current button and axis state and
/// transmits it on request. Implementations must not block.
pub trait HidTransport {
    /// The error returned when a report could not be queued
    type Error;

    /// Sets a button as pressed (`true`) or released in the pending report
    fn set_button(&mut self, id: ButtonId, pressed: bool);

    /// Sets an axis value in the pending report
    fn set_axis(&mut self, axis: Axis, value: u16);

    /// Transmits the complete pending report
    fn send_state(&mut self) -> Result<(), Self::Error>;
}

/// Tracks whether any decoder changed visible state since the last report.
///
/// Starts dirty so that the initial state is reported once.
pub struct ReportAggregator {
    dirty: bool,
}

impl ReportAggregator {
    /// Creates an aggregator with a report pending
    pub const fn new() -> Self {
        Self { dirty: true }
    }

    /// Records that a button or axis changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True if a report is due
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drops a pending report without sending it
    pub fn discard(&mut self) {
        self.dirty = false;
    }

    /// Sends the report if anything changed. Returns `Ok(true)` if a report
    /// was sent and `Ok(false)` if there was nothing to send. On a transport
    /// error the flag stays set so the next call sends the full state again.
    pub fn flush_if_dirty<H>(&mut self, hid: &mut H) -> Result<bool, H::Error>
    where
        H: HidTransport,
    {
        if !self.dirty {
            return Ok(false);
        }

        hid.send_state()?;
        self.dirty = false;

        #[cfg(feature = "logging")]
        defmt::trace!("Sending state...");

        Ok(true)
    }
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}
