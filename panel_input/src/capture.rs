//! Interrupt side of the rotary encoder.
//!
//! The encoder clock line triggers an interrupt on its falling edge. The
//! handler samples the data line to get the direction and posts it to a
//! [RotaryMailbox], which the poll loop takes from on its next cycle. The
//! mailbox is the only state shared between interrupt and poll context.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::digital::v2::InputPin;

use crate::config::DEBOUNCE_DELAY_MS;

const NO_EVENT: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;

/// The direction of a single encoder detent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Direction {
    /// Counter clockwise, data line low on the clock edge
    Left,
    /// Clockwise, data line high on the clock edge
    Right,
}

impl Direction {
    /// Offset of this direction within a mode's pair of rotary buttons
    pub const fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }

    const fn to_raw(self) -> u8 {
        match self {
            Direction::Left => LEFT,
            Direction::Right => RIGHT,
        }
    }

    const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            LEFT => Some(Direction::Left),
            RIGHT => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A single slot holding the latest undelivered encoder direction.
///
/// Writes come from interrupt context and the read-and-clear from the poll
/// loop, both as single byte atomics. On ARMv7-M these are native
/// (`LDREXB`/`STREXB`) so no critical section is needed. A target without an
/// atomic byte swap (e.g. ARMv6-M) has to wrap [RotaryMailbox::take] in a
/// critical section instead.
///
/// A newer direction posted before the poll loop takes the slot replaces the
/// older one.
pub struct RotaryMailbox(AtomicU8);

impl RotaryMailbox {
    /// Creates an empty mailbox, usable in a `static`
    pub const fn new() -> Self {
        RotaryMailbox(AtomicU8::new(NO_EVENT))
    }

    /// Stores a direction, replacing any that has not been taken yet
    pub fn post(&self, direction: Direction) {
        self.0.store(direction.to_raw(), Ordering::Release);
    }

    /// Takes the pending direction, leaving the mailbox empty
    pub fn take(&self) -> Option<Direction> {
        Direction::from_raw(self.0.swap(NO_EVENT, Ordering::AcqRel))
    }

    /// Returns the pending direction without clearing it
    pub fn peek(&self) -> Option<Direction> {
        Direction::from_raw(self.0.load(Ordering::Acquire))
    }
}

impl Default for RotaryMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounces encoder clock edges and latches their direction.
///
/// Owned by the interrupt handler. Besides the mailbox it only touches its
/// own data pin and timestamp.
pub struct RotaryCapture<'a, DT> {
    data_pin: DT,
    mailbox: &'a RotaryMailbox,
    last_accepted_ms: Option<u32>,
}

impl<'a, DT> RotaryCapture<'a, DT>
where
    DT: InputPin,
{
    /// Creates a capture that samples `data_pin` and posts to `mailbox`
    pub fn new(data_pin: DT, mailbox: &'a RotaryMailbox) -> Self {
        Self {
            data_pin,
            mailbox,
            last_accepted_ms: None,
        }
    }

    /// Handles a falling edge of the clock line at `now_ms` (a wrapping
    /// millisecond counter). Returns the direction that was posted, or None
    /// if the edge fell inside the debounce window or the data line could
    /// not be read.
    pub fn on_falling_edge(&mut self, now_ms: u32) -> Option<Direction> {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.wrapping_sub(last) < DEBOUNCE_DELAY_MS {
                return None;
            }
        }

        let direction = match self.data_pin.is_low() {
            Ok(true) => Direction::Left,
            Ok(false) => Direction::Right,
            Err(_) => return None,
        };

        self.mailbox.post(direction);
        self.last_accepted_ms = Some(now_ms);
        Some(direction)
    }

    /// Releases the data pin
    pub fn free(self) -> DT {
        self.data_pin
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn data_line_level_selects_direction() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);

        assert_eq!(capture.on_falling_edge(100), Some(Direction::Left));
        assert_eq!(mailbox.take(), Some(Direction::Left));

        level.set(true);
        assert_eq!(capture.on_falling_edge(200), Some(Direction::Right));
        assert_eq!(mailbox.take(), Some(Direction::Right));
    }

    #[test]
    fn second_edge_within_debounce_window_is_dropped() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);

        assert_eq!(capture.on_falling_edge(1_000), Some(Direction::Left));
        assert_eq!(capture.on_falling_edge(1_003), None);

        assert_eq!(mailbox.take(), Some(Direction::Left));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn dropped_edges_do_not_extend_the_window() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(true);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);

        assert!(capture.on_falling_edge(10).is_some());
        assert!(capture.on_falling_edge(14).is_none());
        assert_eq!(capture.on_falling_edge(15), Some(Direction::Right));
    }

    #[test]
    fn first_edge_after_boot_is_accepted() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);

        assert_eq!(capture.on_falling_edge(0), Some(Direction::Left));
    }

    #[test]
    fn debounce_survives_counter_wrap() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);

        assert!(capture.on_falling_edge(u32::MAX - 1).is_some());
        assert!(capture.on_falling_edge(2).is_none());
        assert!(capture.on_falling_edge(3).is_some());
    }

    #[test]
    fn unreadable_data_line_discards_the_edge() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::broken(&level), &mailbox);

        assert_eq!(capture.on_falling_edge(50), None);
        assert_eq!(mailbox.peek(), None);
    }

    #[test]
    fn freed_data_pin_is_still_readable() {
        let mailbox = RotaryMailbox::new();
        let level = Cell::new(false);
        let mut capture = RotaryCapture::new(MockPin::new(&level), &mailbox);
        capture.on_falling_edge(10);

        let pin = capture.free();
        assert_eq!(pin.is_low(), Ok(true));
        assert_eq!(mailbox.take(), Some(Direction::Left));
    }

    #[test]
    fn newer_direction_replaces_undelivered_one() {
        let mailbox = RotaryMailbox::new();
        mailbox.post(Direction::Left);
        mailbox.post(Direction::Right);

        assert_eq!(mailbox.peek(), Some(Direction::Right));
        assert_eq!(mailbox.take(), Some(Direction::Right));
        assert_eq!(mailbox.peek(), None);
    }
}
