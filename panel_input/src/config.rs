//! Fixed wiring and calibration of the panel. These tables are checked when
//! the constants are evaluated, so a malformed table fails the build.

use crate::{keypad::KeypadLadder, rotary::RotaryLayout, ButtonId};

/// Minimum time between two accepted encoder clock edges
pub const DEBOUNCE_DELAY_MS: u32 = 5;

/// Highest value returned by the 10 bit ADC
pub const ANALOG_MAX: u16 = 1023;

/// Lowest slider value reported to the host
pub const SLIDER_MIN: u16 = 0;

/// Highest slider value reported to the host. The ADC range is narrowed to a
/// third to stop the axes from fluttering on analog noise.
pub const SLIDER_MAX: u16 = 341;

/// Readings at or below this value mean no keypad key is closed
pub const KEYPAD_NO_PRESS_FLOOR: u16 = 100;

/// Rotary buttons, two per mode: `[left, right]` for mode 0, then mode 1, ...
pub const ROTARY_BUTTONS: [ButtonId; 8] = [
    ButtonId(24),
    ButtonId(25),
    ButtonId(26),
    ButtonId(27),
    ButtonId(28),
    ButtonId(29),
    ButtonId(30),
    ButtonId(31),
];

/// Logical ids of the keypad keys, in ladder order
pub const KEYPAD_BUTTONS: [ButtonId; 12] = [
    ButtonId(8),
    ButtonId(4),
    ButtonId(0),
    ButtonId(9),
    ButtonId(5),
    ButtonId(1),
    ButtonId(10),
    ButtonId(6),
    ButtonId(2),
    ButtonId(11),
    ButtonId(7),
    ButtonId(3),
];

/// Upper bounds of each ladder band. One more entry than there are keys, the
/// last one acting as the upper sentinel.
pub const KEYPAD_THRESHOLDS: [u16; 13] = [
    400, 500, 530, 560, 590, 630, 670, 720, 770, 830, 910, 1000, 1030,
];

/// The encoder mode table of the panel
pub const ROTARY_LAYOUT: RotaryLayout = RotaryLayout::new(&ROTARY_BUTTONS);

/// The keypad ladder of the panel
pub const KEYPAD_LADDER: KeypadLadder =
    KeypadLadder::new(&KEYPAD_BUTTONS, &KEYPAD_THRESHOLDS, KEYPAD_NO_PRESS_FLOOR);
