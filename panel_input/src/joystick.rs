//! The HID joystick report the panel sends: 32 buttons followed by the Rx and
//! Ry axes, each axis a little endian `u16` in `SLIDER_MIN..=SLIDER_MAX`.

use crate::{
    config::{SLIDER_MAX, SLIDER_MIN},
    Axis, ButtonId,
};

/// The number of buttons in the report
pub const BUTTON_COUNT: u8 = 32;

/// The size of one input report in bytes
pub const REPORT_LEN: usize = BUTTON_COUNT as usize / 8 + 2 * 2;

const AXIS_MIN: [u8; 2] = SLIDER_MIN.to_le_bytes();
const AXIS_MAX: [u8; 2] = SLIDER_MAX.to_le_bytes();

/// HID report descriptor matching [JoystickReport::to_bytes]. The axis
/// logical range is the slider range rather than the full `u16` range.
#[rustfmt::skip]
pub const JOYSTICK_DESCRIPTOR: [u8; 41] = [
    0x05, 0x01,                         // usage page (generic desktop)
    0x09, 0x04,                         // usage (joystick)
    0xa1, 0x01,                         // collection (application)
    0x05, 0x09,                         //   usage page (button)
    0x19, 0x01,                         //   usage minimum (1)
    0x29, BUTTON_COUNT,                 //   usage maximum (32)
    0x15, 0x00,                         //   logical minimum (0)
    0x25, 0x01,                         //   logical maximum (1)
    0x75, 0x01,                         //   report size (1)
    0x95, BUTTON_COUNT,                 //   report count (32)
    0x81, 0x02,                         //   input (data, variable, absolute)
    0x05, 0x01,                         //   usage page (generic desktop)
    0x09, 0x33,                         //   usage (rx)
    0x09, 0x34,                         //   usage (ry)
    0x16, AXIS_MIN[0], AXIS_MIN[1],     //   logical minimum
    0x26, AXIS_MAX[0], AXIS_MAX[1],     //   logical maximum
    0x75, 0x10,                         //   report size (16)
    0x95, 0x02,                         //   report count (2)
    0x81, 0x02,                         //   input (data, variable, absolute)
    0xc0,                               // end collection
];

/// The button and axis state sent to the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoystickReport {
    buttons: [u8; BUTTON_COUNT as usize / 8],
    rx: u16,
    ry: u16,
}

impl JoystickReport {
    /// Presses or releases a button. Ids outside the report are ignored.
    pub fn set_button(&mut self, id: ButtonId, pressed: bool) {
        if id.index() >= BUTTON_COUNT {
            return;
        }

        let byte = usize::from(id.index() / 8);
        let mask = 1u8 << (id.index() % 8);
        if pressed {
            self.buttons[byte] |= mask;
        } else {
            self.buttons[byte] &= !mask;
        }
    }

    /// True if the button is pressed in this report
    pub fn is_pressed(&self, id: ButtonId) -> bool {
        self.buttons
            .get(usize::from(id.index() / 8))
            .map_or(false, |byte| byte & (1 << (id.index() % 8)) != 0)
    }

    /// Sets an axis, clamped to the slider range
    pub fn set_axis(&mut self, axis: Axis, value: u16) {
        let value = value.clamp(SLIDER_MIN, SLIDER_MAX);
        match axis {
            Axis::Rx => self.rx = value,
            Axis::Ry => self.ry = value,
        }
    }

    /// The current value of an axis
    pub fn axis(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Rx => self.rx,
            Axis::Ry => self.ry,
        }
    }

    /// The report as it goes on the wire
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let rx = self.rx.to_le_bytes();
        let ry = self.ry.to_le_bytes();
        [
            self.buttons[0],
            self.buttons[1],
            self.buttons[2],
            self.buttons[3],
            rx[0],
            rx[1],
            ry[0],
            ry[1],
        ]
    }
}
