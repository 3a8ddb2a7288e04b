//! USB HID joystick interface

pub mod interface;
