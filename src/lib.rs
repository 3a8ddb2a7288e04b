//! Firmware support for the button panel: peripheral setup, the USB HID
//! joystick interface and the encoder clock interrupt line. The input
//! decoding itself lives in the `panel_input` crate.

#![no_main]
#![no_std]

use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4xx_hal as _; // memory layout

pub mod configure;
pub mod encoder;
pub mod usb;

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

/// Terminates the application and makes `probe-run` exit with exit-code = 0
pub fn exit() -> ! {
    loop {
        cortex_m::asm::bkpt();
    }
}
