//! Contains code for configuring and polling a USB HID interface

use stm32f4xx_hal::otg_fs::{UsbBus, USB};

use panel_input::{Axis, ButtonId, HidTransport, JoystickReport, JOYSTICK_DESCRIPTOR};
use usb_device::{
    class_prelude::UsbBusAllocator,
    device::{UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
    UsbError,
};
use usbd_hid::hid_class::HIDClass;

const USB_POLL_MS: u8 = 10;

/// A container struct for the USB joystick class and the report it sends
pub struct UsbInterface<'a> {
    /// The HID joystick class
    pub hid: HIDClass<'a, UsbBus<USB>>,
    /// The USB bus
    pub bus: UsbDevice<'a, UsbBus<USB>>,
    /// The button and axis state sent with the next report
    report: JoystickReport,
}

impl<'a> UsbInterface<'a> {
    /// Creates a new UsbInterface, configures it and returns it
    pub fn new(alloc: &'a UsbBusAllocator<UsbBus<USB>>) -> UsbInterface<'a> {
        let hid = HIDClass::new(alloc, &JOYSTICK_DESCRIPTOR, USB_POLL_MS);

        // pid.codes shared test VID/PID, the panel has no allocated PID of its own
        let bus = UsbDeviceBuilder::new(alloc, UsbVidPid(0x1209, 0x0001))
            .manufacturer("AttoZepto")
            .product("Button Panel")
            .serial_number("000001")
            .device_release(0x0010)
            .build();

        UsbInterface {
            hid,
            bus,
            report: JoystickReport::default(),
        }
    }

    /// Polls the USB device
    pub fn poll(&mut self) -> bool {
        self.bus.poll(&mut [&mut self.hid])
    }

    /// True once the host has configured the device and until it is
    /// suspended or unplugged
    pub fn is_configured(&self) -> bool {
        self.bus.state() == UsbDeviceState::Configured
    }
}

impl HidTransport for UsbInterface<'_> {
    type Error = UsbError;

    fn set_button(&mut self, id: ButtonId, pressed: bool) {
        self.report.set_button(id, pressed);
    }

    fn set_axis(&mut self, axis: Axis, value: u16) {
        self.report.set_axis(axis, value);
    }

    /// Queues the current report on the IN endpoint. Fails with
    /// `UsbError::WouldBlock` while the previous report is still in flight.
    fn send_state(&mut self) -> Result<(), UsbError> {
        self.hid.push_raw_input(&self.report.to_bytes()).map(|_| ())
    }
}
