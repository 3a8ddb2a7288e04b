//! The main firmware for the button panel, based on cortex_m_rtic
//!
//! A periodic task polls the encoder switch, keypad ladder and sliders and
//! sends a HID report when anything changed. The encoder clock interrupt
//! only latches the rotation direction for the next poll.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![no_main]
#![no_std]

use button_panel_rtic as _; // global logger + panicking-behavior + memory layout
use stm32f4xx_hal as hal;

use hal::timer::{fugit, MonoTimerUs};
use panel_input::{Panel, PanelOptions, RotaryCapture, RotaryMailbox};
use usb_device::class_prelude::UsbBusAllocator;

use button_panel_rtic::{
    configure::{self, EncoderDataPin, PanelSampler, POLL_PERIOD_MS},
    encoder::EncoderClock,
    usb::interface::UsbInterface,
};

/// Handoff from the encoder clock interrupt to the poll task
static ROTARY_EVENTS: RotaryMailbox = RotaryMailbox::new();

#[rtic::app(
    device = stm32f4xx_hal::pac,
    peripherals = true,
    dispatchers = [EXTI1]
)]
mod app {
    // RTIC's generated resource code names these types even when the
    // `blink` fields are cfg'd out
    #[allow(unused_imports)]
    use hal::gpio::{ErasedPin, Output};
    #[allow(unused_imports)]
    use switch_hal::{ActiveLow, Switch};
    #[cfg(feature = "blink")]
    use switch_hal::OutputSwitch;

    use super::*;

    #[monotonic(binds = TIM2, default = true)]
    type SysMono = MonoTimerUs<hal::pac::TIM2>;

    // Shared resources go here
    #[shared]
    struct Shared {
        /// The USB interface used
        usb: UsbInterface<'static>,
        /// The clock interrupt line, switched with the USB connection
        encoder_clock: EncoderClock,
    }

    // Local resources go here
    #[local]
    struct Local {
        /// Decoder state for every panel input
        panel: Panel<'static>,
        /// Raw switch and analog reads
        sampler: PanelSampler,
        /// Debounces clock edges into the rotary mailbox
        capture: RotaryCapture<'static, EncoderDataPin>,

        /// The LED pin for blinky lights
        #[cfg(feature = "blink")]
        led_pin: Switch<ErasedPin<Output>, ActiveLow>,
        /// The current state of the blinky light
        #[cfg(feature = "blink")]
        led_state: bool,
    }

    #[init(local = [
        USB_BUS: Option<UsbBusAllocator<stm32f4xx_hal::otg_fs::UsbBusType>> = None,
        USB_MEM: [u32; 1024] = [0; 1024],
    ])]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::println!("init");

        // configure all the clocks and peripherals
        let config = configure::configure(cx.core, cx.device, cx.local.USB_BUS, cx.local.USB_MEM);

        let options = PanelOptions {
            hold_reports_until_mode_selected: cfg!(feature = "hold-reports"),
        };

        // show a blinky light
        #[cfg(feature = "blink")]
        blink::spawn_after(fugit::ExtU32::millis(configure::BLINK_TIME_MS)).unwrap();

        // scan inputs
        poll_inputs::spawn_after(fugit::ExtU32::millis(POLL_PERIOD_MS)).unwrap();

        (
            Shared {
                usb: config.usb,
                encoder_clock: config.encoder_clock,
            },
            Local {
                panel: Panel::new(&ROTARY_EVENTS, options),
                sampler: config.sampler,
                capture: RotaryCapture::new(config.encoder_data, &ROTARY_EVENTS),

                #[cfg(feature = "blink")]
                led_pin: config.led_pin,
                #[cfg(feature = "blink")]
                led_state: false,
            },
            init::Monotonics(config.timer),
        )
    }

    /// Latches the encoder direction on a falling clock edge
    #[task(binds = EXTI15_10, priority = 2, local = [capture], shared = [encoder_clock])]
    fn encoder_clock_edge(mut cx: encoder_clock_edge::Context) {
        cx.shared.encoder_clock.lock(|clock| clock.clear_pending());

        let now_ms = monotonics::now().duration_since_epoch().to_millis();
        cx.local.capture.on_falling_edge(now_ms);
    }

    /// Runs every decoder and sends a report if anything changed
    #[task(local = [panel, sampler], shared = [usb, encoder_clock])]
    fn poll_inputs(mut cx: poll_inputs::Context) {
        let panel = cx.local.panel;
        let sampler = cx.local.sampler;

        let configured = cx.shared.usb.lock(|usb| {
            if !usb.is_configured() {
                return false;
            }

            panel.update(sampler, usb);
            if let Err(e) = panel.report(usb) {
                defmt::error!("Error sending USB - {:?}", e);
            }
            true
        });

        // rotation is only meaningful while a host is listening
        cx.shared.encoder_clock.lock(|clock| {
            if configured {
                clock.enable_interrupts();
            } else {
                clock.disable_interrupts();
            }
        });

        poll_inputs::spawn_after(fugit::ExtU32::millis(POLL_PERIOD_MS)).unwrap();
    }

    #[task(binds = OTG_FS, shared = [usb])]
    fn usb_interrupt(mut cx: usb_interrupt::Context) {
        cx.shared.usb.lock(|u| {
            u.poll();
        });
    }

    #[cfg(feature = "blink")]
    #[task(local = [led_pin, led_state])]
    fn blink(cx: blink::Context) {
        if *cx.local.led_state {
            cx.local.led_pin.off().ok();
            *cx.local.led_state = false;
        } else {
            cx.local.led_pin.on().ok();
            *cx.local.led_state = true;
        }

        blink::spawn_after(fugit::ExtU32::millis(configure::BLINK_TIME_MS)).unwrap();
    }
}
