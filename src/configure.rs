//! Configures the microcontroller for use and returns the required pins

use hal::{
    adc::{
        config::{AdcConfig, Resolution, SampleTime},
        Adc,
    },
    gpio::{
        gpioa::{PA0, PA1, PA2},
        gpiob::{PB13, PB14},
        Analog, ErasedPin, Input, Output,
    },
    otg_fs::{UsbBusType, USB},
    pac::{self, ADC1, TIM2},
    prelude::*,
    timer::MonoTimerUs,
};
use panel_input::HalSampler;
use stm32f4xx_hal as hal;
use switch_hal::{ActiveLow, IntoSwitch, Switch};
use usb_device::class_prelude::UsbBusAllocator;

use crate::{encoder::EncoderClock, usb::interface::UsbInterface};

/// The period between two polls of the panel inputs
pub const POLL_PERIOD_MS: u32 = 40;

/// The on and off time of the heartbeat LED
pub const BLINK_TIME_MS: u32 = 250;

/// The encoder data line, sampled on each clock edge
pub type EncoderDataPin = PB13<Input>;

/// The sampler over the encoder switch, keypad ladder and both sliders
pub type PanelSampler = HalSampler<
    ADC1,
    Adc<ADC1>,
    PB14<Input>,
    PA2<Analog>,
    PA0<Analog>,
    PA1<Analog>,
>;

/// Configures the micro for operation
pub fn configure<'a>(
    _core_peripherals: cortex_m::Peripherals,
    device_peripherals: pac::Peripherals,
    usb_alloc: &'static mut Option<UsbBusAllocator<stm32f4xx_hal::otg_fs::UsbBusType>>,
    usb_mem: &'static mut [u32; 1024],
) -> Configuration<'a> {
    // Take ownership over raw device and convert it into the corresponding HAL struct
    let rcc = device_peripherals.RCC.constrain();

    // Freeze the configuration of all the clocks in the system and store the
    // frozen frequencies in `clocks`. The black pill carries a 25MHz crystal.
    let clocks = rcc
        .cfgr
        .use_hse(25.MHz())
        .sysclk(84.MHz())
        .require_pll48clk()
        .freeze();
    assert!(clocks.is_pll48clk_valid());

    let timer: MonoTimerUs<TIM2> = device_peripherals.TIM2.monotonic_us(&clocks);
    let mut syscfg = device_peripherals.SYSCFG.constrain();

    // Acquire GPIO
    let gpioa = device_peripherals.GPIOA.split();
    let gpiob = device_peripherals.GPIOB.split();
    let gpioc = device_peripherals.GPIOC.split();

    // the black pill LED sinks into PC13
    let led_pin = gpioc
        .pc13
        .into_push_pull_output()
        .erase()
        .into_active_low_switch();

    // configure USB
    let usb = USB {
        usb_global: device_peripherals.OTG_FS_GLOBAL,
        usb_device: device_peripherals.OTG_FS_DEVICE,
        usb_pwrclk: device_peripherals.OTG_FS_PWRCLK,
        pin_dm: gpioa.pa11.into_alternate(),
        pin_dp: gpioa.pa12.into_alternate(),
        hclk: clocks.hclk(),
    };
    let usb_allocator: &'a UsbBusAllocator<UsbBusType> =
        usb_alloc.insert(UsbBusType::new(usb, usb_mem));

    // the keypad thresholds and slider range are calibrated for 10 bit readings
    let adc_config = AdcConfig::default()
        .resolution(Resolution::Ten)
        .default_sample_time(SampleTime::Cycles_480);
    let adc = Adc::adc1(device_peripherals.ADC1, true, adc_config);

    let sampler = HalSampler::new(
        adc,
        gpiob.pb14.into_pull_up_input(),
        gpioa.pa2.into_analog(),
        gpioa.pa0.into_analog(),
        gpioa.pa1.into_analog(),
    );

    // encoder clock and data idle high and are pulled low by the detents
    let encoder_clock = EncoderClock::new(
        gpiob.pb12.into_pull_up_input(),
        device_peripherals.EXTI,
        &mut syscfg,
    );
    let encoder_data = gpiob.pb13.into_pull_up_input();

    Configuration {
        usb: UsbInterface::new(usb_allocator),
        led_pin,
        timer,

        sampler,
        encoder_clock,
        encoder_data,
    }
}

/// The peripherals the firmware runs on, ready for use
pub struct Configuration<'a> {
    /// The heartbeat LED
    pub led_pin: Switch<ErasedPin<Output>, ActiveLow>,
    /// The RTIC monotonic
    pub timer: MonoTimerUs<TIM2>,
    /// The USB HID joystick
    pub usb: UsbInterface<'a>,

    /// The polled panel inputs
    pub sampler: PanelSampler,
    /// The encoder clock interrupt line
    pub encoder_clock: EncoderClock,
    /// The encoder data line
    pub encoder_data: EncoderDataPin,
}
