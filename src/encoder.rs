//! The encoder clock line as an interrupt source

use hal::{
    gpio::{gpiob::PB12, Edge, ExtiPin, Input},
    pac::EXTI,
    syscfg::SysCfg,
};
use stm32f4xx_hal as hal;

/// The clock pin of the encoder, raising EXTI15_10 on its falling edge
pub struct EncoderClock {
    pin: PB12<Input>,
    exti: EXTI,
    enabled: bool,
}

impl EncoderClock {
    /// Routes the pin to its EXTI line and arms it for falling edges. The
    /// interrupt stays masked until [EncoderClock::enable_interrupts].
    pub fn new(mut pin: PB12<Input>, mut exti: EXTI, syscfg: &mut SysCfg) -> Self {
        pin.make_interrupt_source(syscfg);
        pin.trigger_on_edge(&mut exti, Edge::Falling);

        Self {
            pin,
            exti,
            enabled: false,
        }
    }

    /// Starts delivering clock edges to the interrupt handler
    pub fn enable_interrupts(&mut self) {
        if self.enabled {
            return;
        }

        self.pin.clear_interrupt_pending_bit();
        self.pin.enable_interrupt(&mut self.exti);
        self.enabled = true;

        #[cfg(feature = "logging")]
        defmt::info!("Encoder interrupts enabled");
    }

    /// Stops delivering clock edges. Rotation while disabled is lost.
    pub fn disable_interrupts(&mut self) {
        if !self.enabled {
            return;
        }

        self.pin.disable_interrupt(&mut self.exti);
        self.pin.clear_interrupt_pending_bit();
        self.enabled = false;

        #[cfg(feature = "logging")]
        defmt::info!("Encoder interrupts disabled");
    }

    /// Acknowledges the interrupt, must be called from the handler
    pub fn clear_pending(&mut self) {
        self.pin.clear_interrupt_pending_bit();
    }
}
