//! Analog sliders, rescaled to a coarser range so that ADC noise does not
//! make the host axes flutter.

use crate::{
    config::{ANALOG_MAX, SLIDER_MAX, SLIDER_MIN},
    report::ReportAggregator,
};

/// Linearly maps a reading from `0..=ANALOG_MAX` onto
/// `SLIDER_MIN..=SLIDER_MAX`, truncating. Readings above `ANALOG_MAX` are
/// treated as full scale.
pub fn rescale(value: u16) -> u16 {
    let value = u32::from(value.min(ANALOG_MAX));
    let span = u32::from(SLIDER_MAX - SLIDER_MIN);
    let scaled = value * span / u32::from(ANALOG_MAX) + u32::from(SLIDER_MIN);

    // bounded by SLIDER_MAX
    scaled as u16
}

/// One slider channel and the last value it reported
#[derive(Default)]
pub struct SliderDecoder {
    last: Option<u16>,
}

impl SliderDecoder {
    /// Creates a channel that has not reported yet, so its first reading is
    /// always reported
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// The last reported value
    pub fn last(&self) -> Option<u16> {
        self.last
    }

    /// Applies a new reading. Returns the rescaled value if it differs from
    /// the last reported one, or None if there is nothing to report.
    pub fn update(&mut self, value: u16, report: &mut ReportAggregator) -> Option<u16> {
        let rescaled = rescale(value);
        if self.last == Some(rescaled) {
            return None;
        }

        report.mark_dirty();
        self.last = Some(rescaled);
        Some(rescaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_hits_both_ends() {
        assert_eq!(rescale(0), 0);
        assert_eq!(rescale(1023), 341);
    }

    #[test]
    fn rescale_truncates_like_integer_interpolation() {
        assert_eq!(rescale(2), 0);
        assert_eq!(rescale(3), 1);
        assert_eq!(rescale(512), 170);
    }

    #[test]
    fn rescale_is_monotonic_over_adc_range() {
        let mut previous = rescale(0);
        for value in 1..=ANALOG_MAX {
            let current = rescale(value);
            assert!(current >= previous, "value {}", value);
            assert!(current <= SLIDER_MAX);
            previous = current;
        }
    }

    #[test]
    fn out_of_range_reading_is_full_scale() {
        assert_eq!(rescale(4095), SLIDER_MAX);
    }

    #[test]
    fn repeated_reading_marks_dirty_once() {
        let mut slider = SliderDecoder::new();
        let mut report = ReportAggregator::new();
        report.discard();

        assert_eq!(slider.update(700, &mut report), Some(233));
        assert!(report.is_dirty());

        report.discard();
        assert_eq!(slider.update(700, &mut report), None);
        assert!(!report.is_dirty());
    }

    #[test]
    fn noise_within_one_step_is_suppressed() {
        let mut slider = SliderDecoder::new();
        let mut report = ReportAggregator::new();

        assert_eq!(slider.update(300, &mut report), Some(100));
        report.discard();

        assert_eq!(slider.update(301, &mut report), None);
        assert_eq!(slider.update(302, &mut report), None);
        assert!(!report.is_dirty());
        assert_eq!(slider.last(), Some(100));
    }

    #[test]
    fn first_reading_is_always_reported() {
        let mut slider = SliderDecoder::new();
        let mut report = ReportAggregator::new();
        report.discard();

        assert_eq!(slider.update(0, &mut report), Some(0));
        assert!(report.is_dirty());
    }
}
