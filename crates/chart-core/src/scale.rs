// File: crates/chart-core/src/scale.rs
// Summary: Nice-number value scale derivation plus value (linear) and category (band) pixel transforms.

use tracing::trace;

use crate::error::{ChartError, Result};

/// Value coordinate (data space).
pub type Value = f64;

/// Default padding fraction added around the data range.
pub const DEFAULT_EXTRA: f64 = 0.05;
/// Number of equal intervals assumed by grid and tick layout.
pub const Y_STEPS: usize = 5;

/// Round `v` up to a 1/2/5/10 multiple of its power of ten.
///
/// Returns `None` for non-positive or non-finite input, where no magnitude exists.
pub fn nice_step(v: f64) -> Option<f64> {
    if !v.is_finite() || v <= 0.0 {
        return None;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    let fraction = v / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    Some(magnitude * nice)
}

/// Axis-ready range derived from data extrema.
///
/// `min`/`max` are padded by `extra`, snapped to a nice increment, and
/// pinned at zero from below when the data has no negative values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    min_real: Value,
    max_real: Value,
    extra: f64,
    decimals: u32,
    increment: f64,
    min: Value,
    max: Value,
}

impl Scale {
    /// Derive a scale with default padding and an integer axis.
    pub fn from_extrema(max: Value, min: Value) -> Result<Self> {
        Self::new(max, min, DEFAULT_EXTRA, 0)
    }

    pub fn new(max: Value, min: Value, extra: f64, decimals: u32) -> Result<Self> {
        let invalid = || ChartError::InvalidScale { min, max };
        if !max.is_finite() || !min.is_finite() || !extra.is_finite() {
            return Err(invalid());
        }

        let range = max - min;
        let padded_range = range * (1.0 + extra);
        let increment = nice_step(padded_range / Y_STEPS as f64).ok_or_else(invalid)?;

        let mut scale_max = ((max + extra * range) / increment).ceil() * increment;
        let mut scale_min = ((min - extra * range) / increment).floor() * increment;
        if min >= 0.0 {
            scale_min = 0.0;
        }

        if decimals == 0 {
            scale_max = scale_max.trunc();
            scale_min = scale_min.trunc();
        } else {
            let p = 10f64.powi(decimals as i32);
            scale_max = (scale_max * p).round() / p;
            scale_min = (scale_min * p).round() / p;
        }

        if scale_min >= scale_max {
            return Err(ChartError::InvalidScale { min: scale_min, max: scale_max });
        }
        trace!(min_real = min, max_real = max, increment, min = scale_min, max = scale_max, "derived scale");
        Ok(Self { min_real: min, max_real: max, extra, decimals, increment, min: scale_min, max: scale_max })
    }

    /// Smallest data value the scale was derived from.
    pub fn min_real(&self) -> Value { self.min_real }
    /// Largest data value the scale was derived from.
    pub fn max_real(&self) -> Value { self.max_real }
    pub fn extra(&self) -> f64 { self.extra }
    pub fn decimals(&self) -> u32 { self.decimals }
    pub fn increment(&self) -> f64 { self.increment }
    pub fn min(&self) -> Value { self.min }
    pub fn max(&self) -> Value { self.max }
    pub fn span(&self) -> Value { self.max - self.min }

    /// Tick values from `max` down to `min`, `Y_STEPS + 1` of them.
    pub fn ticks_descending(&self) -> Vec<Value> {
        let step = self.span() / Y_STEPS as f64;
        (0..=Y_STEPS).map(|i| self.max - step * i as f64).collect()
    }
}

/// Linear value-to-pixel transform. `vmin` maps to `start_px`, `vmax` to `end_px`.
///
/// Vertical charts pass `(bottom, top)`; horizontal bars pass `(left, right)`.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub start_px: f32,
    pub end_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(start_px: f32, end_px: f32, vmin: Value, vmax: Value) -> Self {
        Self { start_px, end_px, vmin, vmax }
    }

    pub fn from_scale(scale: &Scale, start_px: f32, end_px: f32) -> Self {
        Self::new_linear(start_px, end_px, scale.min(), scale.max())
    }

    #[inline]
    pub fn to_px(&self, v: Value) -> f32 {
        let span = self.vmax - self.vmin;
        self.start_px + ((v - self.vmin) / span) as f32 * (self.end_px - self.start_px)
    }
}

/// Equal category slots along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub start_px: f32,
    pub slot: f32,
    pub count: usize,
}

impl BandScale {
    pub fn new(start_px: f32, end_px: f32, count: usize) -> Self {
        let slot = if count == 0 { 0.0 } else { (end_px - start_px) / count as f32 };
        Self { start_px, slot, count }
    }

    #[inline]
    pub fn slot_start(&self, i: usize) -> f32 {
        self.start_px + self.slot * i as f32
    }

    #[inline]
    pub fn center(&self, i: usize) -> f32 {
        self.slot_start(i) + self.slot * 0.5
    }

    /// Sub-slot `j` of `n` inside slot `i`: 10% padding before, 80% shared by the group.
    pub fn grouped(&self, i: usize, j: usize, n: usize) -> (f32, f32) {
        let width = self.slot * 0.8 / n.max(1) as f32;
        let start = self.slot_start(i) + self.slot * 0.1 + width * j as f32;
        (start, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_picks_one_two_five_ten() {
        assert_eq!(nice_step(1.0), Some(1.0));
        assert_eq!(nice_step(1.5), Some(2.0));
        assert_eq!(nice_step(3.15), Some(5.0));
        assert_eq!(nice_step(7.0), Some(10.0));
        assert_eq!(nice_step(12.0), Some(20.0));
        assert_eq!(nice_step(0.0), None);
        assert_eq!(nice_step(-3.0), None);
        assert_eq!(nice_step(f64::NAN), None);
    }

    #[test]
    fn nice_step_is_smallest_candidate_above_value() {
        let mut v = 0.0013;
        while v < 1.0e7 {
            let step = nice_step(v).unwrap();
            let k = step.log10().floor();
            let lead = (step / 10f64.powf(k)).round();
            assert!([1.0, 2.0, 5.0, 10.0].contains(&lead), "v={v} step={step}");
            assert!(step >= v * (1.0 - 1e-9), "v={v} step={step}");
            assert!(step < v * 10.0 + 1e-9, "v={v} step={step}");
            v *= 1.37;
        }
    }

    #[test]
    fn non_negative_data_starts_at_zero() {
        let s = Scale::from_extrema(20.0, 5.0).unwrap();
        assert_eq!(s.min(), 0.0);
        assert_eq!(s.max(), 25.0);
        assert_eq!(s.increment(), 5.0);
        assert_eq!((s.min_real(), s.max_real()), (5.0, 20.0));
    }

    #[test]
    fn negative_data_gets_padding_below() {
        let s = Scale::from_extrema(40.0, -20.0).unwrap();
        // range 60, padded 63, /5 = 12.6 -> 20
        assert_eq!(s.increment(), 20.0);
        assert_eq!(s.min(), -40.0);
        assert_eq!(s.max(), 60.0);
        assert!(s.min() < -20.0 - 0.05 * 60.0);
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert!(matches!(Scale::from_extrema(0.0, 0.0), Err(ChartError::InvalidScale { .. })));
        assert!(Scale::from_extrema(10.0, 10.0).is_err());
        assert!(Scale::from_extrema(f64::INFINITY, 0.0).is_err());
        assert!(Scale::from_extrema(1.0, 5.0).is_err());
    }

    #[test]
    fn integer_axis_truncates_fractional_bounds() {
        // 0.3 pads to an increment of 0.1 and a max of 0.4, truncated to 0.
        assert!(Scale::from_extrema(0.3, 0.0).is_err());
        let s = Scale::new(0.3, 0.0, DEFAULT_EXTRA, 1).unwrap();
        assert_eq!(s.max(), 0.4);
        assert_eq!(s.decimals(), 1);
    }

    #[test]
    fn ticks_run_from_max_to_min() {
        let s = Scale::from_extrema(20.0, 5.0).unwrap();
        assert_eq!(s.ticks_descending(), vec![25.0, 20.0, 15.0, 10.0, 5.0, 0.0]);
    }

    #[test]
    fn value_scale_maps_min_to_bottom() {
        let vs = ValueScale::new_linear(250.0, 50.0, 0.0, 100.0);
        assert_eq!(vs.to_px(0.0), 250.0);
        assert_eq!(vs.to_px(100.0), 50.0);
        assert_eq!(vs.to_px(50.0), 150.0);
        assert_eq!(ValueScale::new_linear(50.0, 250.0, 0.0, 100.0).to_px(25.0), 100.0);
    }

    #[test]
    fn band_scale_centers_and_groups() {
        let b = BandScale::new(70.0, 670.0, 3);
        assert_eq!(b.slot, 200.0);
        assert_eq!(b.center(0), 170.0);
        let (start, width) = b.grouped(1, 1, 2);
        assert_eq!(width, 80.0);
        assert_eq!(start, 270.0 + 20.0 + 80.0);
    }
}
