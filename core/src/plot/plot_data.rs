// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A cache of function samples for a scrolling plot. When the visible x range slides by
//! a few steps, only the newly exposed samples are computed, and the ones that scrolled
//! out of view are dropped by the [`RingBuffer`].
//!
//! The cache never holds more than `size` samples, so a range that needs more than that
//! is rejected up front.

use std::ops::{AddAssign, SubAssign};

use super::DEBUG_PLOT;
use crate::{CalcError, RingBuffer, call_if_true};

/// Anything that can be sampled as `y = f(x)`.
pub trait FunctionSource {
    /// The value at `x`, or `None` where the function is undefined. The plot has a gap
    /// at every `None`. This is called once per sample that isn't cached already, in
    /// no particular order of `x`.
    fn function_value(&mut self, x: f64) -> Option<f64>;
}

/// An inclusive range on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interval {
    pub x0: f64,
    pub xf: f64,
}

impl Interval {
    #[must_use]
    pub fn new(x0: f64, xf: f64) -> Self { Self { x0, xf } }

    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.x0 <= other.xf && other.x0 <= self.xf
    }
}

/// Slide both ends.
impl AddAssign<f64> for Interval {
    fn add_assign(&mut self, rhs: f64) {
        self.x0 += rhs;
        self.xf += rhs;
    }
}

impl SubAssign<f64> for Interval {
    fn sub_assign(&mut self, rhs: f64) {
        self.x0 -= rhs;
        self.xf -= rhs;
    }
}

/// What [`PlotData::update`] had to do to bring the cache up to date. The counts are
/// the number of calls made to [`FunctionSource::function_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotUpdate {
    /// The cache was thrown away and this many samples were computed.
    Resampled(usize),
    /// This many samples were added before the old first one. The same number (or
    /// fewer, if the cache wasn't full) dropped off the right end.
    Prepended(usize),
    /// This many samples were added after the old last one. The same number (or fewer,
    /// if the cache wasn't full) dropped off the left end.
    Appended(usize),
    /// The range grew on both sides.
    Widened { prepended: usize, appended: usize },
    /// The cached samples already cover the range.
    Unchanged,
}

/// The samples sit on a grid, `origin + dx * index`, which is fixed when everything is
/// sampled again. Positions are always computed from the integer index, so they never
/// drift however far the range scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    samples: RingBuffer<Option<f64>>,
    origin: f64,
    /// Grid indices of the first and last cached samples.
    first: i64,
    last: i64,
    size: usize,
    dx: f64,
    stale: bool,
}

impl Default for PlotData {
    fn default() -> Self { Self::new() }
}

/// How many grid points `xrange` spans when stepping by `dx`. Half a step of slack keeps
/// the last point from being lost to rounding, eg: `0..1` by `0.1` is 11 points.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_count(xrange: Interval, dx: f64) -> usize {
    (((xrange.xf - xrange.x0) / dx + 0.5).floor() as usize).saturating_add(1)
}

impl PlotData {
    /// Starts out stale, so the first [`Self::update`] samples everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: RingBuffer::new(0),
            origin: 0.0,
            first: 0,
            last: -1,
            size: 0,
            dx: 0.0,
            stale: true,
        }
    }

    /// Force the next [`Self::update`] to sample everything again, eg: when a
    /// different function is going to be plotted.
    pub fn mark_stale(&mut self) { self.stale = true; }

    /// The x positions of the first and last cached samples.
    #[must_use]
    pub fn interval(&self) -> Interval {
        if self.samples.is_empty() {
            return Interval::default();
        }
        Interval::new(self.x_at(self.first), self.x_at(self.last))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.samples.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    #[allow(clippy::cast_precision_loss)]
    fn x_at(&self, index: i64) -> f64 { self.origin + self.dx * index as f64 }

    /// The grid index nearest to `x`.
    #[allow(clippy::cast_possible_truncation)]
    fn index_of(&self, x: f64) -> i64 { ((x - self.origin) / self.dx).round() as i64 }

    /// Bring the samples up to date for `xrange`, stepping by `dx`, keeping at most
    /// `size` samples. There are 4 cases:
    /// 1. The cache is stale, `size` or `dx` changed, or `xrange` doesn't overlap the
    ///    cached interval: sample everything.
    /// 2. `xrange` starts before the cached interval: prepend the new samples on the left.
    /// 3. `xrange` ends after the cached interval: append the new samples on the right.
    /// 4. Otherwise nothing needs to be computed.
    ///
    /// The read cursor is reset afterwards, so [`Self::next_sample`] starts from the
    /// first sample.
    ///
    /// # Errors
    ///
    /// - [`CalcError::InvalidPlotRange`] if `dx` is not a positive finite number, `size`
    ///   is zero, `xrange` is empty or not finite, or `dx` is too small to move away
    ///   from the ends of `xrange` in floating point.
    /// - [`CalcError::PlotRangeTooWide`] if `xrange` needs more than `size` samples.
    #[allow(clippy::float_cmp)]
    pub fn update(
        &mut self,
        source: &mut impl FunctionSource,
        size: usize,
        xrange: Interval,
        dx: f64,
    ) -> Result<PlotUpdate, CalcError> {
        let is_valid = size > 0
            && dx.is_finite()
            && dx > 0.0
            && xrange.x0.is_finite()
            && xrange.xf.is_finite()
            && xrange.x0 <= xrange.xf
            && xrange.x0 + dx != xrange.x0
            && xrange.xf + dx != xrange.xf;
        if !is_valid {
            return Err(CalcError::InvalidPlotRange {
                x0: xrange.x0,
                xf: xrange.xf,
                points: size,
            });
        }

        let needed = sample_count(xrange, dx);
        if needed > size {
            return Err(CalcError::PlotRangeTooWide {
                x0: xrange.x0,
                xf: xrange.xf,
                dx,
                needed,
                points: size,
            });
        }

        let needs_resample = self.stale
            || self.size != size
            || self.dx != dx
            || self.samples.is_empty()
            || !self.interval().overlaps(&xrange);

        let result = if needs_resample {
            self.resample(source, size, xrange, dx, needed)
        } else {
            let prepended = self.prepend(source, self.index_of(xrange.x0));
            let appended = self.append(source, self.index_of(xrange.xf));
            match (prepended, appended) {
                (0, 0) => PlotUpdate::Unchanged,
                (prepended, 0) => PlotUpdate::Prepended(prepended),
                (0, appended) => PlotUpdate::Appended(appended),
                (prepended, appended) => PlotUpdate::Widened {
                    prepended,
                    appended,
                },
            }
        };

        self.samples.reset();

        call_if_true!(DEBUG_PLOT, {
            tracing::debug!(
                message = "📈 Plot samples updated",
                result = ?result,
                interval = ?self.interval()
            );
        });

        Ok(result)
    }

    fn resample(
        &mut self,
        source: &mut impl FunctionSource,
        size: usize,
        xrange: Interval,
        dx: f64,
        count: usize,
    ) -> PlotUpdate {
        self.samples = RingBuffer::new(size);
        self.size = size;
        self.dx = dx;
        self.origin = xrange.x0;
        self.stale = false;

        self.first = 0;
        self.last = -1;
        for _ in 0..count {
            self.last += 1;
            let x = self.x_at(self.last);
            self.samples.add_at_current_position(source.function_value(x));
        }

        PlotUpdate::Resampled(count)
    }

    /// Prepend the samples from `target_first` up to the cached first one. Returns how
    /// many were computed.
    fn prepend(&mut self, source: &mut impl FunctionSource, target_first: i64) -> usize {
        let mut count = 0;
        while self.first > target_first {
            self.first -= 1;
            let x = self.x_at(self.first);
            self.samples.prepend_to_beginning(source.function_value(x));
            count += 1;
        }
        self.last = self.first + self.retained_span();
        count
    }

    /// Append the samples after the cached last one up to `target_last`. Returns how
    /// many were computed.
    fn append(&mut self, source: &mut impl FunctionSource, target_last: i64) -> usize {
        let mut count = 0;
        while self.last < target_last {
            self.last += 1;
            let x = self.x_at(self.last);
            self.samples.append_to_end(source.function_value(x));
            count += 1;
        }
        self.first = self.last - self.retained_span();
        count
    }

    /// The distance in grid steps between the first and last retained samples.
    #[allow(clippy::cast_possible_wrap)]
    fn retained_span(&self) -> i64 { self.samples.len() as i64 - 1 }

    /// The next sample, from left to right. The outer `None` means there are no more
    /// samples, the inner one means the function is undefined there.
    pub fn next_sample(&mut self) -> Option<Option<f64>> { self.samples.next().copied() }

    /// All the samples from left to right, without moving the read cursor.
    #[must_use]
    pub fn samples(&self) -> Vec<Option<f64>> { self.samples.iter().copied().collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    /// Records every x it is asked about. Undefined for negative x.
    #[derive(Debug, Default)]
    struct SqrtSource {
        calls: Vec<f64>,
    }

    impl FunctionSource for SqrtSource {
        fn function_value(&mut self, x: f64) -> Option<f64> {
            self.calls.push(x);
            (x >= 0.0).then(|| x.sqrt())
        }
    }

    #[test]
    fn test_first_update_resamples() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        let result = plot.update(&mut source, 5, Interval::new(-1.0, 3.0), 1.0);
        assert_eq2!(result, Ok(PlotUpdate::Resampled(5)));
        assert_eq2!(source.calls, vec![-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq2!(
            plot.samples(),
            vec![None, Some(0.0), Some(1.0), Some(2.0_f64.sqrt()), Some(3.0_f64.sqrt())]
        );
        assert_eq2!(plot.interval(), Interval::new(-1.0, 3.0));
    }

    #[test]
    fn test_next_sample_tells_gaps_from_the_end() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 3, Interval::new(-1.0, 1.0), 1.0).unwrap();

        assert_eq2!(plot.next_sample(), Some(None));
        assert_eq2!(plot.next_sample(), Some(Some(0.0)));
        assert_eq2!(plot.next_sample(), Some(Some(1.0)));
        assert_eq2!(plot.next_sample(), None);
    }

    #[test]
    fn test_scroll_right_appends_only_new_samples() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 4, Interval::new(0.0, 3.0), 1.0).unwrap();
        source.calls.clear();

        let result = plot.update(&mut source, 4, Interval::new(2.0, 5.0), 1.0);
        assert_eq2!(result, Ok(PlotUpdate::Appended(2)));
        assert_eq2!(source.calls, vec![4.0, 5.0]);
        assert_eq2!(plot.interval(), Interval::new(2.0, 5.0));
        assert_eq2!(
            plot.samples(),
            vec![
                Some(2.0_f64.sqrt()),
                Some(3.0_f64.sqrt()),
                Some(2.0),
                Some(5.0_f64.sqrt()),
            ]
        );
    }

    #[test]
    fn test_scroll_left_prepends_only_new_samples() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 3, Interval::new(1.0, 2.0), 0.5).unwrap();
        source.calls.clear();

        let result = plot.update(&mut source, 3, Interval::new(0.0, 1.0), 0.5);
        assert_eq2!(result, Ok(PlotUpdate::Prepended(2)));
        assert_eq2!(source.calls, vec![0.5, 0.0]);
        assert_eq2!(plot.interval(), Interval::new(0.0, 1.0));
        assert_eq2!(plot.samples(), vec![Some(0.0), Some(0.5_f64.sqrt()), Some(1.0)]);
    }

    #[test]
    fn test_same_range_computes_nothing() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 3, Interval::new(0.0, 2.0), 1.0).unwrap();
        plot.next_sample();
        source.calls.clear();

        let result = plot.update(&mut source, 3, Interval::new(0.0, 2.0), 1.0);
        assert_eq2!(result, Ok(PlotUpdate::Unchanged));
        assert!(source.calls.is_empty());
        assert_eq2!(plot.next_sample(), Some(Some(0.0)));
    }

    #[test]
    fn test_changes_that_force_a_resample() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 3, Interval::new(0.0, 2.0), 1.0).unwrap();

        let result = plot.update(&mut source, 5, Interval::new(0.0, 2.0), 0.5);
        assert_eq2!(result, Ok(PlotUpdate::Resampled(5)));

        let result = plot.update(&mut source, 5, Interval::new(10.0, 12.0), 0.5);
        assert_eq2!(result, Ok(PlotUpdate::Resampled(5)));

        plot.mark_stale();
        let result = plot.update(&mut source, 5, Interval::new(10.0, 12.0), 0.5);
        assert_eq2!(result, Ok(PlotUpdate::Resampled(5)));
    }

    #[test]
    fn test_inexact_step_keeps_the_last_sample() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        let result = plot.update(&mut source, 11, Interval::new(0.0, 1.0), 0.1);
        assert_eq2!(result, Ok(PlotUpdate::Resampled(11)));
        assert_eq2!(plot.len(), 11);
    }

    #[test]
    fn test_invalid_range() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        let result = plot.update(&mut source, 3, Interval::new(2.0, 0.0), 1.0);
        assert_eq2!(
            result,
            Err(CalcError::InvalidPlotRange {
                x0: 2.0,
                xf: 0.0,
                points: 3
            })
        );
        assert!(plot.update(&mut source, 3, Interval::new(0.0, 2.0), 0.0).is_err());
        assert!(plot.update(&mut source, 0, Interval::new(0.0, 2.0), 1.0).is_err());
        assert!(source.calls.is_empty());
        assert!(plot.is_empty());
    }

    #[test]
    fn test_step_below_float_spacing_is_rejected() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        // Above 2^53, adding 1 to an f64 gives back the same number.
        let result = plot.update(&mut source, 11, Interval::new(1e16, 1e16 + 10.0), 1.0);
        assert_eq2!(
            result,
            Err(CalcError::InvalidPlotRange {
                x0: 1e16,
                xf: 1e16 + 10.0,
                points: 11
            })
        );
        assert!(source.calls.is_empty());
    }

    #[test]
    fn test_range_wider_than_the_cache_is_rejected() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        let result = plot.update(&mut source, 3, Interval::new(0.0, 10.0), 1.0);
        assert_eq2!(
            result,
            Err(CalcError::PlotRangeTooWide {
                x0: 0.0,
                xf: 10.0,
                dx: 1.0,
                needed: 11,
                points: 3
            })
        );
        assert!(source.calls.is_empty());
        assert!(plot.is_empty());
    }

    #[test]
    fn test_interval_matches_the_samples_after_scrolling() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 6, Interval::new(0.0, 2.0), 1.0).unwrap();
        assert_eq2!(plot.len(), 3);

        // Room to spare, so nothing drops off the right end.
        let result = plot.update(&mut source, 6, Interval::new(-1.0, 2.0), 1.0);
        assert_eq2!(result, Ok(PlotUpdate::Prepended(1)));
        assert_eq2!(plot.interval(), Interval::new(-1.0, 2.0));
        assert_eq2!(plot.len(), 4);

        source.calls.clear();
        let result = plot.update(&mut source, 6, Interval::new(-2.0, 3.0), 1.0);
        assert_eq2!(
            result,
            Ok(PlotUpdate::Widened {
                prepended: 1,
                appended: 1
            })
        );
        assert_eq2!(source.calls, vec![-2.0, 3.0]);
        assert_eq2!(plot.interval(), Interval::new(-2.0, 3.0));
        assert_eq2!(plot.len(), 6);

        source.calls.clear();
        let result = plot.update(&mut source, 6, Interval::new(-2.0, 3.0), 1.0);
        assert_eq2!(result, Ok(PlotUpdate::Unchanged));
        assert!(source.calls.is_empty());
    }

    #[test]
    fn test_positions_do_not_drift_when_scrolling_far() {
        let mut source = SqrtSource::default();
        let mut plot = PlotData::new();
        plot.update(&mut source, 11, Interval::new(0.0, 1.0), 0.1).unwrap();
        for step in 1..=1000 {
            let x0 = 0.1 * f64::from(step);
            plot.update(&mut source, 11, Interval::new(x0, x0 + 1.0), 0.1)
                .unwrap();
        }
        let interval = plot.interval();
        assert!((interval.x0 - 100.0).abs() < 1e-9);
        assert!((interval.xf - 101.0).abs() < 1e-9);
        assert_eq2!(plot.len(), 11);
    }
}
