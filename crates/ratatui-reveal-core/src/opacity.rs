use crate::interval::Interval;

/// Opacity of the ghost copy drawn beneath every animated character.
pub const GHOST_OPACITY: f64 = 0.2;

/// Clamps a progress reading into [0, 1], mapping NaN to 0.
///
/// Progress comes from outside this crate, so a NaN here is a data-quality fault in the caller.
/// It is logged and treated as "nothing revealed yet".
pub fn sanitize_progress(progress: f64) -> f64 {
    nan_to_zero(progress).clamp(0.0, 1.0)
}

fn nan_to_zero(progress: f64) -> f64 {
    if progress.is_nan() {
        log::debug!("progress is NaN, defaulting to 0");
        return 0.0;
    }
    progress
}

/// Maps `progress` onto `interval` as a clamped linear ramp.
///
/// Below `interval.start` the result is 0, above `interval.end` it is 1. A zero-width interval
/// is a step at `start`.
pub fn opacity(progress: f64, interval: Interval) -> f64 {
    let progress = nan_to_zero(progress);
    let span = interval.end - interval.start;
    if span <= 0.0 {
        return if progress < interval.start { 0.0 } else { 1.0 };
    }
    ((progress - interval.start) / span).clamp(0.0, 1.0)
}

/// Coverage of two stacked layers, `over` drawn on top of `under`.
pub fn composite_over(under: f64, over: f64) -> f64 {
    let under = under.clamp(0.0, 1.0);
    let over = over.clamp(0.0, 1.0);
    1.0 - (1.0 - under) * (1.0 - over)
}

/// Visible opacity of a character once its ghost copy is accounted for.
pub fn revealed_opacity(progress: f64, interval: Interval, ghost: f64) -> f64 {
    composite_over(ghost, opacity(progress, interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-12;

    #[rstest]
    #[case(0.3, Interval::new(0.25, 0.5), 0.2)]
    #[case(0.0, Interval::new(0.5, 0.75), 0.0)]
    #[case(1.0, Interval::new(0.5, 0.75), 1.0)]
    #[case(0.625, Interval::new(0.5, 0.75), 0.5)]
    fn scenarios(#[case] progress: f64, #[case] interval: Interval, #[case] expected: f64) {
        assert!((opacity(progress, interval) - expected).abs() < EPS);
    }

    #[test]
    fn endpoints_map_to_zero_and_one() {
        let i = Interval::new(0.1, 0.4);
        assert_eq!(opacity(i.start, i), 0.0);
        assert_eq!(opacity(i.end, i), 1.0);
    }

    #[test]
    fn monotone_and_bounded_over_wide_range() {
        let i = Interval::new(0.3, 0.6);
        let mut prev = f64::NEG_INFINITY;
        for step in -200..=400 {
            let p = step as f64 / 200.0;
            let o = opacity(p, i);
            assert!((0.0..=1.0).contains(&o), "p={p} o={o}");
            assert!(o >= prev);
            prev = o;
        }
        assert_eq!(opacity(f64::INFINITY, i), 1.0);
        assert_eq!(opacity(f64::NEG_INFINITY, i), 0.0);
    }

    #[test]
    fn degenerate_interval_is_a_step() {
        let i = Interval::new(0.5, 0.5);
        assert_eq!(opacity(0.49, i), 0.0);
        assert_eq!(opacity(0.5, i), 1.0);
        assert_eq!(opacity(0.9, i), 1.0);
    }

    #[test]
    fn nan_progress_reads_as_zero() {
        assert_eq!(opacity(f64::NAN, Interval::new(0.0, 0.5)), 0.0);
        assert_eq!(sanitize_progress(f64::NAN), 0.0);
        assert_eq!(sanitize_progress(1.7), 1.0);
        assert_eq!(sanitize_progress(-0.2), 0.0);
    }

    #[test]
    fn ghost_keeps_unrevealed_text_visible() {
        let i = Interval::new(0.5, 1.0);
        assert!((revealed_opacity(0.0, i, GHOST_OPACITY) - GHOST_OPACITY).abs() < EPS);
        assert_eq!(revealed_opacity(1.0, i, GHOST_OPACITY), 1.0);
        assert!((composite_over(0.2, 0.5) - 0.6).abs() < EPS);
    }
}
