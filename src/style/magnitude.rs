/// Marker radius in pixels per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Severity range of earthquake magnitudes sharing one marker color.
#[derive(Debug, PartialEq)]
pub struct MagnitudeBucket {
    /// Exclusive upper bound, the lower bound is the previous bucket's upper bound.
    pub upper_bound: f64,
    /// Fill color as a CSS hex string.
    pub color: &'static str,
    /// Range label shown in the legend.
    pub label: &'static str,
}

/// Magnitude buckets ordered by severity. A magnitude belongs to the first bucket whose upper bound
/// it is strictly below, so boundary values land in the higher bucket.
pub static MAGNITUDE_BUCKETS: [MagnitudeBucket; 6] = [
    MagnitudeBucket {
        upper_bound: 1.0,
        color: "#99CC00",
        label: "0-1",
    },
    MagnitudeBucket {
        upper_bound: 2.0,
        color: "#CCFF33",
        label: "1-2",
    },
    MagnitudeBucket {
        upper_bound: 3.0,
        color: "#FFCC00",
        label: "2-3",
    },
    MagnitudeBucket {
        upper_bound: 4.0,
        color: "#FF9900",
        label: "3-4",
    },
    MagnitudeBucket {
        upper_bound: 5.0,
        color: "#FF5050",
        label: "4-5",
    },
    MagnitudeBucket {
        upper_bound: f64::INFINITY,
        color: "#FF0000",
        label: "5+",
    },
];

/// Marker radius for a magnitude. Not clamped, negative and NaN magnitudes propagate.
pub fn resolve_radius(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Color bucket for a magnitude. Total over all `f64` values: anything not below 5, NaN included,
/// falls into the last bucket.
pub fn resolve_color(magnitude: f64) -> &'static MagnitudeBucket {
    let default_bucket = &MAGNITUDE_BUCKETS[MAGNITUDE_BUCKETS.len() - 1];
    MAGNITUDE_BUCKETS
        .iter()
        .find(|bucket| magnitude < bucket.upper_bound)
        .unwrap_or(default_bucket)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::{resolve_color, resolve_radius, MagnitudeBucket, MAGNITUDE_BUCKETS};

    fn severity(bucket: &MagnitudeBucket) -> usize {
        MAGNITUDE_BUCKETS
            .iter()
            .position(|candidate| std::ptr::eq(candidate, bucket))
            .unwrap()
    }

    #[rstest]
    #[case(-3.0, "#99CC00")]
    #[case(0.0, "#99CC00")]
    #[case(0.999, "#99CC00")]
    #[case(1.0, "#CCFF33")]
    #[case(1.5, "#CCFF33")]
    #[case(2.0, "#FFCC00")]
    #[case(3.0, "#FF9900")]
    #[case(4.0, "#FF5050")]
    #[case(4.999, "#FF5050")]
    #[case(5.0, "#FF0000")]
    #[case(9.1, "#FF0000")]
    #[case(f64::INFINITY, "#FF0000")]
    #[case(f64::NEG_INFINITY, "#99CC00")]
    fn test_resolve_color(#[case] magnitude: f64, #[case] expected_color: &str) {
        assert_eq!(resolve_color(magnitude).color, expected_color);
    }

    #[test]
    fn test_resolve_color_nan_falls_into_highest_bucket() {
        // A missing magnitude ends up as NaN, which fails every bound comparison.
        assert_eq!(resolve_color(f64::NAN).color, "#FF0000");
    }

    #[test]
    fn test_resolve_color_is_monotonic() {
        let magnitudes: Vec<f64> = (-20..=120).map(|step| step as f64 * 0.05).collect();
        for pair in magnitudes.windows(2) {
            assert!(
                severity(resolve_color(pair[0])) <= severity(resolve_color(pair[1])),
                "severity decreased between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_buckets_are_ordered() {
        for pair in MAGNITUDE_BUCKETS.windows(2) {
            assert!(pair[0].upper_bound < pair[1].upper_bound);
        }
        assert_eq!(MAGNITUDE_BUCKETS.last().unwrap().upper_bound, f64::INFINITY);
    }

    #[rstest]
    #[case(2.0, 10.0)]
    #[case(0.0, 0.0)]
    #[case(4.4, 22.0)]
    #[case(-1.0, -5.0)]
    fn test_resolve_radius(#[case] magnitude: f64, #[case] expected_radius: f64) {
        assert_abs_diff_eq!(resolve_radius(magnitude), expected_radius, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.3)]
    #[case(1.7)]
    #[case(6.25)]
    fn test_resolve_radius_is_linear(#[case] magnitude: f64) {
        assert_abs_diff_eq!(
            resolve_radius(2.0 * magnitude),
            2.0 * resolve_radius(magnitude),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_resolve_radius_propagates_nan() {
        assert!(resolve_radius(f64::NAN).is_nan());
    }
}
