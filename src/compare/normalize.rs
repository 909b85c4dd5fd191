// Statistic normalization: projects the eight heterogeneous stat scales
// onto the shared radar axis range.

use crate::config::NormalizationConfig;
use crate::dataset::{Stat, StatLine};

/// Normalize a stat line to one radar value per tracked statistic, each
/// clamped to `[0, radar_max]`.
///
/// Capped statistics scale linearly against their configured cap:
/// `raw / cap * radar_max`. Plus/Minus is signed, so its domain range
/// (default -40..+40) is rescaled linearly instead, putting an even rating
/// at the mid radius. Missing values count as zero rather than erroring.
pub fn normalize(stats: &StatLine, cfg: &NormalizationConfig) -> [f64; Stat::COUNT] {
    let mut out = [0.0; Stat::COUNT];
    for (i, stat) in Stat::ALL.iter().enumerate() {
        let raw = stats.get(*stat).unwrap_or(0.0);
        let scaled = match cfg.cap(*stat) {
            Some(cap) => raw / cap * cfg.radar_max,
            None => {
                let pm = &cfg.plus_minus;
                (raw - pm.min) / (pm.max - pm.min) * cfg.radar_max
            }
        };
        out[i] = scaled.clamp(0.0, cfg.radar_max);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlusMinusRange;

    /// The shipped default caps, inlined so these tests need no config files.
    fn default_cfg() -> NormalizationConfig {
        NormalizationConfig {
            radar_max: 130.0,
            points: 130.0,
            goals: 60.0,
            assists: 90.0,
            points_per_game: 2.0,
            even_strength_points: 90.0,
            power_play_points: 50.0,
            penalty_minutes: 70.0,
            plus_minus: PlusMinusRange {
                min: -40.0,
                max: 40.0,
            },
        }
    }

    fn line_with_plus_minus(value: f64) -> StatLine {
        StatLine {
            plus_minus: Some(value),
            ..StatLine::default()
        }
    }

    const PLUS_MINUS_AXIS: usize = 3;
    const POINTS_AXIS: usize = 0;

    #[test]
    fn all_axes_within_range_for_typical_line() {
        let stats = StatLine {
            points: Some(94.0),
            goals: Some(42.0),
            assists: Some(52.0),
            plus_minus: Some(9.0),
            points_per_game: Some(1.15),
            even_strength_points: Some(63.0),
            power_play_points: Some(26.0),
            penalty_minutes: Some(24.0),
        };
        let out = normalize(&stats, &default_cfg());
        assert_eq!(out.len(), Stat::COUNT);
        for (i, v) in out.iter().enumerate() {
            assert!(
                (0.0..=130.0).contains(v),
                "axis {i} out of range: {v}"
            );
        }
    }

    #[test]
    fn all_axes_within_range_for_extreme_lines() {
        let cfg = default_cfg();
        let extremes = [
            StatLine {
                points: Some(500.0),
                goals: Some(-10.0),
                assists: Some(1e9),
                plus_minus: Some(999.0),
                points_per_game: Some(-3.0),
                even_strength_points: Some(400.0),
                power_play_points: Some(200.0),
                penalty_minutes: Some(500.0),
            },
            StatLine::default(),
        ];
        for stats in &extremes {
            for v in normalize(stats, &cfg) {
                assert!((0.0..=130.0).contains(&v), "value out of range: {v}");
            }
        }
    }

    #[test]
    fn plus_minus_zero_maps_to_mid_radius() {
        let out = normalize(&line_with_plus_minus(0.0), &default_cfg());
        assert!((out[PLUS_MINUS_AXIS] - 65.0).abs() < 1e-9);
    }

    #[test]
    fn plus_minus_domain_endpoints() {
        let cfg = default_cfg();
        let hi = normalize(&line_with_plus_minus(40.0), &cfg);
        assert!((hi[PLUS_MINUS_AXIS] - 130.0).abs() < 1e-9);

        let lo = normalize(&line_with_plus_minus(-40.0), &cfg);
        assert!(lo[PLUS_MINUS_AXIS].abs() < 1e-9);
    }

    #[test]
    fn plus_minus_out_of_domain_clamps() {
        let cfg = default_cfg();
        let above = normalize(&line_with_plus_minus(80.0), &cfg);
        assert!((above[PLUS_MINUS_AXIS] - 130.0).abs() < 1e-9);

        let below = normalize(&line_with_plus_minus(-80.0), &cfg);
        assert!(below[PLUS_MINUS_AXIS].abs() < 1e-9);
    }

    #[test]
    fn points_at_cap_reaches_full_radius() {
        let stats = StatLine {
            points: Some(130.0),
            ..StatLine::default()
        };
        let out = normalize(&stats, &default_cfg());
        assert!((out[POINTS_AXIS] - 130.0).abs() < 1e-9);
    }

    #[test]
    fn points_above_cap_clamps() {
        let stats = StatLine {
            points: Some(260.0),
            ..StatLine::default()
        };
        let out = normalize(&stats, &default_cfg());
        assert!((out[POINTS_AXIS] - 130.0).abs() < 1e-9);
    }

    #[test]
    fn missing_values_normalize_to_zero_except_plus_minus() {
        let out = normalize(&StatLine::default(), &default_cfg());
        for (i, v) in out.iter().enumerate() {
            if i == PLUS_MINUS_AXIS {
                // Missing +/- counts as an even rating, not the axis floor.
                assert!((v - 65.0).abs() < 1e-9);
            } else {
                assert!(v.abs() < 1e-9, "axis {i} expected 0, got {v}");
            }
        }
    }

    #[test]
    fn fractional_cap_scales_points_per_game() {
        let stats = StatLine {
            points_per_game: Some(1.0),
            ..StatLine::default()
        };
        let out = normalize(&stats, &default_cfg());
        // 1.0 of a 2.0 cap is half the radius.
        assert!((out[4] - 65.0).abs() < 1e-9);
    }

    #[test]
    fn custom_radar_max_respected() {
        let mut cfg = default_cfg();
        cfg.radar_max = 100.0;
        let stats = StatLine {
            goals: Some(60.0),
            ..StatLine::default()
        };
        let out = normalize(&stats, &cfg);
        assert!((out[1] - 100.0).abs() < 1e-9);
    }
}
