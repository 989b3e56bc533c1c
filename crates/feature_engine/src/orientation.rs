//! Gyroscope Y/X channel cosine pass.

use contracts::{ContractError, GyroAxis};

use crate::calculator::{non_empty, WindowCalculator};
use crate::magnitude::Sample;
use crate::window::{GyroAngle, Window};

/// Fills the orientation block for each window
///
/// Treats the window's gyroscope Y values and X values as two vectors of
/// length `n` and stores `dot(Y, X) / (|Y| * |X|)`. The value is a cosine,
/// not an angle, and is not clamped to `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationAngleCalculator;

impl WindowCalculator for OrientationAngleCalculator {
    fn name(&self) -> &'static str {
        "orientation"
    }

    fn apply(&self, window: &mut Window) -> Result<(), ContractError> {
        non_empty(window)?;
        window.features.orientation = Some(gyro_angle(window.samples()));
        Ok(())
    }
}

/// Cosine similarity between the gyroscope Y and X channels
///
/// A channel that is zero across all samples has no direction; the result
/// names it (Y is checked first). Each channel is divided by its largest
/// absolute value before the sums, which leaves the cosine unchanged and
/// keeps every sum within `[0, n]` for finite input.
pub fn gyro_angle(samples: &[Sample]) -> GyroAngle {
    let (y_scale, x_scale) = samples
        .iter()
        .map(Sample::gyroscope)
        .fold((0.0_f64, 0.0_f64), |(ys, xs), g| {
            (ys.max(g.y.abs()), xs.max(g.x.abs()))
        });

    if y_scale == 0.0 {
        return GyroAngle::Degenerate(GyroAxis::Y);
    }
    if x_scale == 0.0 {
        return GyroAngle::Degenerate(GyroAxis::X);
    }

    let (dot, y_squares, x_squares) =
        samples
            .iter()
            .map(Sample::gyroscope)
            .fold((0.0, 0.0, 0.0), |(dot, yy, xx), g| {
                let (y, x) = (g.y / y_scale, g.x / x_scale);
                (dot + y * x, yy + y * y, xx + x * x)
            });

    // The largest scaled component is 1, so both sums are at least 1.
    let cosine = dot / (f64::sqrt(y_squares) * f64::sqrt(x_squares));
    debug_assert!(cosine.is_finite());
    GyroAngle::Cosine(cosine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reading, window_of};

    fn gyro_window(gyro: &[[f64; 3]]) -> Window {
        let readings: Vec<_> = gyro.iter().map(|&g| reading([0.0, 0.0, 1.0], g)).collect();
        window_of(&readings)
    }

    fn cosine_of(window: &mut Window) -> f64 {
        OrientationAngleCalculator.apply(window).unwrap();
        match window.features.orientation {
            Some(GyroAngle::Cosine(c)) => c,
            other => panic!("expected cosine, got {other:?}"),
        }
    }

    #[test]
    fn test_orthogonal_channels() {
        // Y = (1, 0), X = (0, 1)
        let mut window = gyro_window(&[[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(cosine_of(&mut window), 0.0);
    }

    #[test]
    fn test_parallel_and_antiparallel() {
        let mut same = gyro_window(&[[1.0, 2.0, 0.0], [3.0, 6.0, 0.0], [-0.5, -1.0, 9.0]]);
        assert!((cosine_of(&mut same) - 1.0).abs() < 1e-12);

        let mut opposite = gyro_window(&[[1.0, -1.0, 0.0], [2.0, -2.0, 0.0]]);
        assert!((cosine_of(&mut opposite) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_general_cosine() {
        // Y = (1, 1), X = (1, 0): cos = 1 / sqrt(2)
        let mut window = gyro_window(&[[1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!((cosine_of(&mut window) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_channel_is_degenerate() {
        let mut no_y = gyro_window(&[[1.0, 0.0, 0.3], [2.0, 0.0, 0.1]]);
        OrientationAngleCalculator.apply(&mut no_y).unwrap();
        assert_eq!(
            no_y.features.orientation,
            Some(GyroAngle::Degenerate(GyroAxis::Y))
        );

        let mut no_x = gyro_window(&[[0.0, 1.0, 0.3], [0.0, -2.0, 0.1]]);
        OrientationAngleCalculator.apply(&mut no_x).unwrap();
        assert_eq!(no_x.degenerate_axis(), Some(GyroAxis::X));
    }

    #[test]
    fn test_both_channels_zero_reports_y() {
        let mut window = gyro_window(&[[0.0, 0.0, 1.0], [0.0, 0.0, -1.0]]);
        OrientationAngleCalculator.apply(&mut window).unwrap();
        assert_eq!(window.degenerate_axis(), Some(GyroAxis::Y));
    }

    #[test]
    fn test_tiny_channels_keep_their_direction() {
        // Squares of 1e-200 underflow to zero; the scaled sums do not.
        let mut window = gyro_window(&[[1e-200, 1e-200, 0.0], [2e-200, 2e-200, 0.0]]);
        assert!((cosine_of(&mut window) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_huge_channels_stay_finite() {
        // Squares of 1e160 overflow to infinity; the scaled sums do not.
        let mut parallel = gyro_window(&[[1e160, 1e160, 0.0]]);
        assert!((cosine_of(&mut parallel) - 1.0).abs() < 1e-12);

        let mut mixed = gyro_window(&[[1e160, 1e160, 0.0], [0.0, 1e160, 0.0]]);
        let cosine = cosine_of(&mut mixed);
        assert!(cosine.is_finite());
        assert!((cosine - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);

        let mut max = gyro_window(&[[f64::MAX, -f64::MAX, 0.0], [f64::MAX, -f64::MAX, 0.0]]);
        assert!((cosine_of(&mut max) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_magnitudes_match_direct_formula() {
        let gyro = [[0.3, -1.2, 0.0], [2.5, 0.4, 0.0], [-0.7, 0.9, 0.0]];
        let (mut dot, mut yy, mut xx) = (0.0f64, 0.0f64, 0.0f64);
        for g in &gyro {
            dot += g[1] * g[0];
            yy += g[1] * g[1];
            xx += g[0] * g[0];
        }
        let expected = dot / (yy.sqrt() * xx.sqrt());

        let mut window = gyro_window(&gyro);
        assert!((cosine_of(&mut window) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_window_is_reported() {
        let err = OrientationAngleCalculator
            .apply(&mut window_of(&[]))
            .unwrap_err();
        assert!(matches!(err, ContractError::EmptyWindow { .. }));
    }
}
