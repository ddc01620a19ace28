use labweek::{ColumnSeries, RegressionError, fit};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn perfect_line_recovers_slope_and_intercept() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [2.0, 4.0, 6.0, 8.0];
    let result = fit(&x, &y).expect("fit");

    assert_close(result.slope, 2.0, 1e-12);
    assert_close(result.intercept, 0.0, 1e-12);
    assert_close(result.r_squared, 1.0, 1e-12);
    assert!(result.p_value < 1e-6);
    assert_close(result.std_error, 0.0, 1e-9);
}

#[test]
fn noisy_line_stays_near_the_true_coefficients() {
    let x: Vec<f64> = (1..=10).map(f64::from).collect();
    let noise = [0.05, -0.08, 0.02, 0.07, -0.04, 0.01, -0.06, 0.03, -0.02, 0.04];
    let y: Vec<f64> = x
        .iter()
        .zip(noise)
        .map(|(xv, n)| 2.0 * xv + 1.0 + n)
        .collect();

    let result = fit(&x, &y).expect("fit");
    assert_close(result.slope, 2.0, 0.1);
    assert_close(result.intercept, 1.0, 0.2);
    assert!(result.r_squared > 0.99);
    assert!(result.p_value < 1e-4);
    assert!(result.std_error > 0.0);
}

#[test]
fn reciprocal_transform_equals_manual_pretransform() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let ys = ColumnSeries {
        name: "tempo".to_string(),
        values: vec![2.0, 4.0, 5.0, 10.0],
        errors: vec![None, None, None, None],
    };

    let manual: Vec<f64> = ys.values.iter().map(|v| 1.0 / v).collect();
    let transformed = ys.clone().reciprocal();
    assert_eq!(transformed.name, "1/tempo");

    let direct = fit(&x, &transformed.values).expect("fit transformed");
    let expected = fit(&x, &manual).expect("fit manual");

    assert_close(direct.slope, expected.slope, 1e-12);
    assert_close(direct.intercept, expected.intercept, 1e-12);
    assert_close(direct.r_squared, expected.r_squared, 1e-12);
    assert_close(direct.p_value, expected.p_value, 1e-12);
    assert_close(direct.std_error, expected.std_error, 1e-12);
}

#[test]
fn two_points_have_no_residual_information() {
    let result = fit(&[0.0, 1.0], &[1.0, 3.0]).expect("fit");
    assert_close(result.slope, 2.0, 1e-12);
    assert_close(result.intercept, 1.0, 1e-12);
    assert_eq!(result.p_value, 1.0);
    assert_eq!(result.std_error, 0.0);
}

#[test]
fn fewer_than_two_points_is_an_error() {
    let err = fit(&[1.0], &[2.0]).unwrap_err();
    assert_eq!(err, RegressionError::TooFewPoints(1));
    assert!(err.to_string().contains("at least 2"));
}

#[test]
fn mismatched_lengths_are_an_error() {
    let err = fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, RegressionError::LengthMismatch { x: 3, y: 2 });
}

#[test]
fn constant_x_is_an_error() {
    let err = fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, RegressionError::ConstantX);
    assert!(err.to_string().contains("identical"));
}

#[test]
fn non_finite_values_are_an_error() {
    let err = fit(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, RegressionError::NonFinite { index: 1 });
}

#[test]
fn fitted_line_spans_the_requested_interval() {
    let result = fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).expect("fit");
    let line = result.line_points(1.0, 4.0);
    assert_eq!(line.len(), 100);
    assert_close(line[0].0, 1.0, 1e-12);
    assert_close(line[0].1, 2.0, 1e-12);
    assert_close(line[99].0, 4.0, 1e-12);
    assert_close(line[99].1, 8.0, 1e-12);
}

#[test]
fn summary_uses_display_precision() {
    let result = fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).expect("fit");
    let summary = result.summary();
    assert!(summary.contains("Y = 2.00 * X + 0.00"));
    assert!(summary.contains("R²: 1.00"));
    assert!(summary.contains("p-value: 0.000"));
}
