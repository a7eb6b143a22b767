use super::*;
use crate::density::grid::build_grid;

fn lcg_points(n: usize, seed: u64) -> PointSet {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64) / ((1u64 << 53) as f64) * 100.0
    };
    let x: Vec<f64> = (0..n).map(|_| next()).collect();
    let y: Vec<f64> = (0..n).map(|_| next()).collect();
    PointSet::new(x, y).unwrap()
}

#[test]
fn single_point_peaks_at_its_location() {
    let pts = PointSet::new([50.0], [50.0]).unwrap();
    let axis = [45.0, 50.0, 55.0];
    let rows: Vec<Vec<f64>> = axis.iter().map(|_| axis.to_vec()).collect();
    let cx = Field2::from_rows(&rows).unwrap();
    let cy = Field2::from_rows(&axis.iter().map(|&v| vec![v; 3]).collect::<Vec<_>>()).unwrap();

    let intensity = estimate_intensity(&pts, &cx, &cy, 10.0).unwrap();
    assert_eq!(intensity.shape(), (3, 3));

    let peak = intensity.get(1, 1);
    assert_eq!(peak, 1.0);
    for j in 0..3 {
        for k in 0..3 {
            if (j, k) != (1, 1) {
                assert!(intensity.get(j, k) < peak);
            }
        }
    }
}

#[test]
fn cells_exactly_one_bandwidth_away_are_zero() {
    let pts = PointSet::new([50.0], [50.0]).unwrap();
    let cx = Field2::from_rows(&[[40.0, 50.0, 60.0, 50.0]]).unwrap();
    let cy = Field2::from_rows(&[[50.0, 40.0, 50.0, 60.0]]).unwrap();
    let intensity = estimate_intensity(&pts, &cx, &cy, 10.0).unwrap();
    assert_eq!(intensity.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn contributions_sum_over_points() {
    let pts = PointSet::new([0.0, 0.0], [0.0, 10.0]).unwrap();
    let cx = Field2::from_rows(&[[0.0]]).unwrap();
    let cy = Field2::from_rows(&[[5.0]]).unwrap();
    let intensity = estimate_intensity(&pts, &cx, &cy, 10.0).unwrap();
    assert_eq!(intensity.get(0, 0), 2.0 * 0.5625);
}

#[test]
fn rejects_non_positive_bandwidth_and_shape_mismatch() {
    let pts = PointSet::new([0.0], [0.0]).unwrap();
    let c = Field2::from_rows(&[[0.0, 1.0]]).unwrap();
    assert!(matches!(
        estimate_intensity(&pts, &c, &c, 0.0),
        Err(HeatError::InvalidInput(_))
    ));
    assert!(matches!(
        estimate_intensity(&pts, &c, &c, -3.0),
        Err(HeatError::InvalidInput(_))
    ));

    let other = Field2::from_rows(&[[0.0], [1.0]]).unwrap();
    assert!(matches!(
        estimate_intensity(&pts, &c, &other, 1.0),
        Err(HeatError::InvalidInput(_))
    ));
}

#[test]
fn bucket_index_matches_brute_force() {
    let pts = lcg_points(200, 7);
    let grid = build_grid(&pts, 2.5, 8.0).unwrap();

    let brute = estimate_intensity(&pts, &grid.centers_x, &grid.centers_y, 8.0).unwrap();
    let bucket = estimate_intensity_with(
        &pts,
        &grid.centers_x,
        &grid.centers_y,
        8.0,
        EstimatorKind::Bucket,
        false,
    )
    .unwrap();

    assert_eq!(brute.shape(), bucket.shape());
    for (a, b) in brute.as_slice().iter().zip(bucket.as_slice()) {
        assert!((a - b).abs() <= 1e-9, "{a} vs {b}");
    }
}

#[test]
fn parallel_rows_match_sequential() {
    let pts = lcg_points(64, 42);
    let grid = build_grid(&pts, 3.0, 6.0).unwrap();
    for kind in [EstimatorKind::BruteForce, EstimatorKind::Bucket] {
        let seq =
            estimate_intensity_with(&pts, &grid.centers_x, &grid.centers_y, 6.0, kind, false)
                .unwrap();
        let par = estimate_intensity_with(&pts, &grid.centers_x, &grid.centers_y, 6.0, kind, true)
            .unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let pts = lcg_points(30, 3);
    let grid = build_grid(&pts, 4.0, 10.0).unwrap();
    let a = estimate_intensity(&pts, &grid.centers_x, &grid.centers_y, 10.0).unwrap();
    let b = estimate_intensity(&pts, &grid.centers_x, &grid.centers_y, 10.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn estimator_kind_parses_names() {
    assert_eq!(
        "brute".parse::<EstimatorKind>().unwrap(),
        EstimatorKind::BruteForce
    );
    assert_eq!(
        "Bucket".parse::<EstimatorKind>().unwrap(),
        EstimatorKind::Bucket
    );
    assert!("kd-tree".parse::<EstimatorKind>().is_err());
}
