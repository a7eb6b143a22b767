use super::*;

#[test]
fn extent_is_half_open_with_uniform_spacing() {
    let pts = PointSet::new([0.0, 10.0], [0.0, 10.0]).unwrap();
    let grid = build_grid(&pts, 5.0, 0.0).unwrap();

    assert_eq!(grid.x_axis, vec![0.0, 5.0]);
    let (lo, hi) = grid.origins_x.min_max().unwrap();
    assert!(lo <= 0.0);
    assert!(hi < 10.0);
    for w in grid.x_axis.windows(2) {
        assert_eq!(w[1] - w[0], 5.0);
    }
}

#[test]
fn centers_are_offset_by_half_a_cell() {
    let pts = PointSet::new([2.0, 6.0, 9.0], [1.0, 1.5, 4.0]).unwrap();
    let grid = build_grid(&pts, 2.0, 3.0).unwrap();

    assert_eq!(grid.shape(), (grid.y_axis.len(), grid.x_axis.len()));
    assert_eq!(grid.x_axis[0], -1.0);
    assert_eq!(grid.y_axis[0], -2.0);
    for (c, o) in grid
        .centers_x
        .as_slice()
        .iter()
        .zip(grid.origins_x.as_slice())
    {
        assert_eq!(*c, o + 1.0);
    }
    for (c, o) in grid
        .centers_y
        .as_slice()
        .iter()
        .zip(grid.origins_y.as_slice())
    {
        assert_eq!(*c, o + 1.0);
    }
}

#[test]
fn rows_follow_y_and_cols_follow_x() {
    let pts = PointSet::new([0.0, 4.0], [0.0, 2.0]).unwrap();
    let grid = build_grid(&pts, 1.0, 0.0).unwrap();

    assert_eq!(grid.shape(), (2, 4));
    assert_eq!(grid.origins_x.row(1), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(grid.origins_y.row(1), &[1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn grid_covers_every_kernel_support() {
    let pts = PointSet::new([12.0, 30.0, 18.5], [40.0, 22.0, 35.0]).unwrap();
    let (size, bw) = (2.5, 7.0);
    let grid = build_grid(&pts, size, bw).unwrap();

    let (x_lo, x_hi) = grid.origins_x.min_max().unwrap();
    let (y_lo, y_hi) = grid.origins_y.min_max().unwrap();
    for (x, y) in pts.iter() {
        assert!(x_lo <= x - bw && x + bw <= x_hi + size);
        assert!(y_lo <= y - bw && y + bw <= y_hi + size);
    }
}

#[test]
fn rejects_bad_parameters() {
    let pts = PointSet::new([1.0], [1.0]).unwrap();
    assert!(matches!(
        build_grid(&pts, 0.0, 1.0),
        Err(HeatError::InvalidInput(_))
    ));
    assert!(matches!(
        build_grid(&pts, -1.0, 1.0),
        Err(HeatError::InvalidInput(_))
    ));
    assert!(matches!(
        build_grid(&pts, 1.0, -0.5),
        Err(HeatError::InvalidInput(_))
    ));
    assert!(matches!(
        build_grid(&PointSet::default(), 1.0, 1.0),
        Err(HeatError::InvalidInput(_))
    ));
}

#[test]
fn tiny_grid_size_is_rejected_instead_of_allocating() {
    let pts = PointSet::new([0.0, 100.0], [0.0, 100.0]).unwrap();
    assert!(matches!(
        build_grid(&pts, 1e-300, 10.0),
        Err(HeatError::InvalidInput(_))
    ));
    // 12_000 x 12_000 cells fits each axis but not the cell limit.
    assert!(matches!(
        build_grid(&pts, 0.01, 10.0),
        Err(HeatError::InvalidInput(_))
    ));
}
