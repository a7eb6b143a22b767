use super::*;

#[test]
fn quartic_kernel_fixed_points() {
    assert_eq!(kde_quartic(0.0, 10.0), 1.0);
    assert_eq!(kde_quartic(10.0, 10.0), 0.0);
    assert_eq!(kde_quartic(5.0, 10.0), 0.5625);
    assert_eq!(kde_quartic(10.5, 10.0), 0.0);
}

#[test]
fn quartic_kernel_is_monotone_and_non_negative() {
    let h = 3.0;
    let mut prev = f64::INFINITY;
    for i in 0..=300 {
        let d = (i as f64) / 100.0;
        let k = kde_quartic(d, h);
        assert!(k >= 0.0);
        assert!(k <= prev, "kernel increased at d={d}");
        prev = k;
    }
}

#[test]
fn arange_is_half_open() {
    assert_eq!(arange(0.0, 10.0, 5.0).unwrap(), vec![0.0, 5.0]);
    assert_eq!(arange(0.0, 11.0, 5.0).unwrap(), vec![0.0, 5.0, 10.0]);
    assert_eq!(arange(-2.0, 1.0, 1.0).unwrap(), vec![-2.0, -1.0, 0.0]);
    assert!(arange(4.0, 4.0, 1.0).unwrap().is_empty());
    assert!(arange(4.0, 1.0, 1.0).unwrap().is_empty());
}

#[test]
fn arange_rejects_counts_beyond_u32() {
    assert!(matches!(
        arange(0.0, 120.0, 1e-300),
        Err(HeatError::InvalidInput(_))
    ));
    assert!(matches!(
        arange(0.0, 1e300, 1e-300),
        Err(HeatError::InvalidInput(_))
    ));
}
