use super::*;

#[test]
fn new_rejects_inverted_and_non_finite_ranges() {
    assert!(TimeRange::new(2.0, 1.0).is_err());
    assert!(TimeRange::new(f64::NAN, 1.0).is_err());
    assert!(TimeRange::new(0.0, f64::INFINITY).is_err());
    assert!(TimeRange::new(1.0, 1.0).is_ok());
}

#[test]
fn intersect_returns_none_for_disjoint_ranges() {
    let a = TimeRange::new(0.0, 2.0).unwrap();
    let b = TimeRange::new(2.0, 4.0).unwrap();
    assert!(a.intersect(b).is_none());

    let c = TimeRange::new(1.0, 3.0).unwrap();
    let overlap = a.intersect(c).unwrap();
    assert_eq!(overlap.start, 1.0);
    assert_eq!(overlap.end, 2.0);
}

#[test]
fn clip_to_clamps_both_bounds() {
    let r = TimeRange::new(3.0, 9.0).unwrap();
    let clipped = r.clip_to(5.0);
    assert_eq!(clipped.start, 3.0);
    assert_eq!(clipped.end, 5.0);

    let past = TimeRange::new(6.0, 9.0).unwrap().clip_to(5.0);
    assert!(past.is_empty());
}
