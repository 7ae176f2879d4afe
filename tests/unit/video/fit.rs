use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn trim_offset_stays_within_slack_and_is_seed_reproducible() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let decision = resolve_video_fit(30.0, 12.0, false, &mut rng).unwrap();
        let FitDecision::Trim { start, end } = decision else {
            panic!("expected trim");
        };
        assert!(start >= 0.0);
        assert!(start <= 18.0 + 1e-9);
        assert!((end - start - 12.0).abs() < 1e-9);
    }

    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    assert_eq!(
        resolve_video_fit(30.0, 12.0, false, &mut a).unwrap(),
        resolve_video_fit(30.0, 12.0, false, &mut b).unwrap()
    );
}

#[test]
fn exact_cover_trims_from_zero() {
    let mut rng = StdRng::seed_from_u64(1);
    let decision = resolve_video_fit(12.0, 12.0, false, &mut rng).unwrap();
    assert_eq!(decision, FitDecision::Trim { start: 0.0, end: 12.0 });
}

#[test]
fn short_background_with_loop_requests_margin() {
    let mut rng = StdRng::seed_from_u64(1);
    let decision = resolve_video_fit(10.0, 15.0, true, &mut rng).unwrap();
    let FitDecision::Loop { target_duration } = decision else {
        panic!("expected loop request");
    };
    assert!(target_duration >= 20.0);
}

#[test]
fn short_background_without_loop_is_a_distinct_error() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = resolve_video_fit(10.0, 15.0, false, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        StoryreelError::DurationMismatch {
            available,
            required,
        } if available == 10.0 && required == 15.0
    ));
}

#[test]
fn rejects_degenerate_durations() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(resolve_video_fit(f64::NAN, 5.0, true, &mut rng).is_err());
    assert!(resolve_video_fit(10.0, 0.0, true, &mut rng).is_err());
}

#[test]
fn portrait_crop_centers_on_both_axes() {
    // Landscape 1920x1080 → crop width to 607 (1080*9/16), centered.
    let rect = portrait_crop(1920, 1080).unwrap();
    assert_eq!(rect.height, 1080);
    assert_eq!(rect.width, 607);
    assert_eq!(rect.x, (1920 - 607) as i32 / 2);
    assert_eq!(rect.y, 0);

    // Already-portrait 540x960 is untouched.
    let exact = portrait_crop(540, 960).unwrap();
    assert_eq!((exact.width, exact.height), (540, 960));
    assert_eq!((exact.x, exact.y), (0, 0));

    // Too-tall 540x1200 loses height.
    let tall = portrait_crop(540, 1200).unwrap();
    assert_eq!(tall.width, 540);
    assert_eq!(tall.height, 960);
    assert_eq!(tall.y, 120);
}
