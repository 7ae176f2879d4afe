use super::*;

fn entry(index: usize, speaker: &str, start: f64, end: f64) -> TimelineEntry {
    TimelineEntry {
        index,
        start,
        end,
        duration: end - start,
        speaker: speaker.to_string(),
    }
}

fn images(pairs: &[(usize, &str)]) -> BTreeMap<usize, PathBuf> {
    pairs
        .iter()
        .map(|(i, p)| (*i, PathBuf::from(p)))
        .collect()
}

#[test]
fn image_windows_bound_by_entry_and_cap() {
    // Durations [3, 2, 4], single speaker: entries [0,3],[3,5],[5,9].
    let timeline = vec![
        entry(0, "A", 0.0, 3.0),
        entry(1, "A", 3.0, 5.0),
        entry(2, "A", 5.0, 9.0),
    ];
    let windows = resolve_image_overlays(&timeline, &images(&[(0, "imgA.png"), (2, "imgB.png")]));

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].range, TimeRange { start: 0.0, end: 3.0 });
    assert_eq!(windows[1].range, TimeRange { start: 5.0, end: 9.0 });
    assert!(windows.iter().all(|w| w.placement == Placement::TopThird));
}

#[test]
fn image_window_truncates_at_next_assigned_image() {
    let timeline = vec![
        entry(0, "A", 0.0, 4.0),
        entry(1, "A", 4.0, 6.0),
        entry(2, "A", 6.0, 8.0),
    ];
    let windows = resolve_image_overlays(&timeline, &images(&[(0, "a.png"), (1, "b.png")]));
    // First window would run to 4.0 on its own; next assignment also starts
    // at 4.0 so the cap and the entry end coincide here. Use a long entry to
    // see the truncation bite.
    assert_eq!(windows[0].range.end, 4.0);

    let long = vec![entry(0, "A", 0.0, 10.0), entry(1, "A", 10.0, 12.0)];
    let w = resolve_image_overlays(&long, &images(&[(0, "a.png")]));
    assert_eq!(w[0].range.end, IMAGE_OVERLAY_CAP_SECS);
}

#[test]
fn out_of_range_image_assignment_is_dropped_not_fatal() {
    let timeline = vec![entry(0, "A", 0.0, 2.0)];
    let windows = resolve_image_overlays(&timeline, &images(&[(0, "a.png"), (7, "b.png")]));
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].media, PathBuf::from("a.png"));
}

#[test]
fn avatar_windows_match_entries_and_never_cross_gaps() {
    // Alternating speakers with 1 s gaps already on the axis.
    let timeline = vec![
        entry(0, "A", 0.0, 1.5),
        entry(1, "B", 2.5, 3.5),
        entry(2, "A", 4.5, 5.3),
    ];
    let avatars: HashMap<String, PathBuf> = [
        ("A".to_string(), PathBuf::from("a.png")),
        ("B".to_string(), PathBuf::from("b.png")),
    ]
    .into_iter()
    .collect();
    let speakers = vec!["A".to_string(), "B".to_string()];

    let windows = resolve_avatar_overlays(&timeline, &avatars, &speakers);
    assert_eq!(windows.len(), 3);
    for (w, e) in windows.iter().zip(&timeline) {
        assert_eq!(w.range.start, e.start);
        assert_eq!(w.range.end, e.end);
    }
    assert_eq!(windows[0].placement, Placement::BottomLeft);
    assert_eq!(windows[1].placement, Placement::BottomRight);
    assert_eq!(windows[2].placement, Placement::BottomLeft);
}

#[test]
fn single_speaker_avatar_sits_bottom_center() {
    let timeline = vec![entry(0, "A", 0.0, 2.0)];
    let avatars: HashMap<String, PathBuf> =
        [("A".to_string(), PathBuf::from("a.png"))].into_iter().collect();
    let windows = resolve_avatar_overlays(&timeline, &avatars, &["A".to_string()]);
    assert_eq!(windows[0].placement, Placement::BottomCenter);
}

#[test]
fn unknown_speaker_avatar_is_dropped_with_warning() {
    let timeline = vec![entry(0, "Ghost", 0.0, 2.0)];
    let avatars: HashMap<String, PathBuf> =
        [("Ghost".to_string(), PathBuf::from("g.png"))].into_iter().collect();
    let windows = resolve_avatar_overlays(&timeline, &avatars, &["A".to_string()]);
    assert!(windows.is_empty());
}

#[test]
fn combined_resolution_orders_images_below_avatars() {
    let timeline = vec![entry(0, "A", 0.0, 2.0), entry(1, "A", 2.0, 4.0)];
    let avatars: HashMap<String, PathBuf> =
        [("A".to_string(), PathBuf::from("a.png"))].into_iter().collect();
    let windows = resolve_overlays(
        &timeline,
        &images(&[(1, "img.png")]),
        &avatars,
        &["A".to_string()],
    );
    assert_eq!(windows[0].kind, OverlayKind::DialogueImage);
    assert!(windows[1..].iter().all(|w| w.kind == OverlayKind::Avatar));
}
