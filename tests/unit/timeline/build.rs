use super::*;
use crate::script::parse::DialogueSegment;

fn segment(index: usize, speaker: &str, duration: f64) -> AudioSegment {
    let mut seg = AudioSegment::new(
        DialogueSegment {
            speaker: speaker.to_string(),
            text: "line".to_string(),
            index,
        },
        None,
    );
    seg.duration_secs = Some(duration);
    seg
}

#[test]
fn first_segment_starts_at_zero_with_no_leading_gap() {
    let entries = build_timeline(&[segment(0, "A", 3.0)]);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].start, 0.0);
    assert_eq!(entries[0].end, 3.0);
}

#[test]
fn gap_inserted_exactly_on_speaker_change() {
    let segs = vec![
        segment(0, "A", 1.5),
        segment(1, "B", 1.0),
        segment(2, "A", 0.8),
    ];
    let entries = build_timeline(&segs);

    assert_eq!(entries[0].start, 0.0);
    assert!((entries[0].end - 1.5).abs() < 1e-9);
    assert!((entries[1].start - 2.5).abs() < 1e-9);
    assert!((entries[1].end - 3.5).abs() < 1e-9);
    assert!((entries[2].start - 4.5).abs() < 1e-9);
    assert!((entries[2].end - 5.3).abs() < 1e-9);
    assert!((required_duration(&entries) - 5.3).abs() < 1e-9);
}

#[test]
fn same_speaker_runs_stay_contiguous() {
    let segs = vec![
        segment(0, "A", 3.0),
        segment(1, "A", 2.0),
        segment(2, "A", 4.0),
    ];
    let entries = build_timeline(&segs);
    for pair in entries.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(entries[2].end, 9.0);
}

#[test]
fn timeline_invariants_hold_for_alternating_speakers() {
    let segs: Vec<_> = (0..6)
        .map(|i| segment(i, if i % 2 == 0 { "A" } else { "B" }, 1.0 + i as f64 * 0.3))
        .collect();
    let entries = build_timeline(&segs);

    assert_eq!(entries[0].start, 0.0);
    for (i, e) in entries.iter().enumerate() {
        assert_eq!(e.index, i);
        assert!((e.end - e.start - e.duration).abs() < 1e-9);
    }
    for pair in entries.windows(2) {
        let gap = pair[1].start - pair[0].end;
        let changed = pair[0].speaker != pair[1].speaker;
        let expected = if changed { SPEAKER_GAP_SECS } else { 0.0 };
        assert!((gap - expected).abs() < 1e-9);
    }
}

#[test]
fn rebuild_is_idempotent() {
    let segs = vec![
        segment(0, "A", 2.2),
        segment(1, "B", 1.7),
        segment(2, "B", 3.1),
    ];
    assert_eq!(build_timeline(&segs), build_timeline(&segs));
}

#[test]
fn unresolved_durations_use_the_text_estimate() {
    let seg = AudioSegment::new(
        DialogueSegment {
            speaker: "A".to_string(),
            text: "x".repeat(45),
            index: 0,
        },
        None,
    );
    let entries = build_timeline(&[seg]);
    assert!((entries[0].duration - 3.0).abs() < 1e-9);
}
