use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::*;
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::script::parse::DialogueSegment;

/// Codec fake keyed by file name: returns canned peaks and records re-encodes.
struct FakeCodec {
    peaks: HashMap<String, f32>,
    encoded: Mutex<Vec<(PathBuf, f64)>>,
}

impl FakeCodec {
    fn new(peaks: &[(&str, f32)]) -> Self {
        Self {
            peaks: peaks
                .iter()
                .map(|(name, p)| (name.to_string(), *p))
                .collect(),
            encoded: Mutex::new(Vec::new()),
        }
    }
}

impl AudioCodec for FakeCodec {
    fn peak_amplitude(&self, path: &Path) -> StoryreelResult<f32> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        self.peaks
            .get(&name)
            .copied()
            .ok_or_else(|| StoryreelError::collaborator(format!("no peak for {name}")))
    }

    fn write_gain_adjusted(&self, path: &Path, gain: f64, _out: &Path) -> StoryreelResult<()> {
        self.encoded.lock().unwrap().push((path.to_path_buf(), gain));
        Ok(())
    }
}

fn segment(index: usize, audio: Option<&str>) -> AudioSegment {
    AudioSegment::new(
        DialogueSegment {
            speaker: "A".to_string(),
            text: "line".to_string(),
            index,
        },
        audio.map(PathBuf::from),
    )
}

#[test]
fn boosts_quiet_segments_to_batch_peak() {
    let codec = FakeCodec::new(&[("a.mp3", 0.8), ("b.mp3", 0.4), ("c.mp3", 0.2)]);
    let mut segs = vec![
        segment(0, Some("a.mp3")),
        segment(1, Some("b.mp3")),
        segment(2, Some("c.mp3")),
    ];
    normalize_volumes(&mut segs, &codec, Path::new("/tmp/work"));

    assert_eq!(segs[0].gain, 1.0);
    assert!(segs[0].normalized_path.is_none());
    assert!((segs[1].gain - 2.0).abs() < 1e-6);
    assert!((segs[2].gain - 4.0).abs() < 1e-6);
    assert!(segs[1].normalized_path.is_some());
    // Original retained for traceability.
    assert!(segs[1].audio_path.is_some());

    for seg in &segs {
        let peak = f64::from(seg.peak_amplitude.unwrap());
        assert!(peak * seg.gain <= f64::from(0.8f32) + 1e-6);
    }
    let restored: f64 = segs
        .iter()
        .map(|s| f64::from(s.peak_amplitude.unwrap()) * s.gain)
        .fold(0.0, f64::max);
    assert!((restored - f64::from(0.8f32)).abs() < 1e-6);
}

#[test]
fn all_silent_batch_passes_through_without_division() {
    let codec = FakeCodec::new(&[("a.mp3", 0.0), ("b.mp3", 0.0)]);
    let mut segs = vec![segment(0, Some("a.mp3")), segment(1, Some("b.mp3"))];
    normalize_volumes(&mut segs, &codec, Path::new("/tmp/work"));

    assert!(segs.iter().all(|s| s.gain == 1.0));
    assert!(codec.encoded.lock().unwrap().is_empty());
}

#[test]
fn decode_failure_does_not_abort_the_batch() {
    let codec = FakeCodec::new(&[("a.mp3", 0.6), ("b.mp3", 0.3)]);
    let mut segs = vec![
        segment(0, Some("a.mp3")),
        segment(1, Some("broken.mp3")),
        segment(2, Some("b.mp3")),
    ];
    normalize_volumes(&mut segs, &codec, Path::new("/tmp/work"));

    // Broken segment passes through unmodified.
    assert_eq!(segs[1].gain, 1.0);
    assert!(segs[1].peak_amplitude.is_none());
    assert!(segs[1].normalized_path.is_none());
    // The rest still normalize.
    assert!((segs[2].gain - 2.0).abs() < 1e-6);
}

#[test]
fn silent_segment_in_loud_batch_is_skipped() {
    let codec = FakeCodec::new(&[("a.mp3", 0.9), ("b.mp3", 0.0)]);
    let mut segs = vec![segment(0, Some("a.mp3")), segment(1, Some("b.mp3"))];
    normalize_volumes(&mut segs, &codec, Path::new("/tmp/work"));

    assert_eq!(segs[1].gain, 1.0);
    assert!(segs[1].normalized_path.is_none());
}
