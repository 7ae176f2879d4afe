use crate::audio::duration::estimate_duration_secs;
use crate::audio::segment::AudioSegment;

/// Silence inserted when the speaker changes between consecutive segments.
pub const SPEAKER_GAP_SECS: f64 = 1.0;

/// One segment's position on the gap-corrected output time axis.
///
/// A pure derivation of the audio segment list: indices match 1:1 and entries
/// are only ever rebuilt wholesale, never patched in place.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEntry {
    /// Index of the source segment.
    pub index: usize,
    /// Start time on the output axis, seconds.
    pub start: f64,
    /// End time on the output axis, seconds.
    pub end: f64,
    /// Segment playback duration, seconds.
    pub duration: f64,
    /// Speaker of the source segment.
    pub speaker: String,
}

/// Build the contiguous, gap-corrected timeline over ordered segments.
///
/// Sequential scan with a running clock: a fixed 1 s gap is inserted before
/// an entry iff the speaker changed from the previous segment; the first
/// segment always starts at 0. Segments whose duration was never resolved
/// fall back to the text-length estimate so the axis stays total.
pub fn build_timeline(segments: &[AudioSegment]) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(segments.len());
    let mut clock = 0.0f64;
    let mut previous_speaker: Option<&str> = None;

    for (index, seg) in segments.iter().enumerate() {
        if let Some(prev) = previous_speaker
            && prev != seg.dialogue.speaker
        {
            clock += SPEAKER_GAP_SECS;
        }

        let duration = seg
            .duration_secs
            .unwrap_or_else(|| estimate_duration_secs(&seg.dialogue.text));
        let start = clock;
        let end = start + duration;
        entries.push(TimelineEntry {
            index,
            start,
            end,
            duration,
            speaker: seg.dialogue.speaker.clone(),
        });

        clock = end;
        previous_speaker = Some(&seg.dialogue.speaker);
    }

    entries
}

/// Total output duration required by a timeline: the last entry's end.
pub fn required_duration(entries: &[TimelineEntry]) -> f64 {
    entries.last().map_or(0.0, |e| e.end)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/build.rs"]
mod tests;
