use crate::foundation::error::{StoryreelError, StoryreelResult};

/// One speaker's contiguous dialogue line, in script order.
///
/// Immutable once parsed; `index` is the 0-based position in the script and
/// stays aligned with the audio segment and timeline entry built from it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DialogueSegment {
    /// Speaker name exactly as written before the `:`.
    pub speaker: String,
    /// Spoken text after the `:`.
    pub text: String,
    /// 0-based ordinal position in the script.
    pub index: usize,
}

/// Parsed script: ordered segments plus the deduplicated speaker list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedScript {
    /// Dialogue segments in script order.
    pub segments: Vec<DialogueSegment>,
    /// Unique speaker names, sorted.
    pub speakers: Vec<String>,
}

/// Maximum number of distinct speakers a script may use.
pub const MAX_SPEAKERS: usize = 2;

/// Parse a `Speaker: Text` dialogue script.
///
/// Blank lines and lines without a `Speaker:` prefix are skipped. Fails with
/// an input error when no dialogue lines are found or when the speaker count
/// is outside `1..=MAX_SPEAKERS`; nothing downstream special-cases the
/// speaker count beyond that bound.
pub fn parse_dialogue_script(script: &str) -> StoryreelResult<ParsedScript> {
    let mut segments = Vec::new();
    let mut speakers = Vec::<String>::new();

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((speaker, text)) = line.split_once(':') else {
            continue;
        };
        let speaker = speaker.trim();
        let text = text.trim();
        if speaker.is_empty() || text.is_empty() {
            continue;
        }

        if !speakers.iter().any(|s| s == speaker) {
            speakers.push(speaker.to_string());
        }
        segments.push(DialogueSegment {
            speaker: speaker.to_string(),
            text: text.to_string(),
            index: segments.len(),
        });
    }

    if segments.is_empty() {
        return Err(StoryreelError::input(
            "script contains no dialogue lines (expected 'Speaker: Text')",
        ));
    }
    if speakers.len() > MAX_SPEAKERS {
        return Err(StoryreelError::input(format!(
            "script must have at most {MAX_SPEAKERS} speakers, found {}",
            speakers.len()
        )));
    }

    speakers.sort();
    Ok(ParsedScript { segments, speakers })
}

#[cfg(test)]
#[path = "../../tests/unit/script/parse.rs"]
mod tests;
