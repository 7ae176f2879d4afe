use super::*;

#[test]
fn parses_two_speaker_dialogue_in_order() {
    let parsed = parse_dialogue_script("A: hello there\nB: hi\nA: bye").unwrap();
    assert_eq!(parsed.segments.len(), 3);
    assert_eq!(parsed.speakers, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(parsed.segments[0].speaker, "A");
    assert_eq!(parsed.segments[0].text, "hello there");
    assert_eq!(parsed.segments[1].index, 1);
    assert_eq!(parsed.segments[2].speaker, "A");
}

#[test]
fn skips_blank_and_non_dialogue_lines() {
    let parsed =
        parse_dialogue_script("\n# a comment\nA: first\n\nnot dialogue\nA: second\n").unwrap();
    assert_eq!(parsed.segments.len(), 2);
    assert_eq!(parsed.segments[0].text, "first");
    assert_eq!(parsed.segments[1].text, "second");
}

#[test]
fn single_speaker_scripts_are_valid() {
    let parsed = parse_dialogue_script("Narrator: once upon a time").unwrap();
    assert_eq!(parsed.speakers.len(), 1);
}

#[test]
fn rejects_empty_and_over_populated_scripts() {
    assert!(matches!(
        parse_dialogue_script("no dialogue here"),
        Err(StoryreelError::Input(_))
    ));
    assert!(matches!(
        parse_dialogue_script("A: x\nB: y\nC: z"),
        Err(StoryreelError::Input(_))
    ));
}

#[test]
fn speakers_are_deduplicated_and_sorted() {
    let parsed = parse_dialogue_script("Zed: one\nAmy: two\nZed: three").unwrap();
    assert_eq!(parsed.speakers, vec!["Amy".to_string(), "Zed".to_string()]);
}
