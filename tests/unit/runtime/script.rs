use super::*;

#[test]
fn blank_and_comment_lines_are_dropped() {
    let script = "A: Hello\n\nB: Hi\n>> GOTO: Next\n   // comment\nC: unreachable";
    assert_eq!(
        beats(script),
        ["A: Hello", "B: Hi", ">> GOTO: Next", "C: unreachable"]
    );
    assert!(beats("").is_empty());
    assert!(beats("  \n// only\n\t\n").is_empty());
}

#[test]
fn beats_keep_original_text() {
    assert_eq!(beats("  Hero:  spaced  \r\nx"), ["  Hero:  spaced  ", "x"]);
}

#[test]
fn speaker_splits_on_first_colon_only() {
    assert_eq!(split_speaker("Hero: Time: 10pm"), ("Hero", "Time: 10pm"));
    assert_eq!(split_speaker("The door creaks."), (NARRATOR, "The door creaks."));
    assert_eq!(split_speaker(" Ana :  hi "), ("Ana", "hi"));
}

#[test]
fn goto_lines_parse_trimmed_target() {
    assert_eq!(parse_line(">> GOTO:   The Pier  "), Line::Goto { target: "The Pier" });
    assert_eq!(goto_target(">>GOTO: x"), None);
    assert_eq!(parse_line(">> WAIT 3"), Line::Directive(">> WAIT 3"));
    assert!(is_control(">> WAIT 3"));
    assert!(!is_control("Hero: >> not control"));
}

#[test]
fn dialogue_is_classified() {
    assert_eq!(
        parse_line("A: Hello"),
        Line::Dialogue {
            speaker: "A",
            text: "Hello"
        }
    );
}

#[test]
fn indented_control_lines_are_still_control() {
    assert!(is_control("  >> GOTO: Pier"));
    assert!(is_control("\t>> WAIT"));
    assert_eq!(parse_line("  >> GOTO: Pier"), Line::Goto { target: "Pier" });
    assert_eq!(parse_line("  >> WAIT"), Line::Directive("  >> WAIT"));
}
