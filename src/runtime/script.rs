//! DramScript tokenizer.
//!
//! A script is plain text. Blank lines and `//` comments are dropped; every remaining line
//! is a beat, kept verbatim (including its leading whitespace) so it can be matched
//! against recorded audio keys.

/// Speaker assigned to lines without a `Speaker:` prefix.
pub const NARRATOR: &str = "Narrator";

/// Prefix shared by every control line.
pub const CONTROL_PREFIX: &str = ">>";

/// Exact prefix of a scene transfer.
pub const GOTO_PREFIX: &str = ">> GOTO:";

/// Split a script into beats in original order.
pub fn beats(script: &str) -> Vec<String> {
    script
        .lines()
        .filter(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with("//")
        })
        .map(str::to_string)
        .collect()
}

/// Whether a beat is a control line. Control lines are never voiced or logged.
///
/// Leading whitespace is ignored, matching [`goto_target`].
pub fn is_control(beat: &str) -> bool {
    beat.trim_start().starts_with(CONTROL_PREFIX)
}

/// Target scene name of a `>> GOTO: <Name>` line, trimmed.
pub fn goto_target(beat: &str) -> Option<&str> {
    beat.trim().strip_prefix(GOTO_PREFIX).map(str::trim)
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Parsed meaning of a beat.
pub enum Line<'a> {
    /// `Speaker: text`, or narration when there is no colon.
    Dialogue {
        /// Text before the first colon, trimmed; [`NARRATOR`] when absent.
        speaker: &'a str,
        /// Text after the first colon, trimmed.
        text: &'a str,
    },
    /// `>> GOTO: <Name>`.
    Goto {
        /// Target scene name.
        target: &'a str,
    },
    /// Any other `>>` line; reserved and ignored.
    Directive(&'a str),
}

/// Classify a beat.
pub fn parse_line(beat: &str) -> Line<'_> {
    if let Some(target) = goto_target(beat) {
        return Line::Goto { target };
    }
    if is_control(beat) {
        return Line::Directive(beat);
    }
    let (speaker, text) = split_speaker(beat);
    Line::Dialogue { speaker, text }
}

/// Split on the first `:`. Without a colon the whole line is narration.
pub fn split_speaker(beat: &str) -> (&str, &str) {
    match beat.split_once(':') {
        Some((speaker, text)) => (speaker.trim(), text.trim()),
        None => (NARRATOR, beat.trim()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/script.rs"]
mod tests;
