//! The append-only transcript shown in the chat panel.
//!
//! Every rendered line — user input, selector decisions, target responses,
//! stop commands, and errors — goes through [`Transcript::append`]. Entries
//! are never edited or removed, and nothing reads the transcript back to
//! build requests.

/// Who (or what) a transcript line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptRole {
    User,
    Selector,
    Response,
    Command,
    Error,
}

impl TranscriptRole {
    /// Display prefix for lines of this role.
    pub fn prefix(self) -> &'static str {
        match self {
            TranscriptRole::User => "User",
            TranscriptRole::Selector => "Selector",
            TranscriptRole::Response => "Response",
            TranscriptRole::Command => "Command",
            TranscriptRole::Error => "Error",
        }
    }

    pub fn is_error(self) -> bool {
        self == TranscriptRole::Error
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub text: String,
}

impl TranscriptEntry {
    /// The line as it appears on screen and in the session log.
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.role.prefix(), self.text)
    }
}

/// Append-only log of everything shown in the chat panel.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only mutator. Returns the appended entry so callers can mirror
    /// its display line elsewhere (e.g. the session log).
    pub fn append(&mut self, role: TranscriptRole, text: impl Into<String>) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            role,
            text: text.into(),
        });
        self.entries.last().unwrap()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptRole::User, "hello");
        transcript.append(TranscriptRole::Selector, r#"{"Target":"t"}"#);
        transcript.append(TranscriptRole::Response, r#"{"ok":true}"#);

        let lines: Vec<String> = transcript
            .entries()
            .iter()
            .map(TranscriptEntry::display_line)
            .collect();
        assert_eq!(
            lines,
            vec![
                "User: hello",
                r#"Selector: {"Target":"t"}"#,
                r#"Response: {"ok":true}"#,
            ]
        );
    }

    #[test]
    fn display_line_uses_role_prefix() {
        let mut transcript = Transcript::new();
        let entry = transcript.append(TranscriptRole::Command, "Stop");
        assert_eq!(entry.display_line(), "Command: Stop");

        let entry = transcript.append(TranscriptRole::Error, "connection refused");
        assert_eq!(entry.display_line(), "Error: connection refused");
        assert!(entry.role.is_error());
    }

    #[test]
    fn empty_text_is_a_valid_entry() {
        let mut transcript = Transcript::new();
        let entry = transcript.append(TranscriptRole::User, "");
        assert_eq!(entry.display_line(), "User: ");
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn repeated_identical_appends_are_not_deduplicated() {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptRole::Command, "Stop");
        transcript.append(TranscriptRole::Command, "Stop");
        assert_eq!(transcript.len(), 2);
    }
}
