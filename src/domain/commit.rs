use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(pub String);

impl CommitMessage {
    /// Cleans a raw completion: trims whitespace, then drops one layer of
    /// wrapping quote characters.
    pub fn from_completion(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix(['"', '\''])
            .unwrap_or(trimmed);
        let unquoted = unquoted
            .strip_suffix(['"', '\''])
            .unwrap_or(unquoted);
        Self(unquoted.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
