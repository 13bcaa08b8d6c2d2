use std::fmt;

pub const UNTRACKED_HEADER: &str = "New untracked files:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Staged,
    Unstaged,
    Untracked,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Staged => "staged",
            ChangeKind::Unstaged => "unstaged",
            ChangeKind::Untracked => "untracked",
        }
    }

    /// Label used in the change analysis section of the prompt.
    pub fn description(&self) -> &'static str {
        match self {
            ChangeKind::Staged => "staged changes (ready to commit)",
            ChangeKind::Unstaged => "unstaged changes (not yet staged)",
            ChangeKind::Untracked => "untracked files (new, not yet added)",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub diff: String,
    pub status: String,
    pub kind: ChangeKind,
}

/// Renders untracked paths as a pseudo-diff, one `+ <path>` line each.
pub fn untracked_listing<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut listing = String::from(UNTRACKED_HEADER);
    listing.push('\n');
    for path in paths.into_iter().filter(|p| !p.is_empty()) {
        listing.push_str("+ ");
        listing.push_str(path);
        listing.push('\n');
    }
    listing
}
