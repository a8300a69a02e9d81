//! diff::types
//!
//! Comparison results: the change summary ([`TreeChanges`]) and the full
//! line-level patch ([`Patch`]).
//!
//! A patch always carries enough to rebuild the summary, so
//! `patch.changes()` equals the summary of the same comparison.

use serde::{Deserialize, Serialize};

use crate::core::types::Oid;

/// How an entry changed between the two sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChanged,
    Untracked,
    Unmodified,
    Conflicted,
}

impl ChangeKind {
    /// Single-letter status code, as printed by `git diff --name-status`.
    pub fn code(&self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
            ChangeKind::Renamed => 'R',
            ChangeKind::Copied => 'C',
            ChangeKind::TypeChanged => 'T',
            ChangeKind::Untracked => '?',
            ChangeKind::Unmodified => ' ',
            ChangeKind::Conflicted => 'U',
        }
    }
}

/// One changed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntryChange {
    /// Path on the new side
    pub path: String,
    /// Path on the old side; differs from `path` for renames and copies
    pub old_path: String,
    /// Kind of change
    pub kind: ChangeKind,
    /// Blob on the old side, if any
    pub old_oid: Option<Oid>,
    /// Blob on the new side, if any
    pub new_oid: Option<Oid>,
}

impl TreeEntryChange {
    /// A change where old and new path coincide.
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        let path = path.into();
        Self {
            old_path: path.clone(),
            path,
            kind,
            old_oid: None,
            new_oid: None,
        }
    }

    /// Whether `path` names this entry, or a directory containing it, on
    /// either side.
    pub fn touches(&self, path: &str) -> bool {
        path_matches(&self.path, path) || path_matches(&self.old_path, path)
    }
}

fn path_matches(entry: &str, filter: &str) -> bool {
    let filter = filter.trim_end_matches('/');
    entry == filter
        || entry
            .strip_prefix(filter)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Change summary: which paths changed and how, without content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeChanges {
    entries: Vec<TreeEntryChange>,
}

impl TreeChanges {
    /// Wrap a list of changes, keeping their order.
    pub fn new(entries: Vec<TreeEntryChange>) -> Self {
        Self { entries }
    }

    /// All entries in collaborator order.
    pub fn entries(&self) -> &[TreeEntryChange] {
        &self.entries
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, TreeEntryChange> {
        self.entries.iter()
    }

    /// Number of changed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind.
    pub fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &TreeEntryChange> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Whether any entry touches `path`.
    pub fn touches(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.touches(path))
    }
}

impl<'a> IntoIterator for &'a TreeChanges {
    type Item = &'a TreeEntryChange;
    type IntoIter = std::slice::Iter<'a, TreeEntryChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Role of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOrigin {
    Context,
    Addition,
    Deletion,
}

impl LineOrigin {
    fn prefix(&self) -> char {
        match self {
            LineOrigin::Context => ' ',
            LineOrigin::Addition => '+',
            LineOrigin::Deletion => '-',
        }
    }
}

/// One line of a hunk. `content` keeps its trailing newline, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub origin: LineOrigin,
    pub old_lineno: Option<u32>,
    pub new_lineno: Option<u32>,
    pub content: String,
}

/// A contiguous block of changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// The `@@ -a,b +c,d @@` header, without trailing newline
    pub header: String,
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub lines: Vec<DiffLine>,
}

/// Line-level changes for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePatch {
    /// Summary entry for this file
    pub change: TreeEntryChange,
    /// Hunks in file order; empty for binary or content-less changes
    pub hunks: Vec<Hunk>,
    /// Whether either side is binary
    pub is_binary: bool,
    pub lines_added: usize,
    pub lines_deleted: usize,
}

impl FilePatch {
    /// Build a file patch, deriving the line counts from the hunks.
    pub fn new(change: TreeEntryChange, hunks: Vec<Hunk>, is_binary: bool) -> Self {
        let count = |origin| {
            hunks
                .iter()
                .flat_map(|h| &h.lines)
                .filter(|l| l.origin == origin)
                .count()
        };
        let lines_added = count(LineOrigin::Addition);
        let lines_deleted = count(LineOrigin::Deletion);
        Self {
            change,
            hunks,
            is_binary,
            lines_added,
            lines_deleted,
        }
    }

    fn render(&self, out: &mut String) {
        let change = &self.change;
        out.push_str(&format!(
            "diff --git a/{} b/{}\n",
            change.old_path, change.path
        ));
        match change.kind {
            ChangeKind::Added | ChangeKind::Untracked => out.push_str("new file\n"),
            ChangeKind::Deleted => out.push_str("deleted file\n"),
            ChangeKind::Renamed => out.push_str(&format!(
                "rename from {}\nrename to {}\n",
                change.old_path, change.path
            )),
            _ => {}
        }

        if self.is_binary {
            out.push_str(&format!(
                "Binary files a/{} and b/{} differ\n",
                change.old_path, change.path
            ));
            return;
        }
        if self.hunks.is_empty() {
            return;
        }

        let old = match change.kind {
            ChangeKind::Added | ChangeKind::Untracked => "/dev/null".to_string(),
            _ => format!("a/{}", change.old_path),
        };
        let new = match change.kind {
            ChangeKind::Deleted => "/dev/null".to_string(),
            _ => format!("b/{}", change.path),
        };
        out.push_str(&format!("--- {}\n+++ {}\n", old, new));

        for hunk in &self.hunks {
            out.push_str(&hunk.header);
            out.push('\n');
            for line in &hunk.lines {
                out.push(line.origin.prefix());
                out.push_str(&line.content);
                if !line.content.ends_with('\n') {
                    out.push_str("\n\\ No newline at end of file\n");
                }
            }
        }
    }
}

/// Full patch: every changed file with its hunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    files: Vec<FilePatch>,
}

impl Patch {
    /// Wrap a list of file patches, keeping their order.
    pub fn new(files: Vec<FilePatch>) -> Self {
        Self { files }
    }

    /// Per-file patches in collaborator order.
    pub fn files(&self) -> &[FilePatch] {
        &self.files
    }

    /// Whether the patch is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Project the patch down to its change summary.
    pub fn changes(&self) -> TreeChanges {
        TreeChanges::new(self.files.iter().map(|f| f.change.clone()).collect())
    }

    /// Total added lines.
    pub fn lines_added(&self) -> usize {
        self.files.iter().map(|f| f.lines_added).sum()
    }

    /// Total deleted lines.
    pub fn lines_deleted(&self) -> usize {
        self.files.iter().map(|f| f.lines_deleted).sum()
    }

    /// Whether any file touches `path`.
    pub fn touches(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.change.touches(path))
    }

    /// Render as unified diff text.
    pub fn content(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            file.render(&mut out);
        }
        out
    }
}

impl From<Patch> for TreeChanges {
    fn from(patch: Patch) -> Self {
        TreeChanges::new(patch.files.into_iter().map(|f| f.change).collect())
    }
}
