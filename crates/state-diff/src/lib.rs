//! # state-diff
//!
//! A standalone utility for rendering the difference between two state
//! snapshots as a line-level textual diff.
//!
//! ## Design Principles
//!
//! This crate is presentation-only: it receives two values, serializes
//! them to pretty JSON and diffs the lines. It never mutates its inputs;
//! an optional *excluder* transform (e.g. blanking out a large field
//! before comparison) runs against private clones.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use state_diff::diff_state;
//!
//! let diff = diff_state(&old_state, &new_state, None)?;
//! if diff.has_changes() {
//!     log::debug!("state changed:\n{diff}");
//! }
//! ```

use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::fmt;
use thiserror::Error;

/// Redaction transform applied to clones of both states before
/// serialization, e.g. to blank out a large field.
pub type Excluder<S> = dyn Fn(&mut S);

/// Errors that can occur while diffing states
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Classification of one diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Added,
    Removed,
    Unchanged,
}

/// One line of the rendered diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub text: String,
}

/// A computed line diff between two state snapshots.
///
/// `Display` renders one line per entry with a `+`/`-`/space prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDiff {
    lines: Vec<DiffLine>,
}

impl StateDiff {
    /// All diff lines, in order.
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Whether any line was added or removed.
    pub fn has_changes(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.tag != DiffTag::Unchanged)
    }
}

impl fmt::Display for StateDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let prefix = match line.tag {
                DiffTag::Added => '+',
                DiffTag::Removed => '-',
                DiffTag::Unchanged => ' ',
            };
            writeln!(f, "{prefix}{}", line.text)?;
        }
        Ok(())
    }
}

/// Compute the line diff between two states.
///
/// Both states are serialized to pretty JSON, optionally after passing a
/// clone of each through `excluder`. Neither input is mutated.
pub fn diff_state<S>(
    old_state: &S,
    new_state: &S,
    excluder: Option<&Excluder<S>>,
) -> Result<StateDiff, DiffError>
where
    S: Serialize + Clone,
{
    let old_text = render(old_state, excluder)?;
    let new_text = render(new_state, excluder)?;

    let diff = TextDiff::from_lines(&old_text, &new_text);
    let lines = diff
        .iter_all_changes()
        .map(|change| DiffLine {
            tag: match change.tag() {
                ChangeTag::Insert => DiffTag::Added,
                ChangeTag::Delete => DiffTag::Removed,
                ChangeTag::Equal => DiffTag::Unchanged,
            },
            text: change.value().trim_end_matches('\n').to_string(),
        })
        .collect();

    Ok(StateDiff { lines })
}

fn render<S>(state: &S, excluder: Option<&Excluder<S>>) -> Result<String, DiffError>
where
    S: Serialize + Clone,
{
    let text = match excluder {
        Some(exclude) => {
            let mut redacted = state.clone();
            exclude(&mut redacted);
            serde_json::to_string_pretty(&redacted)?
        }
        None => serde_json::to_string_pretty(state)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct TestState {
        counter: i64,
        is_loading: bool,
        history: Vec<i64>,
    }

    fn state(counter: i64) -> TestState {
        TestState {
            counter,
            is_loading: false,
            history: vec![1, 2, 3],
        }
    }

    #[test]
    fn identical_states_have_no_changes() {
        let diff = diff_state(&state(1), &state(1), None).unwrap();
        assert!(!diff.has_changes());
        assert!(diff.lines().iter().all(|l| l.tag == DiffTag::Unchanged));
    }

    #[test]
    fn changed_field_shows_up_as_removed_plus_added() {
        let diff = diff_state(&state(1), &state(2), None).unwrap();

        assert!(diff.has_changes());
        assert!(diff
            .lines()
            .iter()
            .any(|l| l.tag == DiffTag::Removed && l.text.contains("\"counter\": 1")));
        assert!(diff
            .lines()
            .iter()
            .any(|l| l.tag == DiffTag::Added && l.text.contains("\"counter\": 2")));
    }

    #[test]
    fn display_renders_prefixed_lines() {
        let diff = diff_state(&state(1), &state(2), None).unwrap();
        let rendered = diff.to_string();

        assert!(rendered.contains("-  \"counter\": 1"));
        assert!(rendered.contains("+  \"counter\": 2"));
    }

    #[test]
    fn excluder_hides_redacted_fields_from_the_diff() {
        let mut old = state(1);
        old.history = vec![1, 2, 3];
        let mut new = state(1);
        new.history = vec![4, 5, 6, 7, 8];

        // Without the excluder the history change is visible.
        let diff = diff_state(&old, &new, None).unwrap();
        assert!(diff.has_changes());

        // With it, both sides collapse to the same redacted rendering.
        let excluder = |s: &mut TestState| s.history.clear();
        let diff = diff_state(&old, &new, Some(&excluder)).unwrap();
        assert!(!diff.has_changes());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let old = state(1);
        let new = state(2);
        let old_before = old.clone();
        let new_before = new.clone();

        let excluder = |s: &mut TestState| s.history.clear();
        diff_state(&old, &new, Some(&excluder)).unwrap();

        assert_eq!(old, old_before);
        assert_eq!(new, new_before);
    }
}
