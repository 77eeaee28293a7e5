//! Applying changesets to source text.
//!
//! Splices are gathered from every changeset, sorted by start offset, and
//! checked for overlap before a single byte is copied. Zero-width inserts
//! may sit flush against a deletion boundary; any genuine overlap aborts
//! the whole rewrite so a partially-edited file can never escape.

use thiserror::Error;

use crate::base::TextRange;
use crate::plan::{Changeset, Splice};

/// Two planned edits claimed overlapping byte ranges.
///
/// This indicates a planner bug, never bad input; the caller should report
/// diagnostics without a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("overlapping edits at {first:?} and {second:?}")]
pub struct OverlapFault {
    pub first: TextRange,
    pub second: TextRange,
}

/// Apply all changesets to `source`, producing the rewritten text.
pub fn apply(source: &str, changesets: &[Changeset]) -> Result<String, OverlapFault> {
    let mut splices: Vec<&Splice> = changesets
        .iter()
        .flat_map(|c| c.splices.iter())
        .collect();
    // Stable sort: inserts at the same offset keep plan order.
    splices.sort_by_key(|s| (s.range.start(), s.range.end()));

    for pair in splices.windows(2) {
        if pair[1].range.start() < pair[0].range.end() {
            return Err(OverlapFault {
                first: pair[0].range,
                second: pair[1].range,
            });
        }
    }

    let grows: usize = splices.iter().map(|s| s.replacement.len()).sum();
    let mut out = String::with_capacity(source.len() + grows);
    let mut cursor = 0usize;
    for splice in splices {
        let start = usize::from(splice.range.start());
        let end = usize::from(splice.range.end());
        out.push_str(&source[cursor..start]);
        out.push_str(&splice.replacement);
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}
