//! Line identity and wholesale replacement semantics.

use ledgerline_shared::types::LineId;

/// A line item carried in a document payload.
///
/// Implemented by the per-module line input types so the shared
/// create/replace protocol can assign identities uniformly.
pub trait DocumentLine {
    /// The caller-supplied line id, if any.
    fn line_id(&self) -> Option<LineId>;
    /// Assigns a generated line id.
    fn set_line_id(&mut self, id: LineId);
}

/// Assigns a generated id to every line lacking one.
///
/// Caller-supplied ids are preserved; only the gaps are filled. This
/// runs at creation and again for every wholesale replacement, so each
/// persisted line always carries a stable identity.
pub fn assign_line_ids<L: DocumentLine>(lines: &mut [L]) {
    for line in lines {
        if line.line_id().is_none() {
            line.set_line_id(LineId::new());
        }
    }
}

/// How an update payload treats a document's lines.
///
/// Omitting the lines field leaves the existing set untouched; an
/// explicit list (including the empty list) replaces the whole set.
/// The two cases are deliberately distinct: `Replace(vec![])` means
/// "delete all lines", not "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinesPatch<L> {
    /// Lines field was omitted; keep the current lines.
    #[default]
    Unchanged,
    /// Delete every existing line and insert this set.
    Replace(Vec<L>),
}

impl<L> LinesPatch<L> {
    /// Returns true if the patch leaves existing lines alone.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<L> From<Option<Vec<L>>> for LinesPatch<L> {
    fn from(lines: Option<Vec<L>>) -> Self {
        match lines {
            None => Self::Unchanged,
            Some(lines) => Self::Replace(lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestLine {
        id: Option<LineId>,
        amount: i64,
    }

    impl DocumentLine for TestLine {
        fn line_id(&self) -> Option<LineId> {
            self.id
        }

        fn set_line_id(&mut self, id: LineId) {
            self.id = Some(id);
        }
    }

    #[test]
    fn test_assign_fills_missing_ids() {
        let mut lines = vec![
            TestLine { id: None, amount: 1 },
            TestLine { id: None, amount: 2 },
        ];
        assign_line_ids(&mut lines);

        assert!(lines.iter().all(|l| l.id.is_some()));
        assert_ne!(lines[0].id, lines[1].id);
    }

    #[test]
    fn test_assign_preserves_supplied_ids() {
        let supplied = LineId::new();
        let mut lines = vec![
            TestLine {
                id: Some(supplied),
                amount: 1,
            },
            TestLine { id: None, amount: 2 },
        ];
        assign_line_ids(&mut lines);

        assert_eq!(lines[0].id, Some(supplied));
        assert!(lines[1].id.is_some());
    }

    #[test]
    fn test_patch_from_none_is_unchanged() {
        let patch: LinesPatch<TestLine> = None.into();
        assert!(patch.is_unchanged());
    }

    #[test]
    fn test_patch_from_empty_vec_replaces() {
        let patch: LinesPatch<TestLine> = Some(vec![]).into();
        assert_eq!(patch, LinesPatch::Replace(vec![]));
        assert!(!patch.is_unchanged());
    }
}
