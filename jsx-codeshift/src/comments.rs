use swc_core::common::{
    comments::{Comment, Comments, SingleThreadedComments},
    BytePos, Span,
};

/// Where a comment is emitted relative to the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Leading,
    Trailing,
}

/// A comment detached from the position table, travelling with a converted
/// node until it is attached again.
#[derive(Debug, Clone)]
pub struct AttachedComment {
    pub placement: Placement,
    pub comment: Comment,
}

impl AttachedComment {
    pub fn text(&self) -> &str {
        &self.comment.text
    }
}

/// Rewrites the placement of every comment in `comments`.
pub fn force_placement(comments: &mut [AttachedComment], placement: Placement) {
    for c in comments.iter_mut() {
        c.placement = placement;
    }
}

/// Position-keyed comment table produced by the parser and consumed by the
/// printer.
///
/// A node "owns" the leading comments at its `lo` and the trailing comments at
/// its `hi`. Nodes that survive a rewrite with their span intact keep their
/// comments automatically; nodes that are dropped must have their comments
/// taken here and attached to whatever replaces them.
#[derive(Clone, Default)]
pub struct CommentStore {
    inner: SingleThreadedComments,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &SingleThreadedComments {
        &self.inner
    }

    /// Removes and returns the comments owned by `span`, leading first.
    pub fn take_attached(&self, span: Span) -> Vec<AttachedComment> {
        if span.is_dummy() {
            return vec![];
        }
        let mut out = vec![];
        if let Some(leading) = self.inner.take_leading(span.lo) {
            out.extend(leading.into_iter().map(|comment| AttachedComment {
                placement: Placement::Leading,
                comment,
            }));
        }
        if let Some(trailing) = self.inner.take_trailing(span.hi) {
            out.extend(trailing.into_iter().map(|comment| AttachedComment {
                placement: Placement::Trailing,
                comment,
            }));
        }
        out
    }

    /// Takes the comments of several spans in order. Spans that share a
    /// position (a call and its callee start at the same byte) are only
    /// drained once.
    pub fn take_all(&self, spans: impl IntoIterator<Item = Span>) -> Vec<AttachedComment> {
        spans.into_iter().flat_map(|s| self.take_attached(s)).collect()
    }

    /// Takes the comments the parser left in front of the closing token of
    /// `span` (the `)` of a call, the `}` of an object). Nothing else owns
    /// them once the node is dropped.
    pub fn take_closing(&self, span: Span) -> Vec<AttachedComment> {
        if span.is_dummy() || span.hi.0 <= span.lo.0 {
            return vec![];
        }
        self.inner
            .take_leading(BytePos(span.hi.0 - 1))
            .unwrap_or_default()
            .into_iter()
            .map(|comment| AttachedComment {
                placement: Placement::Leading,
                comment,
            })
            .collect()
    }

    pub fn has_attached(&self, span: Span) -> bool {
        !span.is_dummy()
            && (self.inner.has_leading(span.lo) || self.inner.has_trailing(span.hi))
    }

    /// Non-destructive view of the comments owned by `span`.
    #[cfg(test)]
    pub(crate) fn attached(&self, span: Span) -> Vec<AttachedComment> {
        if span.is_dummy() {
            return vec![];
        }
        let leading = self.inner.get_leading(span.lo).unwrap_or_default();
        let trailing = self.inner.get_trailing(span.hi).unwrap_or_default();
        leading
            .into_iter()
            .map(|comment| AttachedComment {
                placement: Placement::Leading,
                comment,
            })
            .chain(trailing.into_iter().map(|comment| AttachedComment {
                placement: Placement::Trailing,
                comment,
            }))
            .collect()
    }

    /// Re-attaches `comments` to the node occupying `span`.
    ///
    /// Returns `false` (and attaches nothing) when `span` is synthetic: a
    /// dummy span has no position the printer could emit them at.
    pub fn attach(&self, span: Span, comments: Vec<AttachedComment>) -> bool {
        if comments.is_empty() {
            return true;
        }
        if span.is_dummy() {
            return false;
        }
        for c in comments {
            match c.placement {
                Placement::Leading => self.inner.add_leading(span.lo, c.comment),
                Placement::Trailing => self.inner.add_trailing(span.hi, c.comment),
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::common::{comments::CommentKind, DUMMY_SP};

    fn block(text: &str) -> Comment {
        Comment {
            kind: CommentKind::Block,
            span: DUMMY_SP,
            text: text.into(),
        }
    }

    fn span(lo: u32, hi: u32) -> Span {
        Span::new(BytePos(lo), BytePos(hi))
    }

    #[test]
    fn take_drains_leading_then_trailing() {
        let store = CommentStore::new();
        store.inner().add_trailing(BytePos(9), block("after"));
        store.inner().add_leading(BytePos(2), block("before"));

        let taken = store.take_attached(span(2, 9));
        let texts: Vec<_> = taken.iter().map(|c| (c.placement, c.text().to_string())).collect();
        assert_eq!(
            texts,
            vec![
                (Placement::Leading, "before".to_string()),
                (Placement::Trailing, "after".to_string()),
            ]
        );
        assert!(!store.has_attached(span(2, 9)));
    }

    #[test]
    fn shared_positions_are_drained_once() {
        let store = CommentStore::new();
        store.inner().add_leading(BytePos(1), block("once"));
        let taken = store.take_all([span(1, 10), span(1, 4)]);
        assert_eq!(taken.len(), 1);
    }

    #[test]
    fn attach_respects_forced_placement() {
        let store = CommentStore::new();
        let mut comments = vec![AttachedComment {
            placement: Placement::Leading,
            comment: block("moved"),
        }];
        force_placement(&mut comments, Placement::Trailing);
        assert!(store.attach(span(3, 7), comments));

        let attached = store.attached(span(3, 7));
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].placement, Placement::Trailing);
        assert!(store.inner().has_trailing(BytePos(7)));
    }

    #[test]
    fn closing_token_comments_are_taken_separately() {
        let store = CommentStore::new();
        store.inner().add_leading(BytePos(11), block("before paren"));
        assert!(store.take_attached(span(4, 12)).is_empty());

        let taken = store.take_closing(span(4, 12));
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].text(), "before paren");
        assert!(!store.inner().has_leading(BytePos(11)));
    }

    #[test]
    fn dummy_spans_neither_own_nor_accept_comments() {
        let store = CommentStore::new();
        assert!(store.take_attached(DUMMY_SP).is_empty());
        assert!(!store.attach(
            DUMMY_SP,
            vec![AttachedComment {
                placement: Placement::Leading,
                comment: block("lost"),
            }]
        ));
    }
}
