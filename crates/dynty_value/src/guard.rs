//! Recursion guard for structural comparisons over cyclic type graphs.
//!
//! Types can refer to themselves through aliases (`x = {next: x|nil}`), so
//! equality and assignability between two such types would descend forever.
//! Every deep step pushes a frame holding the identities of both operands.
//! A frame is a hit once both identities reappear together, as the pair of an
//! enclosing frame, and callers then answer with the co-inductive default
//! (equal, assignable, instance). Matching each side against a different
//! frame is not enough: `x = {next: x|nil}` checked against `{next: string}`
//! would see `x` and the union on the right in unrelated frames and accept.
//!
//! Frames live on the call stack and borrow their parent, so the guard is
//! immutable, append-only and allocation free.

/// One frame of the guard: the pair currently being compared.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RecursionGuard<'a> {
    this: usize,
    that: usize,
    parent: Option<&'a RecursionGuard<'a>>,
}

/// The guard threaded through the deep comparison functions.
pub(crate) type Guard<'a> = Option<&'a RecursionGuard<'a>>;

impl<'a> RecursionGuard<'a> {
    /// Push a frame for `(this, that)` on top of `parent`.
    #[inline]
    pub(crate) fn push(parent: Guard<'a>, this: usize, that: usize) -> Self {
        RecursionGuard { this, that, parent }
    }

    /// Whether this pair of operands is already being compared further up.
    pub(crate) fn hit(&self) -> bool {
        let hit = self.seen(|g| g.this == self.this && g.that == self.that);
        if hit {
            tracing::trace!(this = self.this, that = self.that, "recursion guard hit");
        }
        hit
    }

    fn seen(&self, mut matches: impl FnMut(&RecursionGuard<'_>) -> bool) -> bool {
        let mut cur = self.parent;
        while let Some(frame) = cur {
            if matches(frame) {
                return true;
            }
            cur = frame.parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::RecursionGuard;

    #[test]
    fn fresh_frame_is_not_a_hit() {
        let root = RecursionGuard::push(None, 1, 2);
        assert!(!root.hit());
    }

    #[test]
    fn one_sided_repeat_is_not_a_hit() {
        let root = RecursionGuard::push(None, 1, 2);
        let child = RecursionGuard::push(Some(&root), 1, 3);
        assert!(!child.hit());
    }

    #[test]
    fn sides_seen_in_different_frames_are_not_a_hit() {
        let a = RecursionGuard::push(None, 1, 2);
        let b = RecursionGuard::push(Some(&a), 3, 4);
        let c = RecursionGuard::push(Some(&b), 1, 4);
        assert!(!c.hit());
    }

    #[test]
    fn repeated_pair_is_a_hit() {
        let a = RecursionGuard::push(None, 1, 2);
        let b = RecursionGuard::push(Some(&a), 3, 4);
        let c = RecursionGuard::push(Some(&b), 1, 2);
        assert!(c.hit());
    }
}
