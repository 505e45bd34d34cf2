//! Back-stack of visited routes.

use super::route::{ResolvedRoute, Screen};

/// Ordered history of visited routes. The last entry is the current route.
///
/// Never empty: the root entry cannot be popped.
#[derive(Debug, Clone)]
pub struct BackStack {
    entries: Vec<ResolvedRoute>,
}

impl BackStack {
    pub fn new(root: ResolvedRoute) -> Self {
        Self {
            entries: vec![root],
        }
    }

    pub fn current(&self) -> &ResolvedRoute {
        // Non-empty by construction.
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResolvedRoute] {
        &self.entries
    }

    pub fn contains(&self, screen: Screen) -> bool {
        self.entries.iter().any(|e| e.screen == screen)
    }

    pub fn push(&mut self, route: ResolvedRoute) {
        self.entries.push(route);
    }

    /// Pop the current route. `None` when only the root is left.
    pub fn pop(&mut self) -> Option<ResolvedRoute> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop()
    }

    /// Remove every entry above the topmost `screen`, and `screen` itself when
    /// `inclusive`. Nothing is removed if `screen` is not on the stack.
    ///
    /// May leave the stack empty; callers push right after.
    pub(crate) fn truncate_to(&mut self, screen: Screen, inclusive: bool) -> usize {
        let keep = self.kept_len(screen, inclusive);
        let removed = self.entries.len() - keep;
        self.entries.truncate(keep);
        removed
    }

    /// The entry that would be on top after [`truncate_to`](Self::truncate_to).
    pub(crate) fn top_after_truncate(&self, screen: Screen, inclusive: bool) -> Option<&ResolvedRoute> {
        self.entries[..self.kept_len(screen, inclusive)].last()
    }

    fn kept_len(&self, screen: Screen, inclusive: bool) -> usize {
        match self.entries.iter().rposition(|e| e.screen == screen) {
            Some(index) if inclusive => index,
            Some(index) => index + 1,
            None => self.entries.len(),
        }
    }

    /// Push `route` after truncating to `screen`. The stack stays non-empty.
    pub fn pop_up_to_and_push(&mut self, screen: Screen, inclusive: bool, route: ResolvedRoute) -> usize {
        let removed = self.truncate_to(screen, inclusive);
        self.entries.push(route);
        removed
    }

    /// Rendered paths, root first.
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(ResolvedRoute::path).collect()
    }
}
