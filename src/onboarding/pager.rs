//! Onboarding pager — the linear first-run flow.
//!
//! Pages advance one at a time. "Next" on the last page completes the flow;
//! "Skip" is offered on every page except the last.

use serde::Serialize;

use super::model::{OnboardingPage, default_pages};

/// Outcome of a pager interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PagerEvent {
    /// Moved to the page at `index`.
    Moved { index: usize },
    /// "Get Started" pressed on the last page.
    Completed,
    /// "Skip" pressed.
    Skipped,
}

impl PagerEvent {
    /// Whether the flow is over and the host should leave onboarding.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Pager state for one visit to an onboarding screen.
#[derive(Debug, Clone)]
pub struct OnboardingPager {
    pages: Vec<OnboardingPage>,
    current: usize,
}

impl Default for OnboardingPager {
    fn default() -> Self {
        Self::new(default_pages())
    }
}

impl OnboardingPager {
    /// Build a pager over `pages`. An empty list gets the default pages.
    pub fn new(pages: Vec<OnboardingPage>) -> Self {
        let pages = if pages.is_empty() { default_pages() } else { pages };
        Self { pages, current: 0 }
    }

    pub fn pages(&self) -> &[OnboardingPage] {
        &self.pages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &OnboardingPage {
        &self.pages[self.current]
    }

    pub fn is_last_page(&self) -> bool {
        self.current + 1 == self.pages.len()
    }

    /// Check if moving from page `from` to page `to` is allowed.
    pub fn can_transition_to(&self, from: usize, to: usize) -> bool {
        let len = self.pages.len();
        from < len && to < len && from.abs_diff(to) == 1
    }

    /// Primary button: advance, or complete on the last page.
    pub fn next(&mut self) -> PagerEvent {
        if self.is_last_page() {
            return PagerEvent::Completed;
        }
        let to = self.current + 1;
        debug_assert!(self.can_transition_to(self.current, to));
        self.current = to;
        PagerEvent::Moved { index: to }
    }

    /// Back button. Returns `false` on the first page.
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Skip is hidden on the last page.
    pub fn can_skip(&self) -> bool {
        !self.is_last_page()
    }

    pub fn skip(&self) -> Option<PagerEvent> {
        self.can_skip().then_some(PagerEvent::Skipped)
    }

    /// Back button is hidden on the first page.
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn primary_action_label(&self) -> &'static str {
        if self.is_last_page() { "Get Started" } else { "Next" }
    }

    /// Accessibility text for each page indicator dot.
    pub fn indicator_labels(&self) -> Vec<String> {
        let count = self.pages.len();
        (0..count)
            .map(|index| {
                let suffix = if index == self.current { ", current page" } else { "" };
                format!("Page {} of {count}{suffix}", index + 1)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_pages_then_completes() {
        let mut pager = OnboardingPager::default();
        assert_eq!(pager.next(), PagerEvent::Moved { index: 1 });
        assert_eq!(pager.next(), PagerEvent::Moved { index: 2 });
        assert!(pager.is_last_page());
        assert_eq!(pager.next(), PagerEvent::Completed);
        // Completion does not move the pager.
        assert_eq!(pager.current_index(), 2);
    }

    #[test]
    fn back_stops_at_first_page() {
        let mut pager = OnboardingPager::default();
        assert!(!pager.back());
        assert!(!pager.can_go_back());
        pager.next();
        assert!(pager.can_go_back());
        assert!(pager.back());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn skip_hidden_on_last_page() {
        let mut pager = OnboardingPager::default();
        assert_eq!(pager.skip(), Some(PagerEvent::Skipped));
        pager.next();
        pager.next();
        assert!(!pager.can_skip());
        assert_eq!(pager.skip(), None);
    }

    #[test]
    fn primary_label_switches_on_last_page() {
        let mut pager = OnboardingPager::default();
        assert_eq!(pager.primary_action_label(), "Next");
        pager.next();
        pager.next();
        assert_eq!(pager.primary_action_label(), "Get Started");
    }

    #[test]
    fn indicator_labels_mark_current() {
        let mut pager = OnboardingPager::default();
        pager.next();
        assert_eq!(
            pager.indicator_labels(),
            vec![
                "Page 1 of 3".to_string(),
                "Page 2 of 3, current page".to_string(),
                "Page 3 of 3".to_string(),
            ]
        );
    }

    #[test]
    fn only_adjacent_transitions() {
        let pager = OnboardingPager::default();
        assert!(pager.can_transition_to(0, 1));
        assert!(pager.can_transition_to(2, 1));
        assert!(!pager.can_transition_to(0, 2));
        assert!(!pager.can_transition_to(1, 1));
        assert!(!pager.can_transition_to(2, 3));
    }

    #[test]
    fn single_page_pager_completes_immediately() {
        let page = default_pages().remove(0);
        let mut pager = OnboardingPager::new(vec![page]);
        assert!(!pager.can_skip());
        assert_eq!(pager.next(), PagerEvent::Completed);
    }

    #[test]
    fn terminal_events() {
        assert!(PagerEvent::Completed.is_terminal());
        assert!(PagerEvent::Skipped.is_terminal());
        assert!(!PagerEvent::Moved { index: 1 }.is_terminal());
    }
}
