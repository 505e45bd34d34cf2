//! Onboarding content and persistence keys.

use serde::Serialize;

/// One page of the first-run pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingPage {
    /// Headline. May contain line breaks.
    pub title: &'static str,
    pub description: &'static str,
    /// Accessibility text for the page illustration.
    pub content_description: &'static str,
}

impl OnboardingPage {
    /// Title with line breaks collapsed, as read by a screen reader.
    pub fn spoken_title(&self) -> String {
        self.title.replace('\n', " ")
    }
}

/// The pages shown on first launch, in order.
pub fn default_pages() -> Vec<OnboardingPage> {
    vec![
        OnboardingPage {
            title: "Trade Green\nSave Green",
            description: "Earn rewards by trading green credits and enjoy discounts on eco-friendly products.",
            content_description: "Illustration showing green trading concept",
        },
        OnboardingPage {
            title: "Track Trade\nTransform",
            description: "Manage your carbon footprint, trade credits, and unlock savings on sustainable goods.",
            content_description: "Illustration showing carbon tracking and transformation",
        },
        OnboardingPage {
            title: "Eco-Friendly\nInvestments,\nReal Rewards",
            description: "Align your investments with sustainability and get exclusive discounts on green products.",
            content_description: "Illustration showing eco-friendly investment concept",
        },
    ]
}

/// Preference keys used for onboarding persistence.
pub mod preference_keys {
    /// Namespace shared by all user preferences.
    pub const NAMESPACE: &str = "user_preferences";
    /// Boolean set once the user finished or skipped onboarding.
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
}
