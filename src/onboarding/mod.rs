//! Onboarding — first-launch pager and the persisted completion flag.
//!
//! The pager walks the user through a few intro pages. Finishing or skipping
//! it sets a durable flag so later launches start on the home screen.

pub mod model;
pub mod pager;
pub mod routes;
pub mod store;

pub use model::{OnboardingPage, default_pages, preference_keys};
pub use pager::{OnboardingPager, PagerEvent};
pub use routes::{OnboardingRouteState, OnboardingStatus, onboarding_routes};
pub use store::{OnboardingStore, PendingWrite};
