//! App navigator — picks the start screen and runs the onboarding exit protocol.
//!
//! The start screen is decided once from a snapshot of the onboarding flag.
//! Later changes to the flag (a reset from support tooling, say) never
//! redirect a running session.
//!
//! Finishing onboarding submits the flag write and navigates home without
//! waiting for the write. A crash in between can leave the flag unset, in
//! which case onboarding shows again on the next launch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppConfig, RoutePolicy};
use crate::error::{NavError, Result as AppResult};
use crate::navigation::{BackStack, NavOptions, ResolvedRoute, RouteArgs, Router, Screen};
use crate::onboarding::{OnboardingPager, OnboardingStore, PagerEvent, PendingWrite};
use crate::store::{LibSqlPreferences, PreferenceStore};

/// Pick the start screen from the onboarding flag.
pub async fn initial_route(store: &OnboardingStore) -> Screen {
    if store.current().await {
        Screen::Home
    } else {
        Screen::OnboardingFlow
    }
}

/// Owns the router and the onboarding store for one app session.
pub struct AppNavigator {
    router: Router,
    store: Arc<OnboardingStore>,
    policy: RoutePolicy,
    /// Active pager, keyed by the stack entry that owns it.
    pager: Option<(PagerOwner, OnboardingPager)>,
}

/// Identifies a stack entry: its depth and the router push count when it
/// became current. A forward navigation always yields a new owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PagerOwner {
    depth: usize,
    pushes: u64,
}

impl AppNavigator {
    /// Open the configured preference database and start a session on it.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let prefs: Arc<dyn PreferenceStore> = if config.is_in_memory() {
            Arc::new(LibSqlPreferences::new_memory().await?)
        } else {
            Arc::new(LibSqlPreferences::new_local(&config.db_path).await?)
        };
        let store = Arc::new(OnboardingStore::new(prefs));
        Ok(Self::launch(store, config).await?)
    }

    /// Start a session. Suspends until the onboarding flag is available.
    pub async fn launch(store: Arc<OnboardingStore>, config: &AppConfig) -> Result<Self, NavError> {
        let start = initial_route(&store).await;
        info!(route = %start, "Starting navigation");
        let mut navigator = Self {
            router: Router::new(start, config.debug_routes)?,
            store,
            policy: config.route_policy,
            pager: None,
        };
        navigator.sync_pager();
        Ok(navigator)
    }

    pub fn current(&self) -> &ResolvedRoute {
        self.router.current()
    }

    pub fn back_stack(&self) -> &BackStack {
        self.router.back_stack()
    }

    pub fn store(&self) -> &Arc<OnboardingStore> {
        &self.store
    }

    /// The pager, while an onboarding screen is showing.
    pub fn pager(&self) -> Option<&OnboardingPager> {
        self.pager.as_ref().map(|(_, pager)| pager)
    }

    /// Navigate forward.
    ///
    /// `Ok(None)` means the request was invalid and ignored under
    /// [`RoutePolicy::Lenient`].
    pub fn navigate(
        &mut self,
        screen: Screen,
        args: RouteArgs,
        options: NavOptions,
    ) -> Result<Option<ResolvedRoute>, NavError> {
        let result = self.router.navigate(screen, args, options).cloned();
        self.sync_pager();
        self.apply_policy(result)
    }

    /// Navigate forward to a concrete path.
    pub fn navigate_path(
        &mut self,
        path: &str,
        options: NavOptions,
    ) -> Result<Option<ResolvedRoute>, NavError> {
        let result = self.router.navigate_path(path, options).cloned();
        self.sync_pager();
        self.apply_policy(result)
    }

    /// Back. Returns `false` at the root.
    pub fn navigate_up(&mut self) -> bool {
        let moved = self.router.navigate_up();
        self.sync_pager();
        moved
    }

    /// "Get Started" on the last onboarding page.
    pub fn on_complete(&mut self) -> Result<Option<PendingWrite>, NavError> {
        self.finish_onboarding("complete")
    }

    /// "Skip" on any onboarding page but the last. Ignored on the last page.
    pub fn on_skip(&mut self) -> Result<Option<PendingWrite>, NavError> {
        if self.pager().is_some_and(|pager| !pager.can_skip()) {
            warn!("Skip ignored on the last onboarding page");
            return Ok(None);
        }
        self.finish_onboarding("skip")
    }

    /// Primary pager button. `None` when no onboarding screen is showing.
    pub fn pager_next(&mut self) -> Result<Option<PagerEvent>, NavError> {
        let Some((_, pager)) = self.pager.as_mut() else {
            return Ok(None);
        };
        let event = pager.next();
        if event == PagerEvent::Completed {
            // Fire and forget: the write handle is not awaited.
            drop(self.on_complete()?);
        }
        Ok(Some(event))
    }

    /// Pager back button. `false` on the first page or outside onboarding.
    pub fn pager_back(&mut self) -> bool {
        self.pager
            .as_mut()
            .is_some_and(|(_, pager)| pager.back())
    }

    /// Pager skip button. `None` when skipping is not offered.
    pub fn pager_skip(&mut self) -> Result<Option<PagerEvent>, NavError> {
        let Some(event) = self.pager().and_then(OnboardingPager::skip) else {
            return Ok(None);
        };
        drop(self.on_skip()?);
        Ok(Some(event))
    }

    fn finish_onboarding(&mut self, trigger: &'static str) -> Result<Option<PendingWrite>, NavError> {
        let screen = self.router.current().screen;
        match screen {
            Screen::OnboardingFlow => {
                let pending = self.store.submit_completed();
                info!(trigger, "Onboarding finished, leaving for home");
                let result = self
                    .router
                    .navigate(
                        Screen::Home,
                        RouteArgs::new(),
                        NavOptions::pop_up_to(Screen::OnboardingFlow, true),
                    )
                    .map(|_| ());
                self.sync_pager();
                self.apply_policy(result)?;
                Ok(Some(pending))
            }
            Screen::DebugOnboarding => {
                info!(trigger, "Debug onboarding finished");
                self.navigate_up();
                Ok(None)
            }
            other => {
                warn!(route = %other, trigger, "Onboarding finish outside onboarding ignored");
                Ok(None)
            }
        }
    }

    /// Create a fresh pager on entering an onboarding screen, drop it on leaving.
    fn sync_pager(&mut self) {
        let owner = PagerOwner {
            depth: self.router.back_stack().len(),
            pushes: self.router.push_count(),
        };
        if !self.router.current().screen.is_onboarding() {
            self.pager = None;
        } else if self.pager.as_ref().is_none_or(|(current, _)| *current != owner) {
            self.pager = Some((owner, OnboardingPager::default()));
        }
    }

    fn apply_policy<T>(&self, result: Result<T, NavError>) -> Result<Option<T>, NavError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => match self.policy {
                RoutePolicy::Strict => Err(e),
                RoutePolicy::Lenient => {
                    warn!(error = %e, "Ignoring invalid navigation request");
                    Ok(None)
                }
            },
        }
    }
}
