//! Navigation router — validates requests and applies them to the back-stack.
//!
//! Requests are resolved before anything is touched, so a rejected request
//! leaves the stack exactly as it was.

use tracing::debug;

use crate::error::NavError;

use super::back_stack::BackStack;
use super::route::{ResolvedRoute, RouteArgs, Screen};

/// Options applied to a forward navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Truncate the stack back to this screen before pushing.
    pub pop_up_to: Option<Screen>,
    /// Also remove the `pop_up_to` screen itself.
    pub inclusive: bool,
    /// Skip the push when the current route is already the target.
    pub single_top: bool,
}

impl NavOptions {
    pub fn pop_up_to(screen: Screen, inclusive: bool) -> Self {
        Self {
            pop_up_to: Some(screen),
            inclusive,
            single_top: false,
        }
    }

    pub fn single_top() -> Self {
        Self {
            single_top: true,
            ..Self::default()
        }
    }
}

/// Screen router state.
#[derive(Debug, Clone)]
pub struct Router {
    stack: BackStack,
    debug_routes: bool,
    /// Number of routes pushed since creation.
    pushes: u64,
}

impl Router {
    /// Create a router whose root is `initial`.
    pub fn new(initial: Screen, debug_routes: bool) -> Result<Self, NavError> {
        let root = ResolvedRoute::bare(initial)?;
        Ok(Self {
            stack: BackStack::new(root),
            debug_routes,
            pushes: 0,
        })
    }

    /// Get the current route.
    pub fn current(&self) -> &ResolvedRoute {
        self.stack.current()
    }

    pub fn back_stack(&self) -> &BackStack {
        &self.stack
    }

    /// Count of pushes so far. Changes whenever a new entry becomes current
    /// through a forward navigation, even at the same depth.
    pub fn push_count(&self) -> u64 {
        self.pushes
    }

    /// Navigate forward to `screen` with `args`.
    pub fn navigate(
        &mut self,
        screen: Screen,
        args: RouteArgs,
        options: NavOptions,
    ) -> Result<&ResolvedRoute, NavError> {
        let route = screen.resolve(args)?;
        self.apply(route, options)
    }

    /// Navigate forward to a concrete path like `add_money/Asha`.
    pub fn navigate_path(
        &mut self,
        path: &str,
        options: NavOptions,
    ) -> Result<&ResolvedRoute, NavError> {
        let route = ResolvedRoute::parse(path)?;
        self.apply(route, options)
    }

    /// Pop the current route. Returns `false` at the root.
    pub fn navigate_up(&mut self) -> bool {
        match self.stack.pop() {
            Some(left) => {
                debug!(from = %left, to = %self.stack.current(), "Navigated up");
                true
            }
            None => {
                debug!(route = %self.stack.current(), "Navigate up ignored at root");
                false
            }
        }
    }

    fn apply(&mut self, route: ResolvedRoute, options: NavOptions) -> Result<&ResolvedRoute, NavError> {
        if route.screen == Screen::DebugOnboarding && !self.debug_routes {
            return Err(NavError::RouteDisabled(route.screen.name().to_string()));
        }

        let from = self.stack.current().path();

        // single_top is judged against the stack as it will be after popping.
        let top = match options.pop_up_to {
            Some(boundary) => self.stack.top_after_truncate(boundary, options.inclusive),
            None => Some(self.stack.current()),
        };
        let duplicate_top = options.single_top && top.is_some_and(|top| *top == route);

        let removed = match options.pop_up_to {
            Some(boundary) if duplicate_top => self.stack.truncate_to(boundary, options.inclusive),
            Some(boundary) => {
                self.pushes += 1;
                self.stack.pop_up_to_and_push(boundary, options.inclusive, route)
            }
            None if duplicate_top => 0,
            None => {
                self.pushes += 1;
                self.stack.push(route);
                0
            }
        };

        debug!(
            from = %from,
            to = %self.stack.current(),
            removed,
            depth = self.stack.len(),
            "Navigated"
        );
        Ok(self.stack.current())
    }
}
