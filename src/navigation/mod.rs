//! Screen navigation: the static route table, the back-stack, and the router.

pub mod back_stack;
pub mod route;
pub mod router;

pub use back_stack::BackStack;
pub use route::{ResolvedRoute, RouteArgs, Screen, route_args};
pub use router::{NavOptions, Router};
