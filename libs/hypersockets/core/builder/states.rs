//! Type-state markers for the builder pattern
//!
//! The URL and router states carry their payload once set, so `build()` is
//! only reachable when both are present.

use super::RoutingBuilder;
use crate::traits::MessageRouter;

/// Marker trait for URL state
pub trait UrlState {}

/// URL has not been set
pub struct NoUrl;
impl UrlState for NoUrl {}

/// URL has been set
pub struct HasUrl(pub(crate) String);
impl UrlState for HasUrl {}

/// Marker trait for Router state
pub trait RouterState {}

/// Router has not been set
pub struct NoRouter;
impl RouterState for NoRouter {}

/// Router and its handler table have been set
pub struct HasRouter<R: MessageRouter> {
    pub(crate) router: R,
    pub(crate) routing: RoutingBuilder<R>,
}
impl<R: MessageRouter> RouterState for HasRouter<R> {}
