//! Path label resolution.
//!
//! Label the request by the route pattern the router matched (`/users/:id`)
//! so dynamic segments don't blow up series cardinality. Requests that matched
//! no route (fallbacks, 404s) keep their raw path.

use axum::extract::MatchedPath;
use axum::http::Request;

/// Matched route pattern, if the router reported a non-empty one.
pub fn route_pattern<B>(request: &Request<B>) -> Option<&str> {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str())
        .filter(|p| !p.is_empty())
}

pub fn path_label<B>(request: &Request<B>) -> String {
    route_pattern(request)
        .unwrap_or_else(|| request.uri().path())
        .to_owned()
}
