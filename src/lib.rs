// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: SQLite store and repositories
// - presentation: HTTP handlers and routing
// - application: use cases, ports and the identity service
// - domain: core models and ranking rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_support;
