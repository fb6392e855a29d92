// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB/session-store adapters
// - presentation: HTTP handlers, routing, session extractors
// - application: ports and per-operation use cases
// - domain: core models and cross-collection references

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
