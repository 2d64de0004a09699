/// OpenAPI documentation generation.
pub mod documentation;
/// Session and round operations behind the game routes.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Interstitial ad providers.
pub mod interstitial;
/// Round construction from the word catalogue.
pub mod round_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Statistics and donation settings.
pub mod stats_service;
