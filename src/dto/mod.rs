pub mod categories;
pub mod game;
pub mod health;
pub mod phase;
pub mod settings;
pub mod sse;
pub mod validation;
