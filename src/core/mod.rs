//! Core business logic - framework-agnostic badge resolution, domain checks and the
//! queries behind them.

/// Badge state resolution and the badge descriptor
pub mod badge;
/// Embed domain check
pub mod domain;
/// Partner and certification attempt queries
pub mod partner;
/// Database seeding from seed.toml
pub mod seed;
/// Certification settings singleton
pub mod settings;
/// Placeholder substitution for hover text
pub mod template;
