//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod certification_attempt;
pub mod certification_settings;
pub mod partner;

// Re-export specific types to avoid conflicts
pub use certification_attempt::{
    Column as CertificationAttemptColumn, Entity as CertificationAttempt,
    Model as CertificationAttemptModel,
};
pub use certification_settings::{
    Column as CertificationSettingsColumn, Entity as CertificationSettings,
    Model as CertificationSettingsModel,
};
pub use partner::{Column as PartnerColumn, Entity as Partner, Model as PartnerModel};
