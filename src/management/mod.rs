mod auth;
mod settings;

pub use auth::TokenManager;
pub use settings::SettingsManager;
