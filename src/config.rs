//! Site configuration: settings types, file loading and validation.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    BindingAttributes,
    ConfigError,
    ConsentSettings,
    ElementIds,
    MissingKeyPolicy,
    SiteSettings,
    StorageKeys,
    ValidationError,
};
