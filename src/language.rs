//! Active language and switching.
//!
//! The active language lives in a [`LanguageManager`] value owned by the
//! caller; every pass builds a [`Resolver`](crate::resolve::Resolver) from it.

mod events;
mod manager;

pub use events::{
    LanguageChanged,
    LanguageEvents,
};
pub use manager::{
    LanguageManager,
    SwitchOutcome,
};
