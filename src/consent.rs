//! GDPR notice and cookie consent.
//!
//! Both flags are persisted through a [`PreferenceStore`](crate::storage::PreferenceStore)
//! as JSON. A missing record means the visitor has not decided yet.

mod preferences;
mod prompt;
mod state;

pub use preferences::{
    ConsentChoice,
    CookiePreferences,
    EnabledCategories,
};
pub use prompt::{
    ConsentNotice,
    ConsentPrompt,
};
pub use state::{
    ConsentState,
    PendingPrompt,
    PromptKind,
};
