//! Document abstraction and the translation binder.
/// Resolution-to-document binding
pub mod binder;
/// Document trait
mod document;
/// In-memory document
mod memory;

pub use binder::{
    BindReport,
    BindingTarget,
    PlannedBinding,
    apply_bindings,
    apply_translations,
    plan_bindings,
};
pub use document::{
    Document,
    ElementId,
    SelectOption,
};
pub use memory::MemoryDocument;
