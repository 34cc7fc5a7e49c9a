//! Pure translation resolution: key path + tables -> string.
/// Placeholder substitution
mod interpolate;
/// Fallback-aware resolver
mod resolver;

pub use interpolate::interpolate;
pub use resolver::{
    Resolution,
    Resolver,
};
