//! Page glue around forms, reveal animations and scrolling.
//!
//! Nothing here is persisted; every function works on the [`Document`](crate::dom::Document)
//! with inputs the host measures (validity, intersections, scroll offsets).

pub mod reveal;
pub mod scroll;
pub mod validation;
pub mod widgets;

pub use reveal::RevealTracker;
pub use scroll::{
    AnchorScroll,
    SectionBox,
    navigate_to_anchor,
    on_scroll,
};
pub use validation::SubmitOutcome;
