//! Render Graph System
//!
//! Passes are grouped into an ordered graph. Each frame the graph runs every
//! pass's setup (which may decline to run), records the accepted passes into
//! one command list, then releases the pass callbacks.

pub mod builder;
pub mod graph;
pub mod pass;
pub mod resource;

pub use builder::*;
pub use graph::*;
pub use pass::*;
pub use resource::*;
