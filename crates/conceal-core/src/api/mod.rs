//! Builder style entry points, each call configures one run and `execute()` performs it.

pub mod conceal;
pub mod reveal;
