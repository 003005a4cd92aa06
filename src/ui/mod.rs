//! Terminal styling shared by the renderers and the pager.
//!
//! - [`style`]: Theming and colors

pub mod style;
