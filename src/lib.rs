// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. pager::PagerError)
    clippy::module_name_repetitions
)]

//! # Prettycat
//!
//! `cat` for the terminal with syntax colors and a built-in pager.
//!
//! Prettycat renders its inputs with:
//! - Styled markdown (headings, lists, quotes, framed code blocks)
//! - Syntax-highlighted source code
//! - Plain text passed through untouched
//!
//! When stdout is a terminal the result is shown in an interactive pager;
//! otherwise it is streamed as-is.
//!
//! ## Architecture
//!
//! The pager follows The Elm Architecture (TEA) pattern:
//! - **State**: [`pager::ViewState`]
//! - **Message**: [`pager::Message`], mapped from decoded keys
//! - **Update**: [`pager::update`], a pure state transition
//! - **View**: [`pager::render::render_page`], one full repaint per key
//!
//! ## Modules
//!
//! - [`app`]: Load, render, then page or stream
//! - [`config`]: Flags and environment
//! - [`source`]: Reading files and stdin
//! - [`document`]: Content-type detection and rendering
//! - [`highlight`]: Syntax highlighting
//! - [`pager`]: Raw-mode terminal pager
//! - [`ui`]: Colors and styling

pub mod app;
pub mod config;
pub mod document;
pub mod highlight;
pub mod pager;
pub mod source;
pub mod ui;
