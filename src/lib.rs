//! Settings persistence and bundled-resource lookup for the pympress
//! presentation viewer.
//!
//! - [`config`] resolves, loads and saves the per-user settings file.
//! - [`resources`] finds the stylesheets and icon pixmaps shipped with the
//!   program.

pub mod config;
pub mod resources;
