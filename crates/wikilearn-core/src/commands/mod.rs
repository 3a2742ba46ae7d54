//! Host-side commands behind the `wikilearn` CLI group.

pub mod enable;

pub use enable::{EnablePluginsCommand, EnableReport};
