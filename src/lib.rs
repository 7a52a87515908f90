//! Sentence structure analyzer.
//!
//! A completion model labels parts of an English sentence; this crate places
//! those labels on the sentence ([`analysis::resolver`]), partitions it into
//! annotated units ([`analysis::renderer`]) and paints the result as text or
//! in an egui window ([`presentation`]).

pub mod analysis;
pub mod app;
pub mod completion;
pub mod config;
pub mod error;
pub mod parsing;
pub mod presentation;
pub mod prompt_io;
pub mod types;

pub use analysis::{analyze, Analysis};
pub use error::{Error, Result};
