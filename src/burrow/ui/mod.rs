//! # Interactive UI
//!
//! Full-screen terminal front end: three panels (Trees, Nodes, Detail)
//! over the same [`crate::api::BurrowApi`] facade the CLI uses. Every
//! mutation goes through the command layer and is persisted immediately,
//! so killing the terminal never loses more than the prompt being typed.
//!
//! - [`app`]: state machine, testable without a terminal
//! - [`keys`]: key-to-action translation
//! - [`render`]: ratatui drawing
//! - [`runner`]: terminal setup, event loop, editor suspension
//! - [`theme`]: color palettes

pub mod app;
pub mod keys;
pub mod render;
pub mod runner;
pub mod theme;

pub use runner::run;
