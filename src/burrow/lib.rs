//! # Burrow Architecture
//!
//! Burrow is a **UI-agnostic research-tracking library**. This is not a CLI
//! application that happens to have some library code, it is a library that
//! happens to ship two clients (a CLI and a full-screen terminal UI).
//!
//! This distinction drives the entire architecture and should guide all
//! development.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front Ends (main.rs for the CLI, ui/ for the terminal UI)  │
//! │  - Parse arguments / keystrokes, format output              │
//! │  - The ONLY place that knows about stdout/terminals/editors │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Load current tree, mutate it, save it                    │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions beyond the store trait                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tree Engine (model.rs + impl blocks) and Storage (store/)  │
//! │  - Pure in-memory tree: structure, cursor, links, queries   │
//! │  - Abstract TreeStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Tree Engine
//!
//! All domain rules live in methods on [`model::Tree`], split across one
//! file per concern: structure edits in `graph.rs`, cursor movement in
//! `nav.rs`, status transitions in `status.rs`, cross-links in `links.rs`
//! and read-only queries in `query.rs`. The engine never touches storage;
//! commands load a tree, call into it and save the result.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, engine, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! The same core serves both front ends, and would serve any other.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`model.rs` and the impl-block files): unit tests of the
//!    tree rules. This is where the lion's share of testing lives.
//! 2. **Commands** (`commands/*.rs`): unit tests over `InMemoryStore`,
//!    checking persistence and messages rather than re-testing the rules.
//! 3. **Front ends**: end-to-end tests driving the compiled binary
//!    against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Load-mutate-save logic for each command
//! - [`model`]: Core data types (`Tree`, `Node`, `NodeStatus`)
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration (frontmatter round-trip)
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`export`]: Markdown rendering of a tree
//! - [`error`]: Error types
//! - [`ui`]: The full-screen terminal UI (state machine + renderer)

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod ui;

mod graph;
mod links;
mod nav;
mod query;
mod status;
