//! # Blocknotes Architecture
//!
//! Blocknotes is a note-taking library whose notes are ordered lists of typed
//! blocks (text, heading, todo, table, image). It ships a JSON API server and a
//! headless editing model that any UI can drive.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client side                                                │
//! │  page/   NotePage: editor + debounced saves via NotesClient │
//! │  editor/ BlockEditor, keyboard handling, menu, widgets      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ JSON over HTTP
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/)                                         │
//! │  - axum routes, status code mapping                         │
//! │  - The ONLY place that knows about HTTP                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id strings → UUIDs)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: listing caps, revision checks            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout or exits the process. The editor
//! is equally headless: it consumes key and pointer events and reports the new
//! block list, leaving rendering to the caller.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** and **editor**: unit tests next to the code. Most tests live here.
//! 2. **API**: dispatch tests against `InMemoryStore`.
//! 3. **HTTP**: router tests in `tests/http_api.rs`, plus a live client round trip.
//! 4. **Binary**: argument handling in `tests/cli.rs`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for note operations
//! - [`block`]: Block types and their wire format
//! - [`commands`]: Business logic for each operation
//! - [`config`]: Configuration file
//! - [`editor`]: Headless block editor
//! - [`error`]: Error types
//! - [`http`]: JSON routes
//! - [`logging`]: Subscriber setup for binaries
//! - [`model`]: Notes and legacy content decoding
//! - [`page`]: Note page controller and API client
//! - [`store`]: Storage abstraction and implementations

pub mod api;
pub mod block;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod page;
pub mod store;
