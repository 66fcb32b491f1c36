//! # Snipstash Architecture
//!
//! Snipstash is a **UI-agnostic snippet vault library** with a CLI client.
//! The CLI is one consumer of the library, not the other way around.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, resolves names to ids, formats output  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs)                                 │
//! │  - Loads the collection once, seeds when the store is empty │
//! │  - dispatch(action): reduce, then persist the whole thing   │
//! │  - Turns persistence failures into warnings, never errors   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (reducer.rs, view.rs, model.rs, collection.rs)        │
//! │  - Pure state transitions over a closed Action sum type     │
//! │  - Derived view: conjunctive filters + stable sorting       │
//! │  - No I/O assumptions whatsoever                            │
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
//! ## Key Principle: the Reducer Is Total
//!
//! Every mutation goes through [`reducer::reduce`], a function that cannot
//! fail: acting on a missing id is a silent no-op by contract. Errors exist
//! only at the edges: storage I/O and CLI input handling.
//!
//! ## Module Overview
//!
//! - [`session`]: The dispatch facade, entry point for all operations
//! - [`reducer`]: State transitions for each action
//! - [`view`]: Filtered/sorted projection of the collection
//! - [`model`]: Core data types (`Snippet`, `Version`, `Language`, ...)
//! - [`collection`]: The aggregate root and its seed set
//! - [`action`]: The closed action sum type
//! - [`store`]: Storage abstraction and implementations
//! - [`export`]: tar.gz export of snippet files
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod action;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod reducer;
pub mod session;
pub mod store;
pub mod view;
