//! Menu-driven, in-memory simulation of a small discussion platform.
//!
//! Users register, form communities, post, comment, and message each
//! other, all through a numbered text menu. Every piece of mutable state
//! lives behind a single worker task that answers one request at a time,
//! so callers never observe a partial update. Nothing is persisted; the
//! process holds all state for its lifetime and discards it on exit.
//!
//! Each module has one concrete responsibility:
//!
//! - [`store`] holds the social graph: users, communities, posts, inboxes,
//!   and the monotonic id counters.
//! - [`engine`] applies one operation at a time against the store and
//!   returns typed outcomes instead of display text.
//! - [`service`] is the request/reply contract: a request enum with
//!   oneshot reply senders, the worker loop, and the [`service::EngineHandle`]
//!   facade callers use.
//! - [`menu`] renders the interactive menu, validates input, and formats
//!   outcomes into colored lines.
//! - [`cli`] parses the command-line flags.
//!
//! Integration tests drive the engine through its public handle; the
//! end-to-end test drives the compiled binary over piped stdio.

pub mod cli;
pub mod engine;
pub mod menu;
pub mod service;
pub mod store;
