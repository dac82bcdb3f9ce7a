//! Task Master client.
//!
//! An authenticated HTTP client for the Task Master backend that attaches
//! bearer tokens and silently refreshes them once on a 401, plus typed
//! account/category/task operations and the `taskmaster` command handlers.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod forms;
pub mod store;
