//! HTTP API for the to-do list.

pub mod envelope;
pub mod handlers;
pub mod request;
mod server;

pub use server::{AppState, ServerHandle, app, build_router, start_server};
