//! Terminal host for the todo list synchronizer.
//!
//! The binary in `main.rs` owns the event loop; everything it drives lives
//! here so the transport and timers can be tested against a live server.

pub mod config;
pub mod intent;
pub mod render;
pub mod session;
pub mod timer;
pub mod transport;
