//! Sans-IO client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the local todo list
//! in step with the outcomes of those requests.
//!
//! # Design
//! - `TodoClient` is the gateway: stateless apart from `base_url` and the
//!   session's `UserId`.
//! - `ListSynchronizer` owns the list and its view state. Intents return
//!   `Effect`s; the host executes them and reports back through `settle`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod sync;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sync::{BannerTimer, Effect, ErrorMessage, ListSynchronizer, Outcome, RowState, Ticket, ERROR_BANNER_TTL};
pub use types::{Filter, NewTodo, Todo, UserId, PLACEHOLDER_ID};
