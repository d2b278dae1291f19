//! Terminal front-end for the customer service.
//!
//! # Overview
//! Three layers, each a thin pass-through to the one below:
//! - views (`list_view`, `form_view`) hold screen state and call use cases,
//! - `use_cases` forwards to `api`,
//! - `api` builds requests with `customer_core`, runs them through a
//!   `transport`, and parses the result.
//!
//! `shell` drives the views from a line-oriented terminal.

pub mod api;
pub mod error_message;
pub mod form_view;
pub mod list_view;
pub mod routes;
pub mod settings;
pub mod shell;
pub mod telemetry;
pub mod transport;
pub mod use_cases;

pub use api::CustomerApi;
pub use form_view::CustomerForm;
pub use list_view::{Confirm, CustomerList};
pub use routes::Route;
pub use settings::Settings;
pub use shell::{Shell, ShellError};
pub use transport::{HttpTransport, ReqwestTransport};
pub use use_cases::{ApiUseCases, CustomerUseCases};
