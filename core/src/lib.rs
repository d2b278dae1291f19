//! Synchronous API client core for the customer service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round trip, which keeps the core deterministic and testable.
//!
//! # Design
//! - `CustomerClient` is stateless and holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Failures are classified into the three `ApiError` kinds in one place,
//!   `ApiError::from_transport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod validation;

pub use client::CustomerClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportFailure};
pub use types::{AddCredit, Customer, SortOrder};
