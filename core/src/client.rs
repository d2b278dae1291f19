//! Stateless HTTP request builder and response parser for the customer API.
//!
//! # Design
//! `CustomerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AddCredit, Customer, SortOrder};

/// Synchronous, stateless client for the customer API.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    base_url: String,
}

impl CustomerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_customers(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("{}/customers", self.base_url))
    }

    pub fn build_get_customer(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("{}/customers/{id}", self.base_url))
    }

    pub fn build_create_customer(&self, customer: &Customer) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("{}/customers", self.base_url), customer)
    }

    pub fn build_update_customer(
        &self,
        id: &str,
        customer: &Customer,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{}/customers/{id}", self.base_url), customer)
    }

    pub fn build_delete_customer(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("{}/customers/{id}", self.base_url))
    }

    pub fn build_add_credit(&self, id: &str, amount: f64) -> Result<HttpRequest, ApiError> {
        let input = AddCredit {
            id: id.to_string(),
            amount,
        };
        self.with_json(HttpMethod::Post, format!("{}/customers/credit", self.base_url), &input)
    }

    /// `None` sorts descending.
    pub fn build_sort_customers_by_credit(&self, order: Option<SortOrder>) -> HttpRequest {
        let order = order.unwrap_or_default();
        self.bodiless(
            HttpMethod::Get,
            format!("{}/customers/sortByCredit?order={order}", self.base_url),
        )
    }

    pub fn parse_list_customers(&self, response: HttpResponse) -> Result<Vec<Customer>, ApiError> {
        decode(response)
    }

    pub fn parse_get_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        decode(response)
    }

    pub fn parse_create_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        decode(response)
    }

    pub fn parse_update_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        decode(response)
    }

    pub fn parse_delete_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_add_credit(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        decode(response)
    }

    pub fn parse_sort_customers_by_credit(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Customer>, ApiError> {
        decode(response)
    }

    fn bodiless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::unexpected(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Any 2xx passes; everything else becomes `ApiError::Response`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::unexpected(e.to_string()))
}
