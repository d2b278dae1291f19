//! Create / update form.
//!
//! The mode comes from the route: an id means update, no id means create.

use std::fmt::Write as _;
use std::sync::Arc;

use customer_core::validation::{is_valid_customer, INVALID_FORM_MESSAGE};
use customer_core::Customer;

use crate::error_message::error_message;
use crate::routes::Route;
use crate::use_cases::CustomerUseCases;

const LOAD_FAILED: &str = "Failed to load customer data.";
const SUBMIT_FAILED: &str = "An error occurred while submitting the form.";

/// Called with the submitted customer after a successful create or update.
pub type OnSubmit = Box<dyn FnMut(&Customer) + Send>;

pub struct CustomerForm {
    use_cases: Arc<dyn CustomerUseCases>,
    id: Option<String>,
    name: String,
    email: String,
    /// `None` when the last credit input did not parse.
    available_credit: Option<f64>,
    loading: bool,
    error: Option<String>,
    on_submit: Option<OnSubmit>,
}

impl CustomerForm {
    pub fn new(use_cases: Arc<dyn CustomerUseCases>, id: Option<String>) -> Self {
        Self {
            use_cases,
            id,
            name: String::new(),
            email: String::new(),
            available_credit: Some(0.0),
            loading: true,
            error: None,
            on_submit: None,
        }
    }

    pub fn with_on_submit(mut self, on_submit: OnSubmit) -> Self {
        self.on_submit = Some(on_submit);
        self
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn available_credit(&self) -> Option<f64> {
        self.available_credit
    }

    /// Pre-fills the fields in update mode. Always ends with loading cleared.
    pub async fn load(&mut self) {
        if let Some(id) = &self.id {
            match self.use_cases.fetch_customer_by_id(id).await {
                Ok(customer) => {
                    self.name = customer.name;
                    self.email = customer.email;
                    self.available_credit = Some(customer.available_credit);
                }
                Err(err) => self.error = Some(error_message(&err, LOAD_FAILED)),
            }
        }
        self.loading = false;
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn set_available_credit(&mut self, input: &str) {
        self.available_credit = input.trim().parse().ok();
    }

    /// The entity a submit would send, if the credit input parsed.
    pub fn draft(&self) -> Option<Customer> {
        Some(Customer {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            available_credit: self.available_credit?,
        })
    }

    /// Validates, then creates or updates. Returns where to navigate on
    /// success; on failure the form stays with `error` set.
    pub async fn submit(&mut self) -> Option<Route> {
        let customer = match self.draft() {
            Some(customer) if is_valid_customer(&customer) => customer,
            _ => {
                self.error = Some(INVALID_FORM_MESSAGE.to_string());
                return None;
            }
        };

        let result = if self.is_update() {
            self.use_cases.update_customer(&customer).await
        } else {
            self.use_cases.create_customer(&customer).await
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id, "customer saved");
                if let Some(on_submit) = self.on_submit.as_mut() {
                    on_submit(&customer);
                }
                Some(Route::List)
            }
            Err(err) => {
                self.error = Some(error_message(&err, SUBMIT_FAILED));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading customer data...\n".to_string();
        }

        let mut out = String::new();
        let title = if self.is_update() {
            "Update Customer"
        } else {
            "Create Customer"
        };
        let _ = writeln!(out, "{title}");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        let credit = self
            .available_credit
            .map(|credit| credit.to_string())
            .unwrap_or_else(|| "(invalid)".to_string());
        let _ = writeln!(out, "  Name *: {}", self.name);
        let _ = writeln!(out, "  Email *: {}", self.email);
        let _ = writeln!(out, "  Available Credit *: {credit}");
        out
    }
}
