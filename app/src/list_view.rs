//! Customer list screen.
//!
//! Holds the only client-side copy of the customer list. Mutations go to the
//! server first, then the local list is patched instead of refetched.

use std::fmt::Write as _;
use std::sync::Arc;

use customer_core::validation::{parse_credit_amount, INVALID_CREDIT_AMOUNT_MESSAGE};
use customer_core::{Customer, SortOrder};

use crate::error_message::error_message;
use crate::use_cases::CustomerUseCases;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this customer?";
pub const NO_SELECTION_MESSAGE: &str = "No customer selected. Please select a customer first.";

const LOAD_FAILED: &str = "Failed to load customers. Please try again later.";
const DELETE_FAILED: &str = "Failed to delete customer. Please try again later.";
const SORT_FAILED: &str = "Failed to sort customers. Please try again later.";
const ADD_CREDIT_FAILED: &str = "Failed to add credit. Please try again later.";

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

pub struct CustomerList {
    use_cases: Arc<dyn CustomerUseCases>,
    customers: Vec<Customer>,
    loading: bool,
    error: Option<String>,
    credit_amount: String,
    selected_customer_id: Option<String>,
}

impl CustomerList {
    /// Starts in the loading state; call `load` to populate.
    pub fn new(use_cases: Arc<dyn CustomerUseCases>) -> Self {
        Self {
            use_cases,
            customers: Vec::new(),
            loading: true,
            error: None,
            credit_amount: String::new(),
            selected_customer_id: None,
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn credit_amount(&self) -> &str {
        &self.credit_amount
    }

    pub fn selected_customer_id(&self) -> Option<&str> {
        self.selected_customer_id.as_deref()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.use_cases.fetch_customers().await {
            Ok(customers) => self.customers = customers,
            Err(err) => self.error = Some(error_message(&err, LOAD_FAILED)),
        }
        self.loading = false;
    }

    /// Deletes after confirmation, then drops exactly that id locally.
    pub async fn delete(&mut self, id: &str, confirm: &mut dyn Confirm) {
        if !confirm.confirm(DELETE_PROMPT) {
            return;
        }
        match self.use_cases.delete_customer(id).await {
            Ok(()) => self.customers.retain(|customer| customer.id != id),
            Err(err) => self.error = Some(error_message(&err, DELETE_FAILED)),
        }
    }

    /// Replaces the local list with the server's sorted one.
    pub async fn sort(&mut self, order: SortOrder) {
        match self.use_cases.sort_customers_by_credit(Some(order)).await {
            Ok(customers) => self.customers = customers,
            Err(err) => self.error = Some(error_message(&err, SORT_FAILED)),
        }
    }

    pub fn select_for_credit(&mut self, id: &str) {
        self.selected_customer_id = Some(id.to_string());
        self.credit_amount.clear();
    }

    pub fn set_credit_amount(&mut self, input: &str) {
        self.credit_amount = input.to_string();
    }

    pub async fn add_credit(&mut self) {
        let Some(id) = self.selected_customer_id.clone() else {
            self.error = Some(NO_SELECTION_MESSAGE.to_string());
            return;
        };
        let Some(amount) = parse_credit_amount(&self.credit_amount) else {
            self.error = Some(INVALID_CREDIT_AMOUNT_MESSAGE.to_string());
            return;
        };

        match self.use_cases.add_credit(&id, amount).await {
            Ok(()) => {
                if let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) {
                    customer.available_credit += amount;
                }
                self.credit_amount.clear();
                self.selected_customer_id = None;
            }
            Err(err) => self.error = Some(error_message(&err, ADD_CREDIT_FAILED)),
        }
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading customers...\n".to_string();
        }
        if let Some(error) = &self.error {
            return format!("{error}\n");
        }

        let mut out = String::from("Customer List\n");
        if self.customers.is_empty() {
            out.push_str("  (no customers)\n");
        }
        for customer in &self.customers {
            let _ = writeln!(
                out,
                "  [{}] {} - {} - Credit: {}",
                customer.id, customer.name, customer.email, customer.available_credit
            );
        }
        if let Some(id) = &self.selected_customer_id {
            let _ = writeln!(out, "\nAdd Credit to [{id}]");
            let _ = writeln!(out, "  amount: {}", self.credit_amount);
        }
        out
    }
}
