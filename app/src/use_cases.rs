//! Use cases consumed by the views.
//!
//! Each method forwards its arguments unchanged to `CustomerApi` and returns
//! the result or error unchanged. Views depend on the trait so they can be
//! tested without a server.

use async_trait::async_trait;
use customer_core::{ApiError, Customer, SortOrder};

use crate::api::CustomerApi;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerUseCases: Send + Sync {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn fetch_customer_by_id(&self, id: &str) -> Result<Customer, ApiError>;
    async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiError>;
    /// Uses `customer.id` as the target.
    async fn update_customer(&self, customer: &Customer) -> Result<Customer, ApiError>;
    async fn delete_customer(&self, id: &str) -> Result<(), ApiError>;
    async fn add_credit(&self, id: &str, amount: f64) -> Result<(), ApiError>;
    /// `None` sorts descending.
    async fn sort_customers_by_credit(
        &self,
        order: Option<SortOrder>,
    ) -> Result<Vec<Customer>, ApiError>;
}

pub struct ApiUseCases {
    api: CustomerApi,
}

impl ApiUseCases {
    pub fn new(api: CustomerApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CustomerUseCases for ApiUseCases {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.api.get_all_customers().await
    }

    async fn fetch_customer_by_id(&self, id: &str) -> Result<Customer, ApiError> {
        self.api.get_customer_by_id(id).await
    }

    async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiError> {
        self.api.create_customer(customer).await
    }

    async fn update_customer(&self, customer: &Customer) -> Result<Customer, ApiError> {
        self.api.update_customer(&customer.id, customer).await
    }

    async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_customer(id).await
    }

    async fn add_credit(&self, id: &str, amount: f64) -> Result<(), ApiError> {
        self.api.add_credit(id, amount).await.map(|_| ())
    }

    async fn sort_customers_by_credit(
        &self,
        order: Option<SortOrder>,
    ) -> Result<Vec<Customer>, ApiError> {
        self.api.sort_customers_by_credit(order).await
    }
}
