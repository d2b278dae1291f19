//! Async facade over `CustomerClient`: build, execute, parse.

use std::sync::Arc;

use customer_core::{
    ApiError, Customer, CustomerClient, HttpMethod, HttpRequest, HttpResponse, SortOrder,
};
use tracing::{debug, error};

use crate::transport::{HttpTransport, ReqwestTransport};

type Parser<T> = fn(&CustomerClient, HttpResponse) -> Result<T, ApiError>;

/// One method per REST operation on the customer resource.
#[derive(Clone)]
pub struct CustomerApi {
    client: CustomerClient,
    transport: Arc<dyn HttpTransport>,
}

impl CustomerApi {
    pub fn new(client: CustomerClient, transport: Arc<dyn HttpTransport>) -> Self {
        Self { client, transport }
    }

    pub fn with_reqwest(base_url: &str) -> Self {
        Self::new(CustomerClient::new(base_url), Arc::new(ReqwestTransport::new()))
    }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.call(self.client.build_list_customers(), CustomerClient::parse_list_customers)
            .await
    }

    pub async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ApiError> {
        self.call(self.client.build_get_customer(id), CustomerClient::parse_get_customer)
            .await
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiError> {
        let request = self.prepare(self.client.build_create_customer(customer))?;
        self.call(request, CustomerClient::parse_create_customer).await
    }

    pub async fn update_customer(&self, id: &str, customer: &Customer) -> Result<Customer, ApiError> {
        let request = self.prepare(self.client.build_update_customer(id, customer))?;
        self.call(request, CustomerClient::parse_update_customer).await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.call(self.client.build_delete_customer(id), CustomerClient::parse_delete_customer)
            .await
    }

    pub async fn add_credit(&self, id: &str, amount: f64) -> Result<Customer, ApiError> {
        let request = self.prepare(self.client.build_add_credit(id, amount))?;
        self.call(request, CustomerClient::parse_add_credit).await
    }

    /// `None` sorts descending.
    pub async fn sort_customers_by_credit(
        &self,
        order: Option<SortOrder>,
    ) -> Result<Vec<Customer>, ApiError> {
        self.call(
            self.client.build_sort_customers_by_credit(order),
            CustomerClient::parse_sort_customers_by_credit,
        )
        .await
    }

    fn prepare(&self, request: Result<HttpRequest, ApiError>) -> Result<HttpRequest, ApiError> {
        request.inspect_err(|err| error!(error = ?err, "Error preparing request"))
    }

    async fn call<T>(&self, request: HttpRequest, parse: Parser<T>) -> Result<T, ApiError> {
        let method = request.method;
        let url = request.path.clone();
        debug!(method = method.as_str(), %url, "sending request");

        let result = match self.transport.execute(request).await {
            Ok(response) => parse(&self.client, response),
            Err(failure) => Err(ApiError::from_transport(failure)),
        };
        if let Err(err) = &result {
            error!(error = ?err, "{} {url}", failure_context(method));
        }
        result
    }
}

fn failure_context(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Error fetching from",
        HttpMethod::Post => "Error posting to",
        HttpMethod::Put => "Error updating",
        HttpMethod::Delete => "Error deleting from",
    }
}
