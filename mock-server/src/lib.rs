use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub available_credit: f64,
}

/// Body of create and update. Any `id` the client sends is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub available_credit: f64,
}

#[derive(Deserialize)]
pub struct AddCredit {
    pub id: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct SortParams {
    pub order: Option<String>,
}

/// Kept as a `Vec` so listing preserves insertion order.
pub type Db = Arc<RwLock<Vec<Customer>>>;

/// Error reply in the `{"error": "..."}` shape the client expects.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Customer not found")
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-seeded with `customers`.
pub fn app_with(customers: Vec<Customer>) -> Router {
    let db: Db = Arc::new(RwLock::new(customers));
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/credit", post(add_credit))
        .route("/customers/sortByCredit", get(sort_by_credit))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, customers: Vec<Customer>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(customers)).await
}

fn validate(input: &CustomerInput) -> Result<(), ApiFailure> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "name and email are required",
        ));
    }
    if input.available_credit < 0.0 {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "availableCredit must not be negative",
        ));
    }
    Ok(())
}

async fn list_customers(State(db): State<Db>) -> Json<Vec<Customer>> {
    Json(db.read().await.clone())
}

async fn create_customer(
    State(db): State<Db>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiFailure> {
    validate(&input)?;
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        available_credit: input.available_credit,
    };
    db.write().await.push(customer.clone());
    tracing::debug!(id = %customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn get_customer(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiFailure> {
    let customers = db.read().await;
    customers
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiFailure::not_found)
}

async fn update_customer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, ApiFailure> {
    validate(&input)?;
    let mut customers = db.write().await;
    let customer = customers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(ApiFailure::not_found)?;
    customer.name = input.name;
    customer.email = input.email;
    customer.available_credit = input.available_credit;
    Ok(Json(customer.clone()))
}

async fn delete_customer(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    let mut customers = db.write().await;
    let index = customers
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(ApiFailure::not_found)?;
    customers.remove(index);
    tracing::debug!(%id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn add_credit(
    State(db): State<Db>,
    Json(input): Json<AddCredit>,
) -> Result<Json<Customer>, ApiFailure> {
    if input.amount <= 0.0 {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "amount must be positive",
        ));
    }
    let mut customers = db.write().await;
    let customer = customers
        .iter_mut()
        .find(|c| c.id == input.id)
        .ok_or_else(ApiFailure::not_found)?;
    customer.available_credit += input.amount;
    Ok(Json(customer.clone()))
}

async fn sort_by_credit(
    State(db): State<Db>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<Customer>>, ApiFailure> {
    let descending = match params.order.as_deref() {
        None | Some("desc") => true,
        Some("asc") => false,
        Some(other) => {
            return Err(ApiFailure::new(
                StatusCode::BAD_REQUEST,
                format!("invalid order: {other}"),
            ))
        }
    };
    let mut customers = db.read().await.clone();
    customers.sort_by(|a, b| a.available_credit.total_cmp(&b.available_credit));
    if descending {
        customers.reverse();
    }
    Ok(Json(customers))
}
