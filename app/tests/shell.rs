//! Drives the terminal shell and the use cases against the live mock server
//! over real HTTP with the reqwest transport.

use std::io::Cursor;
use std::sync::Arc;

use customer_app::{ApiUseCases, CustomerApi, CustomerUseCases, Route, Shell};
use customer_core::{Customer, SortOrder};

fn seed() -> Vec<mock_server::Customer> {
    vec![
        mock_server::Customer {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            available_credit: 100.0,
        },
        mock_server::Customer {
            id: "2".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            available_credit: 150.0,
        },
    ]
}

/// Start the mock server on a random port and return its base URL.
async fn spawn_server(customers: Vec<mock_server::Customer>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, customers));
    format!("http://{addr}")
}

fn use_cases(base_url: &str) -> Arc<dyn CustomerUseCases> {
    Arc::new(ApiUseCases::new(CustomerApi::with_reqwest(base_url)))
}

async fn run_script(base_url: &str, start: Route, script: &str) -> String {
    let mut shell = Shell::new(use_cases(base_url), Cursor::new(script.to_string()), Vec::new());
    shell.run(start).await.unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

/// Text of the last list screen the shell printed.
fn last_list(output: &str) -> &str {
    output.rsplit("Customer List").next().unwrap()
}

#[tokio::test]
async fn credit_delete_and_edit_through_the_shell() {
    let base_url = spawn_server(seed()).await;

    let script = "credit 1\namount 100\napply\ndelete 2\ny\nedit 1\nname Johnny\nsubmit\nquit\n";
    let output = run_script(&base_url, Route::List, script).await;

    let list = last_list(&output);
    assert!(list.contains("[1] Johnny - john@example.com - Credit: 200"), "{output}");
    assert!(!list.contains("Jane Doe"), "{output}");

    // The server agrees with what the screen showed.
    let customers = use_cases(&base_url).fetch_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name, "Johnny");
    assert_eq!(customers[0].available_credit, 200.0);
}

#[tokio::test]
async fn sort_commands_reorder_the_list() {
    let base_url = spawn_server(seed()).await;

    let output = run_script(&base_url, Route::List, "asc\nquit\n").await;
    let list = last_list(&output);
    let john = list.find("John Doe").unwrap();
    let jane = list.find("Jane Doe").unwrap();
    assert!(john < jane, "{output}");

    let output = run_script(&base_url, Route::List, "desc\nquit\n").await;
    let list = last_list(&output);
    assert!(list.find("Jane Doe").unwrap() < list.find("John Doe").unwrap(), "{output}");
}

#[tokio::test]
async fn create_form_rejects_invalid_then_saves() {
    let base_url = spawn_server(Vec::new()).await;

    let script = "name Ann\ncredit -3\nsubmit\nemail ann@example.com\ncredit 30\nsubmit\nquit\n";
    let output = run_script(&base_url, Route::NewCustomer, script).await;

    assert!(output.contains("Please fill out all fields with valid data."));
    assert!(last_list(&output).contains("Ann - ann@example.com - Credit: 30"), "{output}");
}

#[tokio::test]
async fn editing_a_missing_customer_shows_api_error() {
    let base_url = spawn_server(Vec::new()).await;

    let output = run_script(&base_url, "/customers/edit/ghost".parse().unwrap(), "quit\n").await;

    assert!(output.contains("API error: 404 - Not Found: Customer not found"), "{output}");
}

#[tokio::test]
async fn unreachable_server_shows_no_response() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let output = run_script(&format!("http://{addr}"), Route::List, "quit\n").await;

    assert!(output.contains("No response received from the API."), "{output}");
}

#[tokio::test]
async fn use_cases_forward_to_the_api() {
    let base_url = spawn_server(seed()).await;
    let use_cases = use_cases(&base_url);

    let created = use_cases
        .create_customer(&Customer {
            id: String::new(),
            name: "Zed".to_string(),
            email: "zed@example.com".to_string(),
            available_credit: 500.0,
        })
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let sorted = use_cases.sort_customers_by_credit(None).await.unwrap();
    assert_eq!(sorted[0].id, created.id);
    let sorted = use_cases
        .sort_customers_by_credit(Some(SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(sorted[0].id, "1");

    use_cases.add_credit("1", 25.0).await.unwrap();
    let john = use_cases.fetch_customer_by_id("1").await.unwrap();
    assert_eq!(john.available_credit, 125.0);

    let mut renamed = john.clone();
    renamed.email = "johnny@example.com".to_string();
    let updated = use_cases.update_customer(&renamed).await.unwrap();
    assert_eq!(updated, renamed);

    use_cases.delete_customer(&created.id).await.unwrap();
    let err = use_cases.fetch_customer_by_id(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}
