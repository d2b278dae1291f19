//! Line-oriented terminal driver for the two screens.
//!
//! One command per line, at most one request in flight, then a re-render.
//! Input and output are generic so the whole loop runs in tests.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use customer_core::SortOrder;
use thiserror::Error;

use crate::form_view::CustomerForm;
use crate::list_view::{Confirm, CustomerList};
use crate::routes::Route;
use crate::use_cases::CustomerUseCases;

const LIST_HELP: &str = "commands: add | edit <id> | delete <id> | asc | desc | credit <id> | amount <n> | apply | reload | go <path> | quit";
const FORM_HELP: &str = "commands: name <text> | email <text> | credit <n> | submit | back | quit";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

enum Screen {
    List(CustomerList),
    Form(CustomerForm),
}

enum Flow {
    Continue,
    Navigate(Route),
    Quit,
}

pub struct Shell<R, W> {
    use_cases: Arc<dyn CustomerUseCases>,
    input: R,
    output: W,
    route: Route,
    screen: Option<Screen>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(use_cases: Arc<dyn CustomerUseCases>, input: R, output: W) -> Self {
        Self {
            use_cases,
            input,
            output,
            route: Route::List,
            screen: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self, start: Route) -> Result<(), ShellError> {
        self.navigate(start).await;
        loop {
            self.render()?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                break;
            };
            match self.handle(line.trim()).await {
                Flow::Continue => {}
                Flow::Navigate(route) => self.navigate(route).await,
                Flow::Quit => break,
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Leaving a screen drops its state; the list is always refetched.
    async fn navigate(&mut self, route: Route) {
        tracing::debug!(%route, "navigate");
        let screen = match &route {
            Route::List => {
                let mut list = CustomerList::new(self.use_cases.clone());
                list.load().await;
                Screen::List(list)
            }
            Route::NewCustomer | Route::EditCustomer(_) => {
                let mut form =
                    CustomerForm::new(self.use_cases.clone(), route.id().map(str::to_string));
                form.load().await;
                Screen::Form(form)
            }
        };
        self.route = route;
        self.screen = Some(screen);
    }

    fn render(&mut self) -> io::Result<()> {
        let (view, help) = match &self.screen {
            Some(Screen::List(list)) => (list.render(), LIST_HELP),
            Some(Screen::Form(form)) => (form.render(), FORM_HELP),
            None => return Ok(()),
        };
        writeln!(self.output, "\n{view}{help}")
    }

    async fn handle(&mut self, line: &str) -> Flow {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        if command == "quit" {
            return Flow::Quit;
        }

        match self.screen.as_mut() {
            Some(Screen::List(list)) => match (command, arg) {
                ("add", _) => Flow::Navigate(Route::NewCustomer),
                ("edit", id) if !id.is_empty() => Flow::Navigate(Route::EditCustomer(id.to_string())),
                ("delete", id) if !id.is_empty() => {
                    let mut confirm = LineConfirm {
                        input: &mut self.input,
                        output: &mut self.output,
                    };
                    list.delete(id, &mut confirm).await;
                    Flow::Continue
                }
                ("asc", _) => {
                    list.sort(SortOrder::Asc).await;
                    Flow::Continue
                }
                ("desc", _) => {
                    list.sort(SortOrder::Desc).await;
                    Flow::Continue
                }
                ("credit", id) if !id.is_empty() => {
                    list.select_for_credit(id);
                    Flow::Continue
                }
                ("amount", amount) => {
                    list.set_credit_amount(amount);
                    Flow::Continue
                }
                ("apply", _) => {
                    list.add_credit().await;
                    Flow::Continue
                }
                ("reload", _) => Flow::Navigate(Route::List),
                ("go", path) => match path.parse() {
                    Ok(route) => Flow::Navigate(route),
                    Err(message) => self.note(&message),
                },
                ("", _) => Flow::Continue,
                _ => self.note(&format!("unknown command: {line}")),
            },
            Some(Screen::Form(form)) => match (command, arg) {
                ("name", name) => {
                    form.set_name(name);
                    Flow::Continue
                }
                ("email", email) => {
                    form.set_email(email);
                    Flow::Continue
                }
                ("credit", credit) => {
                    form.set_available_credit(credit);
                    Flow::Continue
                }
                ("submit", _) => match form.submit().await {
                    Some(route) => Flow::Navigate(route),
                    None => Flow::Continue,
                },
                ("back", _) => Flow::Navigate(Route::List),
                ("", _) => Flow::Continue,
                _ => self.note(&format!("unknown command: {line}")),
            },
            None => Flow::Navigate(Route::List),
        }
    }

    fn note(&mut self, message: &str) -> Flow {
        if let Err(err) = writeln!(self.output, "{message}") {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
        Flow::Continue
    }
}

/// Asks on the shell's own input; anything but `y`/`yes` declines.
struct LineConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<'_, R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        match read_line(self.input) {
            Ok(Some(answer)) => matches!(answer.trim(), "y" | "Y" | "yes"),
            _ => false,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use customer_core::Customer;

    use super::*;
    use crate::use_cases::MockCustomerUseCases;

    fn customer(id: &str, name: &str, credit: f64) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            available_credit: credit,
        }
    }

    async fn run(mock: MockCustomerUseCases, script: &str) -> (String, Route) {
        let mut shell = Shell::new(Arc::new(mock), Cursor::new(script.to_string()), Vec::new());
        shell.run(Route::List).await.unwrap();
        let route = shell.route().clone();
        (String::from_utf8(shell.into_output()).unwrap(), route)
    }

    #[tokio::test]
    async fn lists_on_start_and_quits() {
        let mut mock = MockCustomerUseCases::new();
        mock.expect_fetch_customers()
            .times(1)
            .returning(|| Ok(vec![customer("1", "John", 100.0)]));

        let (output, route) = run(mock, "quit\n").await;

        assert_eq!(route, Route::List);
        assert!(output.contains("Customer List"));
        assert!(output.contains("[1] John - john@example.com - Credit: 100"));
    }

    #[tokio::test]
    async fn declined_delete_does_not_call_api() {
        let mut mock = MockCustomerUseCases::new();
        mock.expect_fetch_customers()
            .returning(|| Ok(vec![customer("1", "John", 100.0)]));
        mock.expect_delete_customer().never();

        let (output, _) = run(mock, "delete 1\nn\nquit\n").await;

        assert!(output.contains("Are you sure you want to delete this customer? [y/N]"));
    }

    #[tokio::test]
    async fn confirmed_delete_calls_api() {
        let mut mock = MockCustomerUseCases::new();
        mock.expect_fetch_customers()
            .returning(|| Ok(vec![customer("1", "John", 100.0), customer("2", "Jane", 1.0)]));
        mock.expect_delete_customer()
            .withf(|id| id == "1")
            .times(1)
            .returning(|_| Ok(()));

        let (output, _) = run(mock, "delete 1\ny\nquit\n").await;

        let last_render = output.rsplit("Customer List").next().unwrap();
        assert!(!last_render.contains("[1] John"));
        assert!(last_render.contains("[2] Jane"));
    }

    #[tokio::test]
    async fn submit_returns_to_a_fresh_list() {
        let mut mock = MockCustomerUseCases::new();
        mock.expect_fetch_customers().times(2).returning(|| Ok(Vec::new()));
        mock.expect_create_customer()
            .withf(|c| c.id.is_empty() && c.name == "Ann" && c.available_credit == 5.0)
            .times(1)
            .returning(|c| Ok(c.clone()));

        let script = "add\nname Ann\nemail ann@example.com\ncredit 5\nsubmit\nquit\n";
        let (output, route) = run(mock, script).await;

        assert_eq!(route, Route::List);
        assert!(output.contains("Create Customer"));
    }

    #[tokio::test]
    async fn go_rejects_unknown_paths() {
        let mut mock = MockCustomerUseCases::new();
        mock.expect_fetch_customers().returning(|| Ok(Vec::new()));

        let (output, route) = run(mock, "go /nowhere\n").await;

        assert_eq!(route, Route::List);
        assert!(output.contains("no route for /nowhere"));
    }
}
