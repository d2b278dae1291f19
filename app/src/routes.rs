use std::fmt;
use std::str::FromStr;

/// Screens of the front-end, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/customers/new`
    NewCustomer,
    /// `/customers/edit/{id}`
    EditCustomer(String),
}

impl Route {
    /// Id carried by the route, if any. Its presence selects update mode in
    /// the form.
    pub fn id(&self) -> Option<&str> {
        match self {
            Route::EditCustomer(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => f.write_str("/"),
            Route::NewCustomer => f.write_str("/customers/new"),
            Route::EditCustomer(id) => write!(f, "/customers/edit/{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "/" | "" => Ok(Route::List),
            "/customers/new" => Ok(Route::NewCustomer),
            _ => match path.strip_prefix("/customers/edit/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Ok(Route::EditCustomer(id.to_string()))
                }
                _ => Err(format!("no route for {path}")),
            },
        }
    }
}
