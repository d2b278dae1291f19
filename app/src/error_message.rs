use std::error::Error;

/// Log `err` and turn it into the text a view shows. Falls back to
/// `default` when the error has nothing to say.
pub fn error_message(err: &dyn Error, default: &str) -> String {
    tracing::error!(error = %err, "{default}");
    let message = err.to_string();
    if message.is_empty() {
        default.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use customer_core::ApiError;

    use super::*;

    #[derive(Debug)]
    struct Silent;

    impl fmt::Display for Silent {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl Error for Silent {}

    #[test]
    fn uses_error_text() {
        let message = error_message(&ApiError::NoResponse, "fallback");
        assert_eq!(message, "No response received from the API.");
    }

    #[test]
    fn empty_text_falls_back_to_default() {
        assert_eq!(error_message(&Silent, "Something went wrong"), "Something went wrong");
    }
}
