//! Failure reporting through GitHub Actions workflow commands

/// Escape a message for use as workflow command data
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render the `::error::` workflow command for a message
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Mark the step as failed with `message`
///
/// The runner picks the command up from stdout; the caller sets the exit code.
pub fn set_failed(message: &str) {
    tracing::error!(%message, "Run failed");
    println!("{}", error_command(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        assert_eq!(error_command("This is not a PR"), "::error::This is not a PR");
    }

    #[test]
    fn test_escapes_percent_first() {
        assert_eq!(escape_data("100%\n"), "100%25%0A");
    }

    #[test]
    fn test_escapes_multiline() {
        assert_eq!(
            error_command("GraphQL request failed\r\nstatus 502"),
            "::error::GraphQL request failed%0D%0Astatus 502"
        );
    }
}
