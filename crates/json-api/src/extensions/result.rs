//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

pub(crate) trait ResultExt<T> {
    /// Map any error to a logged internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Map any error to a bad request carrying `brief`.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn or_400_keeps_the_brief() -> TestResult {
        let status = "lots"
            .parse::<u32>()
            .or_400("pageSize must be a number")
            .err()
            .ok_or("expected a parse failure")?;

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "pageSize must be a number");

        Ok(())
    }

    #[test]
    fn or_500_hides_the_cause() -> TestResult {
        let status = Err::<(), _>("connection reset")
            .or_500("loading departments")
            .err()
            .ok_or("expected an error")?;

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!status.brief.contains("connection reset"), "cause must not leak");

        Ok(())
    }
}
