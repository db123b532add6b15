use thiserror::Error;

use schoolboard_core::ActionError;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("account not found")]
    NotFound,

    #[error("identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected identity provider response: {0}")]
    Decode(String),

    #[error("identity provider misconfigured: {0}")]
    Configuration(String),
}

/// Classification of a failed provider call.
///
/// Update and delete tolerate [`ProviderFailure::Absent`]; everything else
/// aborts the action.
#[derive(Debug)]
pub enum ProviderFailure {
    Absent,
    Other(IdentityError),
}

impl From<IdentityError> for ProviderFailure {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound => ProviderFailure::Absent,
            other => ProviderFailure::Other(other),
        }
    }
}

/// The single place the tolerate-404 policy lives: an absent account
/// becomes `Ok(None)`, any other failure is passed through.
pub fn tolerate_absent<T>(result: Result<T, IdentityError>) -> Result<Option<T>, IdentityError> {
    match result.map_err(ProviderFailure::from) {
        Ok(value) => Ok(Some(value)),
        Err(ProviderFailure::Absent) => Ok(None),
        Err(ProviderFailure::Other(err)) => Err(err),
    }
}

impl From<IdentityError> for ActionError {
    fn from(err: IdentityError) -> Self {
        ActionError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolboard_core::FailureKind;

    #[test]
    fn not_found_is_absent() {
        assert!(matches!(
            ProviderFailure::from(IdentityError::NotFound),
            ProviderFailure::Absent
        ));
        assert!(matches!(
            ProviderFailure::from(IdentityError::Decode("x".into())),
            ProviderFailure::Other(_)
        ));
    }

    #[test]
    fn tolerate_absent_swallows_only_not_found() {
        assert_eq!(tolerate_absent(Ok::<_, IdentityError>(5)).unwrap(), Some(5));
        assert_eq!(
            tolerate_absent::<u8>(Err(IdentityError::NotFound)).unwrap(),
            None
        );

        let err = tolerate_absent::<u8>(Err(IdentityError::Rejected {
            status: 500,
            message: "boom".into(),
        }))
        .unwrap_err();
        assert!(matches!(err, IdentityError::Rejected { status: 500, .. }));
    }

    #[test]
    fn provider_errors_become_upstream_failures() {
        let action: ActionError = IdentityError::Rejected {
            status: 422,
            message: "That username is taken".into(),
        }
        .into();
        assert_eq!(action.kind(), FailureKind::UpstreamError);
    }
}
