use clubhub_core::task::TaskCategory;

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The task form left categories without an assignee. Nothing was sent.
    #[error("Please assign at least one member to every task. Unassigned: {}", names(.0))]
    Incomplete(Vec<TaskCategory>),

    /// The task form has no deadline. Nothing was sent.
    #[error("A deadline is required")]
    MissingDeadline,

    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn names(categories: &[TaskCategory]) -> String {
    categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
