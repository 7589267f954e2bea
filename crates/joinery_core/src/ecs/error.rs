use thiserror::Error;

/// Errors surfaced by stores and by the system dispatcher.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("component store for `{component}` has unsorted records; renormalize first")]
    StoreNotNormalized { component: &'static str },

    #[error("static component `{component}` has no slot {index} (count {count})")]
    IndexOutOfRange {
        component: &'static str,
        index: usize,
        count: usize,
    },

    #[error("system '{system}' cannot be walked: {reason}")]
    DispatchPrecondition { system: String, reason: String },

    #[error("system '{system}' failed during execute")]
    UserHookFailure {
        system: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CoreError {
    pub(crate) fn precondition(system: &str, reason: impl Into<String>) -> Self {
        Self::DispatchPrecondition {
            system: system.to_string(),
            reason: reason.into(),
        }
    }

    /// The hook's own error, when this is a [`CoreError::UserHookFailure`].
    pub fn hook_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::UserHookFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
