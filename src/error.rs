use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal failures. Unrecognized tokens are never errors, they are rejected quietly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid engine configuration, reported when the engine is built.
    #[error("{message}\n  in: {context}")]
    Config { message: String, context: String },
    /// A hand-written composition (`@apply`, inline apply, `theme()`, `screen()`)
    /// that cannot be honored.
    #[error("{message}\n  in: {context}")]
    Composition { message: String, context: String },
}

impl Error {
    pub fn config(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn composition(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Composition {
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } | Self::Composition { message, .. } => message,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Self::Config { context, .. } | Self::Composition { context, .. } => context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_includes_context() {
        let err = Error::composition("No rule matching \"p-x\"", " @apply p-x;");
        assert_eq!(err.to_string(), "No rule matching \"p-x\"\n  in:  @apply p-x;");
        assert_eq!(err.context(), " @apply p-x;");
    }

    #[test]
    fn accessors_work_for_both_kinds() {
        let err = Error::config("bad", "ctx");
        assert_eq!(err.message(), "bad");
        assert!(matches!(err, Error::Config { .. }));
    }
}
