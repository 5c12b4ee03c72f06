//! Function registry error types.

/// Function registry error type.
#[derive(Debug, thiserror::Error)]
pub enum LambdaServiceError {
    /// No handler is registered under the given name.
    #[error("no such function: {function}")]
    NoSuchFunction {
        /// The function name that was not found.
        function: String,
    },

    /// A handler is already registered under the given name.
    #[error("a function with this name is already registered: {name}")]
    FunctionAlreadyExists {
        /// The function name that already exists.
        name: String,
    },

    /// The handler itself returned an error.
    #[error("invocation of {function} failed")]
    InvocationFailed {
        /// The function whose handler failed.
        function: String,
        /// The handler's error.
        #[source]
        source: anyhow::Error,
    },
}
