//! Execution context passed to handlers.

/// Context available to a handler during invocation.
///
/// A fresh context (with a new request ID) is built for every
/// invocation.
#[derive(Debug, Clone)]
pub struct LambdaContext {
    /// The registered name of the function being invoked.
    pub function_name: String,
    /// The function's derived ARN.
    pub function_arn: String,
    /// Unique ID for this invocation.
    pub request_id: String,
}

impl LambdaContext {
    pub(crate) fn new(function_name: &str, function_arn: &str) -> Self {
        Self {
            function_name: function_name.to_owned(),
            function_arn: function_arn.to_owned(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
