//! The function registry.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use nimbus_core::{
    AccountId, AwsRegion, ComponentIdentifier, ComponentKind, NimbusConfig, endpoint_token,
};
use tracing::{debug, info};

use crate::context::LambdaContext;
use crate::error::LambdaServiceError;

/// A registered handler: opaque input bytes plus the execution context
/// in, opaque output bytes out.
pub type LambdaHandler = Box<dyn Fn(Bytes, &LambdaContext) -> anyhow::Result<Bytes> + Send + Sync>;

struct LambdaFunction {
    name: String,
    arn: String,
    handler: LambdaHandler,
}

/// Registry of named invocable handlers for one engine instance.
pub struct LambdaRegistry {
    region: AwsRegion,
    account_id: AccountId,
    functions: DashMap<String, Arc<LambdaFunction>>,
}

impl std::fmt::Debug for LambdaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaRegistry")
            .field("function_count", &self.functions.len())
            .finish_non_exhaustive()
    }
}

impl LambdaRegistry {
    /// Create a new, empty registry using the engine configuration's
    /// region and account for derived ARNs.
    #[must_use]
    pub fn new(config: &NimbusConfig) -> Self {
        Self {
            region: config.default_region.clone(),
            account_id: config.account_id.clone(),
            functions: DashMap::new(),
        }
    }

    /// Bind a handler to a name.
    ///
    /// # Errors
    ///
    /// Returns [`LambdaServiceError::FunctionAlreadyExists`] if a handler
    /// is already registered under the name.
    pub fn register(&self, name: &str, handler: LambdaHandler) -> Result<(), LambdaServiceError> {
        match self.functions.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(LambdaServiceError::FunctionAlreadyExists {
                name: name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                let arn = format!(
                    "arn:aws:lambda:{}:{}:function:{name}/{}",
                    self.region,
                    self.account_id,
                    endpoint_token()
                );
                entry.insert(Arc::new(LambdaFunction {
                    name: name.to_owned(),
                    arn,
                    handler,
                }));
                info!(function = %name, "function registered");
                Ok(())
            }
        }
    }

    /// Invoke a handler synchronously with an opaque payload.
    ///
    /// Each invocation sees a fresh execution context carrying the
    /// function's own name and a new request ID.
    ///
    /// # Errors
    ///
    /// - [`LambdaServiceError::NoSuchFunction`] if no handler is
    ///   registered under the name.
    /// - [`LambdaServiceError::InvocationFailed`] if the handler returns
    ///   an error.
    pub fn invoke(&self, name: &str, payload: Bytes) -> Result<Bytes, LambdaServiceError> {
        let function = self
            .functions
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LambdaServiceError::NoSuchFunction {
                function: name.to_owned(),
            })?;

        let context = LambdaContext::new(&function.name, &function.arn);
        debug!(function = %name, request_id = %context.request_id, "invoking function");

        (function.handler)(payload, &context).map_err(|source| {
            LambdaServiceError::InvocationFailed {
                function: name.to_owned(),
                source,
            }
        })
    }

    /// Whether a handler is registered under the name.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Identifiers for every registered function.
    #[must_use]
    pub fn identifiers(&self) -> Vec<ComponentIdentifier> {
        let mut ids: Vec<ComponentIdentifier> = self
            .functions
            .iter()
            .map(|entry| ComponentIdentifier {
                kind: ComponentKind::Function,
                name: entry.key().clone(),
                endpoint: entry.value().arn.clone(),
            })
            .collect();
        ids.sort_by(|a, b| a.name.cmp(&b.name));
        ids
    }

    /// Reset all state, removing every registered handler.
    pub fn reset(&self) {
        debug!("resetting function registry");
        self.functions.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
