//! Identifier types shared across Nimbus services.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account ID used when deriving ARNs and queue URLs (12-digit string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Account ID used when none is configured.
    pub const DEFAULT: &str = "000000000000";

    /// Create a new account ID from a string.
    ///
    /// # Errors
    /// Returns an error unless the ID is a 12-digit numeric string.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::NimbusError> {
        let id = id.into();
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(crate::NimbusError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    /// The account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Region identifier embedded in derived endpoint addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used when none is configured.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// The region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of component a [`ComponentIdentifier`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// An object-store bucket.
    Bucket,
    /// A message queue.
    Queue,
    /// A notification topic.
    Topic,
    /// A registered function.
    Function,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bucket => "bucket",
            Self::Queue => "queue",
            Self::Topic => "topic",
            Self::Function => "function",
        };
        f.write_str(s)
    }
}

/// Descriptor for a component owned by an engine instance.
///
/// Every service can enumerate its components as identifiers, which the
/// engine aggregates into a single inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentIdentifier {
    /// What kind of component this is.
    pub kind: ComponentKind,
    /// The component's name, unique within its kind.
    pub name: String,
    /// The derived endpoint address (queue URL, topic ARN, ...).
    pub endpoint: String,
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.kind, self.name, self.endpoint)
    }
}

/// Random token appended to generated endpoint addresses.
///
/// Two engine instances building the same stack must never share an
/// address, so every derived endpoint carries one of these.
#[must_use]
pub fn endpoint_token() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_owned()
}
