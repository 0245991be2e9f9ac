//! Resource catalog for the two upstream API families
//!
//! The catalog declares the eight provisionable resource types, maps each to
//! its platform and quota feature, and owns the typed payloads that carry
//! one batch item each. Payloads double as the declared validation shape.

pub mod payload;

pub use payload::{
    AccountPayload, ContainerPayload, ConversionEventPayload, DataStreamPayload, ResourcePayload,
    TriggerPayload, VariablePayload, WorkspacePayload,
};

use crate::core::upstream::UpstreamCall;
use crate::core::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream API family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    /// The analytics admin API
    Analytics,
    /// The tag manager API
    TagManager,
}

impl Platform {
    /// Wire name, used in cache keys and rate-limiter bucket keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Analytics => "analytics",
            Platform::TagManager => "tagManager",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, quota-metered capability
///
/// Static reference data; quota rows are keyed by the feature name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Accounts,
    Properties,
    Streams,
    ConversionEvents,
    Containers,
    Workspaces,
    Triggers,
    Variables,
}

impl Feature {
    /// All features, in dashboard display order
    pub const ALL: [Feature; 8] = [
        Feature::Accounts,
        Feature::Properties,
        Feature::Streams,
        Feature::ConversionEvents,
        Feature::Containers,
        Feature::Workspaces,
        Feature::Triggers,
        Feature::Variables,
    ];

    /// Name as stored in quota rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Accounts => "Accounts",
            Feature::Properties => "Properties",
            Feature::Streams => "Streams",
            Feature::ConversionEvents => "ConversionEvents",
            Feature::Containers => "Containers",
            Feature::Workspaces => "Workspaces",
            Feature::Triggers => "Triggers",
            Feature::Variables => "Variables",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight provisionable resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    Accounts,
    Properties,
    DataStreams,
    ConversionEvents,
    Containers,
    Workspaces,
    Triggers,
    Variables,
}

impl ResourceType {
    /// Wire name, used in cache keys and the inbound API
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Accounts => "accounts",
            ResourceType::Properties => "properties",
            ResourceType::DataStreams => "dataStreams",
            ResourceType::ConversionEvents => "conversionEvents",
            ResourceType::Containers => "containers",
            ResourceType::Workspaces => "workspaces",
            ResourceType::Triggers => "triggers",
            ResourceType::Variables => "variables",
        }
    }

    /// Which API family serves this resource type
    pub fn platform(&self) -> Platform {
        match self {
            ResourceType::Accounts
            | ResourceType::Properties
            | ResourceType::DataStreams
            | ResourceType::ConversionEvents => Platform::Analytics,
            ResourceType::Containers
            | ResourceType::Workspaces
            | ResourceType::Triggers
            | ResourceType::Variables => Platform::TagManager,
        }
    }

    /// Which quota feature meters this resource type
    pub fn feature(&self) -> Feature {
        match self {
            ResourceType::Accounts => Feature::Accounts,
            ResourceType::Properties => Feature::Properties,
            ResourceType::DataStreams => Feature::Streams,
            ResourceType::ConversionEvents => Feature::ConversionEvents,
            ResourceType::Containers => Feature::Containers,
            ResourceType::Workspaces => Feature::Workspaces,
            ResourceType::Triggers => Feature::Triggers,
            ResourceType::Variables => Feature::Variables,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of write operation a batch performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Wire name, matching the quota column prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields that make one item unique within a batch
///
/// Two items with the same identity key are ambiguous; the orchestrator
/// rejects the whole batch when it sees a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    /// Parent resource path, empty for top-level resources
    pub parent: String,
    /// Distinguishing name within the parent
    pub name: String,
}

impl IdentityKey {
    /// Create a new identity key
    pub fn new(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parent.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.parent, self.name)
        }
    }
}

/// One logical unit of batch work
///
/// Implementors declare their identity for de-duplication, their validation
/// rules per operation, and how to express themselves as an upstream call.
/// The orchestrator is generic over this trait; it never inspects
/// resource-specific fields.
pub trait ItemPayload: Send + Sync + 'static {
    /// The resource type this payload provisions
    fn resource_type(&self) -> ResourceType;

    /// Identity key for de-duplication under the given operation
    fn identity_key(&self, op: OperationKind) -> IdentityKey;

    /// Human-readable name carried into the per-item result
    fn display_name(&self) -> String;

    /// Upstream resource path, when the item refers to an existing resource
    fn resource_id(&self) -> Option<&str>;

    /// Trim and canonicalize fields in place
    fn normalize(&mut self);

    /// Check the payload shape for the given operation
    fn validate(&self, op: OperationKind) -> Result<(), ValidationError>;

    /// Build the upstream call for the given operation
    fn upstream_call(&self, op: OperationKind) -> UpstreamCall;
}

/// Build the upstream list call backing the read view of a resource type
pub fn list_call(resource_type: ResourceType, parent: Option<&str>) -> UpstreamCall {
    let platform = resource_type.platform();
    let parent = parent.unwrap_or("");
    match resource_type {
        ResourceType::Accounts => UpstreamCall::get(platform, "/v1beta/accounts"),
        ResourceType::Properties => UpstreamCall::get(
            platform,
            format!("/v1beta/properties?filter=parent:{}", parent),
        ),
        ResourceType::DataStreams => {
            UpstreamCall::get(platform, format!("/v1beta/{}/dataStreams", parent))
        }
        ResourceType::ConversionEvents => {
            UpstreamCall::get(platform, format!("/v1beta/{}/conversionEvents", parent))
        }
        ResourceType::Containers => {
            UpstreamCall::get(platform, format!("/tagmanager/v2/{}/containers", parent))
        }
        ResourceType::Workspaces => {
            UpstreamCall::get(platform, format!("/tagmanager/v2/{}/workspaces", parent))
        }
        ResourceType::Triggers => {
            UpstreamCall::get(platform, format!("/tagmanager/v2/{}/triggers", parent))
        }
        ResourceType::Variables => {
            UpstreamCall::get(platform, format!("/tagmanager/v2/{}/variables", parent))
        }
    }
}
