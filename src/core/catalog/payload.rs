//! Typed payloads for the eight resource types
//!
//! Each payload carries the fields the dashboard may set for one resource,
//! declares its validation rules per operation, and builds its own upstream
//! call. Delete payloads only need the resource path; create payloads need
//! the distinguishing name and parent.

use super::{IdentityKey, ItemPayload, OperationKind, Platform, ResourceType};
use crate::core::upstream::UpstreamCall;
use crate::core::validation::{self, ValidationError, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};
use serde_json::json;

const STREAM_TYPES: &[&str] = &["WEB_DATA_STREAM", "IOS_APP_DATA_STREAM", "ANDROID_APP_DATA_STREAM"];
const COUNTING_METHODS: &[&str] = &["ONCE_PER_EVENT", "ONCE_PER_SESSION"];
const USAGE_CONTEXTS: &[&str] = &["web", "android", "ios", "server"];

/// An analytics account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    /// Resource path like `accounts/123`, required for update/delete
    pub id: Option<String>,
    /// Account display name
    pub display_name: Option<String>,
    /// Country code of the business
    pub region_code: Option<String>,
}

/// An analytics property under an account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPayload {
    /// Resource path like `properties/123`, required for update/delete
    pub id: Option<String>,
    /// Parent account path like `accounts/123`
    pub parent: Option<String>,
    /// Property display name
    pub display_name: Option<String>,
    /// Reporting time zone
    pub time_zone: Option<String>,
    /// Reporting currency
    pub currency_code: Option<String>,
}

/// A data stream under a property
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStreamPayload {
    /// Resource path like `properties/123/dataStreams/456`
    pub id: Option<String>,
    /// Parent property path like `properties/123`
    pub parent: Option<String>,
    /// Stream display name
    pub display_name: Option<String>,
    /// Stream type (`WEB_DATA_STREAM`, `IOS_APP_DATA_STREAM`, `ANDROID_APP_DATA_STREAM`)
    pub stream_type: Option<String>,
    /// Site or app URI for web streams
    pub uri: Option<String>,
}

/// A conversion event under a property
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEventPayload {
    /// Resource path like `properties/123/conversionEvents/456`
    pub id: Option<String>,
    /// Parent property path like `properties/123`
    pub parent: Option<String>,
    /// Event name, the identity of the conversion event
    pub event_name: Option<String>,
    /// Counting method (`ONCE_PER_EVENT`, `ONCE_PER_SESSION`)
    pub counting_method: Option<String>,
}

/// A tag manager container under an account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    /// Resource path like `accounts/123/containers/456`
    pub id: Option<String>,
    /// Parent account path like `accounts/123`
    pub parent: Option<String>,
    /// Container display name
    pub display_name: Option<String>,
    /// Usage contexts (`web`, `android`, `ios`, `server`)
    #[serde(default)]
    pub usage_context: Vec<String>,
}

/// A tag manager workspace under a container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePayload {
    /// Resource path like `accounts/1/containers/2/workspaces/3`
    pub id: Option<String>,
    /// Parent container path
    pub parent: Option<String>,
    /// Workspace display name
    pub display_name: Option<String>,
    /// Workspace description
    pub description: Option<String>,
}

/// A tag manager trigger under a workspace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerPayload {
    /// Resource path like `.../workspaces/3/triggers/4`
    pub id: Option<String>,
    /// Parent workspace path
    pub parent: Option<String>,
    /// Trigger display name
    pub display_name: Option<String>,
    /// Trigger type, e.g. `pageview`, `click`, `customEvent`
    pub trigger_type: Option<String>,
}

/// A tag manager variable under a workspace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablePayload {
    /// Resource path like `.../workspaces/3/variables/4`
    pub id: Option<String>,
    /// Parent workspace path
    pub parent: Option<String>,
    /// Variable display name
    pub display_name: Option<String>,
    /// Variable type, e.g. `v` (data layer), `c` (constant), `jsm`
    pub variable_type: Option<String>,
}

/// Tagged union over all resource payloads
///
/// The inbound API deserializes items into the variant matching the batch's
/// resource type; everything downstream goes through [`ItemPayload`].
#[derive(Debug, Clone)]
pub enum ResourcePayload {
    Account(AccountPayload),
    Property(PropertyPayload),
    DataStream(DataStreamPayload),
    ConversionEvent(ConversionEventPayload),
    Container(ContainerPayload),
    Workspace(WorkspacePayload),
    Trigger(TriggerPayload),
    Variable(VariablePayload),
}

impl ResourcePayload {
    /// Deserialize one item into the payload variant for a resource type
    pub fn from_value(
        resource_type: ResourceType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match resource_type {
            ResourceType::Accounts => Self::Account(serde_json::from_value(value)?),
            ResourceType::Properties => Self::Property(serde_json::from_value(value)?),
            ResourceType::DataStreams => Self::DataStream(serde_json::from_value(value)?),
            ResourceType::ConversionEvents => Self::ConversionEvent(serde_json::from_value(value)?),
            ResourceType::Containers => Self::Container(serde_json::from_value(value)?),
            ResourceType::Workspaces => Self::Workspace(serde_json::from_value(value)?),
            ResourceType::Triggers => Self::Trigger(serde_json::from_value(value)?),
            ResourceType::Variables => Self::Variable(serde_json::from_value(value)?),
        })
    }

    fn as_payload(&self) -> &dyn ItemPayload {
        match self {
            Self::Account(p) => p,
            Self::Property(p) => p,
            Self::DataStream(p) => p,
            Self::ConversionEvent(p) => p,
            Self::Container(p) => p,
            Self::Workspace(p) => p,
            Self::Trigger(p) => p,
            Self::Variable(p) => p,
        }
    }

    fn as_payload_mut(&mut self) -> &mut dyn ItemPayload {
        match self {
            Self::Account(p) => p,
            Self::Property(p) => p,
            Self::DataStream(p) => p,
            Self::ConversionEvent(p) => p,
            Self::Container(p) => p,
            Self::Workspace(p) => p,
            Self::Trigger(p) => p,
            Self::Variable(p) => p,
        }
    }
}

impl ItemPayload for ResourcePayload {
    fn resource_type(&self) -> ResourceType {
        self.as_payload().resource_type()
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        self.as_payload().identity_key(op)
    }

    fn display_name(&self) -> String {
        self.as_payload().display_name()
    }

    fn resource_id(&self) -> Option<&str> {
        self.as_payload().resource_id()
    }

    fn normalize(&mut self) {
        self.as_payload_mut().normalize()
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        self.as_payload().validate(op)
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        self.as_payload().upstream_call(op)
    }
}

// Shared rules: updates and deletes address an existing resource by path,
// creates need a distinguishing name under the parent.
fn mutate_identity(parent: &Option<String>, id: &Option<String>, name: &Option<String>, op: OperationKind) -> IdentityKey {
    let parent = parent.clone().unwrap_or_default();
    match op {
        OperationKind::Create => IdentityKey::new(parent, name.clone().unwrap_or_default()),
        OperationKind::Update | OperationKind::Delete => IdentityKey::new(
            parent,
            id.clone().or_else(|| name.clone()).unwrap_or_default(),
        ),
    }
}

fn require_id(id: &Option<String>) -> Result<(), ValidationError> {
    validation::require("id", id.as_deref()).map(|_| ())
}

fn require_name(name: &Option<String>) -> Result<(), ValidationError> {
    let value = validation::require("displayName", name.as_deref())?;
    validation::max_len("displayName", value, MAX_NAME_LEN)
}

impl ItemPayload for AccountPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Accounts
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&None, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.region_code);
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => require_name(&self.display_name),
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::Analytics;
        let mut body = json!({ "displayName": self.display_name });
        if let Some(region) = &self.region_code {
            body["regionCode"] = json!(region);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(platform, "/v1beta/accounts", body),
            OperationKind::Update => UpstreamCall::patch(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for PropertyPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Properties
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.time_zone);
        validation::trim_opt(&mut self.currency_code);
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                if self.display_name.is_none()
                    && self.time_zone.is_none()
                    && self.currency_code.is_none()
                {
                    return Err(ValidationError::new(
                        "displayName",
                        "update requires at least one field to change",
                    ));
                }
                Ok(())
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::Analytics;
        let mut body = json!({});
        if let Some(parent) = &self.parent {
            body["parent"] = json!(parent);
        }
        if let Some(name) = &self.display_name {
            body["displayName"] = json!(name);
        }
        if let Some(tz) = &self.time_zone {
            body["timeZone"] = json!(tz);
        }
        if let Some(currency) = &self.currency_code {
            body["currencyCode"] = json!(currency);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(platform, "/v1beta/properties", body),
            OperationKind::Update => UpstreamCall::patch(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for DataStreamPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::DataStreams
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.uri);
        if let Some(stream_type) = &mut self.stream_type {
            *stream_type = stream_type.trim().to_uppercase();
        }
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)?;
                let stream_type = validation::require("streamType", self.stream_type.as_deref())?;
                validation::one_of("streamType", stream_type, STREAM_TYPES)
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::Analytics;
        let mut body = json!({ "displayName": self.display_name });
        if let Some(stream_type) = &self.stream_type {
            body["type"] = json!(stream_type);
        }
        if let Some(uri) = &self.uri {
            body["webStreamData"] = json!({ "defaultUri": uri });
        }
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/v1beta/{}/dataStreams",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::patch(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for ConversionEventPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::ConversionEvents
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        // Conversion events are identified by event name, not display name
        let parent = self.parent.clone().unwrap_or_default();
        match op {
            OperationKind::Create => {
                IdentityKey::new(parent, self.event_name.clone().unwrap_or_default())
            }
            OperationKind::Update | OperationKind::Delete => IdentityKey::new(
                parent,
                self.id
                    .clone()
                    .or_else(|| self.event_name.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    fn display_name(&self) -> String {
        self.event_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.event_name);
        if let Some(method) = &mut self.counting_method {
            *method = method.trim().to_uppercase();
        }
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                let event_name = validation::require("eventName", self.event_name.as_deref())?;
                validation::max_len("eventName", event_name, MAX_NAME_LEN)?;
                if let Some(method) = &self.counting_method {
                    validation::one_of("countingMethod", method, COUNTING_METHODS)?;
                }
                Ok(())
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                let method =
                    validation::require("countingMethod", self.counting_method.as_deref())?;
                validation::one_of("countingMethod", method, COUNTING_METHODS)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::Analytics;
        let mut body = json!({ "eventName": self.event_name });
        if let Some(method) = &self.counting_method {
            body["countingMethod"] = json!(method);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/v1beta/{}/conversionEvents",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::patch(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/v1beta/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for ContainerPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Containers
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        for context in &mut self.usage_context {
            *context = context.trim().to_lowercase();
        }
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)?;
                if self.usage_context.is_empty() {
                    return Err(ValidationError::new(
                        "usageContext",
                        "at least one usage context is required",
                    ));
                }
                for context in &self.usage_context {
                    validation::one_of("usageContext", context, USAGE_CONTEXTS)?;
                }
                Ok(())
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::TagManager;
        let body = json!({
            "name": self.display_name,
            "usageContext": self.usage_context,
        });
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/tagmanager/v2/{}/containers",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::put(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for WorkspacePayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Workspaces
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.description);
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::TagManager;
        let mut body = json!({ "name": self.display_name });
        if let Some(description) = &self.description {
            body["description"] = json!(description);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/tagmanager/v2/{}/workspaces",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::put(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for TriggerPayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Triggers
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.trigger_type);
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)?;
                validation::require("triggerType", self.trigger_type.as_deref()).map(|_| ())
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::TagManager;
        let mut body = json!({ "name": self.display_name });
        if let Some(trigger_type) = &self.trigger_type {
            body["type"] = json!(trigger_type);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/tagmanager/v2/{}/triggers",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::put(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}

impl ItemPayload for VariablePayload {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Variables
    }

    fn identity_key(&self, op: OperationKind) -> IdentityKey {
        mutate_identity(&self.parent, &self.id, &self.display_name, op)
    }

    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    fn resource_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn normalize(&mut self) {
        validation::trim_opt(&mut self.id);
        validation::trim_opt(&mut self.parent);
        validation::trim_opt(&mut self.display_name);
        validation::trim_opt(&mut self.variable_type);
    }

    fn validate(&self, op: OperationKind) -> Result<(), ValidationError> {
        match op {
            OperationKind::Create => {
                validation::require("parent", self.parent.as_deref())?;
                require_name(&self.display_name)?;
                validation::require("variableType", self.variable_type.as_deref()).map(|_| ())
            }
            OperationKind::Update => {
                require_id(&self.id)?;
                require_name(&self.display_name)
            }
            OperationKind::Delete => require_id(&self.id),
        }
    }

    fn upstream_call(&self, op: OperationKind) -> UpstreamCall {
        let platform = Platform::TagManager;
        let mut body = json!({ "name": self.display_name });
        if let Some(variable_type) = &self.variable_type {
            body["type"] = json!(variable_type);
        }
        match op {
            OperationKind::Create => UpstreamCall::post(
                platform,
                format!(
                    "/tagmanager/v2/{}/variables",
                    self.parent.as_deref().unwrap_or_default()
                ),
                body,
            ),
            OperationKind::Update => UpstreamCall::put(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
                body,
            ),
            OperationKind::Delete => UpstreamCall::delete(
                platform,
                format!("/tagmanager/v2/{}", self.id.as_deref().unwrap_or_default()),
            ),
        }
    }
}
