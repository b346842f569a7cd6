//! FortiManager Provider implementation
//!
//! This module contains the main provider implementation that communicates
//! with the FortiManager JSON-RPC API to manage device and ADOM objects.

use std::collections::HashMap;

use fmg_core::convert::{SortMode, expand, flatten, forti_api_patch, sort_table};
use fmg_core::provider::{ProviderError, ProviderResult};
use fmg_core::resource::{Resource, ResourceId, State, Value};
use fmg_core::resource_data::ResourceData;
use fmg_core::schema::{AttributeType, ResourceSchema};
use log::{debug, warn};
use serde_json::Value as Json;

use crate::client::{FortiClient, RpcMethod};
use crate::config::{ProviderConfig, ScopeType, WorkspaceMode};
use crate::error::Error;
use crate::schemas::generated::{FmgSchemaConfig, Identity, Scope, is_meta_attribute};
use crate::utils::{object_url, replace_path_params};

/// Get the FmgSchemaConfig for a resource type
fn get_schema_config(id: &ResourceId) -> ProviderResult<FmgSchemaConfig> {
    crate::schemas::find_config(&id.resource_type).ok_or_else(|| {
        ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
            .for_resource(id.clone())
    })
}

/// FortiManager Provider
pub struct FmgProvider {
    client: FortiClient,
    config: ProviderConfig,
}

impl FmgProvider {
    /// Create a provider; no request is made until [`connect`](Self::connect)
    pub fn new(config: ProviderConfig) -> Result<Self, Error> {
        let client = FortiClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Create a provider around an existing client
    pub fn with_client(client: FortiClient, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Log in unless sessions are opened per operation
    pub async fn connect(&self) -> Result<(), Error> {
        if self.config.clean_session {
            return Ok(());
        }
        self.client.login().await
    }

    /// Log out of the session opened by [`connect`](Self::connect)
    pub async fn close(&self) -> Result<(), Error> {
        self.client.logout().await
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Attributes given through `import_options` ("device_name=FGT1", ...)
    pub fn import_attributes(&self) -> HashMap<String, Value> {
        self.config
            .import_options
            .iter()
            .filter_map(|opt| opt.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), Value::String(v.trim().to_string())))
            .collect()
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource. A missing object yields a not-found state.
    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
        attributes: &HashMap<String, Value>,
    ) -> ProviderResult<State> {
        let config = get_schema_config(id)?;
        let mut data = seed_data(&config.schema, id, attributes);

        let identifier = match (identifier, config.identity) {
            (Some(identifier), _) => identifier.to_string(),
            (None, Identity::Singleton(name)) => name.to_string(),
            (None, Identity::Key { attribute }) => match data.get_ok(attribute) {
                Some(key) => key.to_key_string(),
                None => return Ok(State::not_found(id.clone())),
            },
        };
        data.set_id(identifier);

        self.begin_operation().await.map_err(|e| {
            ProviderError::new(format!(
                "Error reading {} resource: {}",
                config.display_name, e
            ))
            .for_resource(id.clone())
        })?;
        let result = self.refresh(&config, &mut data).await;
        self.end_operation().await;

        result.map_err(|e| e.for_resource(id.clone()))?;
        Ok(data.into_state(id.clone()))
    }

    /// Create a resource and read it back
    pub async fn create_resource(&self, resource: Resource) -> ProviderResult<State> {
        let id = resource.id.clone();
        let config = get_schema_config(&id)?;
        let mut data = ResourceData::from_resource(&config.schema, &resource);
        let fail = |e: String| {
            ProviderError::new(format!(
                "Error creating {} resource: {}",
                config.display_name, e
            ))
            .for_resource(id.clone())
        };

        let identifier = identifier_of(&config, &data).map_err(fail)?;
        let params = self.path_params(&config, &data).map_err(fail)?;
        let url = replace_path_params(config.api_path, &params).map_err(fail)?;
        let (method, url) = match config.identity {
            Identity::Singleton(_) => (RpcMethod::Set, url),
            Identity::Key { .. } => (RpcMethod::Add, url),
        };
        let payload = expand_object(&config.schema, &data);

        debug!("create {} at {}", id, url);
        self.begin_operation()
            .await
            .map_err(|e| fail(e.to_string()))?;
        let result = self
            .mutate(self.workspace_adom(&config, &data), method, &url, Some(&payload))
            .await;
        if let Err(e) = result {
            self.end_operation().await;
            return Err(fail(e.to_string()));
        }

        data.set_id(identifier);
        let refreshed = self.refresh(&config, &mut data).await;
        self.end_operation().await;

        refreshed.map_err(|e| e.for_resource(id.clone()))?;
        Ok(data.into_state(id))
    }

    /// Update a resource in place and read it back
    pub async fn update_resource(
        &self,
        id: ResourceId,
        identifier: &str,
        to: Resource,
    ) -> ProviderResult<State> {
        let config = get_schema_config(&id)?;
        let mut data = ResourceData::from_resource(&config.schema, &to);
        data.set_id(identifier);
        let fail = |e: String| {
            ProviderError::new(format!(
                "Error updating {} resource: {}",
                config.display_name, e
            ))
            .for_resource(id.clone())
        };

        let params = self.path_params(&config, &data).map_err(fail)?;
        let url = replace_path_params(config.api_path, &params).map_err(fail)?;
        let (method, url) = match config.identity {
            Identity::Singleton(_) => (RpcMethod::Set, url),
            Identity::Key { .. } => (RpcMethod::Update, object_url(&url, identifier)),
        };
        let payload = expand_object(&config.schema, &data);

        debug!("update {} at {}", id, url);
        self.begin_operation()
            .await
            .map_err(|e| fail(e.to_string()))?;
        let result = self
            .mutate(self.workspace_adom(&config, &data), method, &url, Some(&payload))
            .await;
        if let Err(e) = result {
            self.end_operation().await;
            return Err(fail(e.to_string()));
        }

        let refreshed = self.refresh(&config, &mut data).await;
        self.end_operation().await;

        refreshed.map_err(|e| e.for_resource(id.clone()))?;
        Ok(data.into_state(id))
    }

    /// Delete a resource
    pub async fn delete_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        attributes: &HashMap<String, Value>,
    ) -> ProviderResult<()> {
        let config = get_schema_config(id)?;
        let mut data = seed_data(&config.schema, id, attributes);
        let fail = |e: String| {
            ProviderError::new(format!(
                "Error deleting {} resource: {}",
                config.display_name, e
            ))
            .for_resource(id.clone())
        };

        let params = self.path_params(&config, &data).map_err(fail)?;
        let url = replace_path_params(config.api_path, &params).map_err(fail)?;
        let url = match config.identity {
            Identity::Singleton(_) => url,
            Identity::Key { .. } => object_url(&url, identifier),
        };

        debug!("delete {} at {}", id, url);
        self.begin_operation()
            .await
            .map_err(|e| fail(e.to_string()))?;
        let result = self
            .mutate(self.workspace_adom(&config, &data), RpcMethod::Delete, &url, None)
            .await;
        self.end_operation().await;
        result.map_err(|e| fail(e.to_string()))?;

        data.clear_id();
        Ok(())
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Re-read the object behind `data` and copy every field into it.
    ///
    /// A missing object clears the ID.
    async fn refresh(
        &self,
        config: &FmgSchemaConfig,
        data: &mut ResourceData<'_>,
    ) -> ProviderResult<()> {
        let fail = |e: String| {
            ProviderError::new(format!(
                "Error reading {} resource: {}",
                config.display_name, e
            ))
        };

        let Some(identifier) = data.id().map(str::to_string) else {
            return Ok(());
        };
        let params = self.path_params(config, data).map_err(fail)?;
        let url = replace_path_params(config.api_path, &params).map_err(fail)?;
        let url = match config.identity {
            Identity::Singleton(_) => url,
            Identity::Key { .. } => object_url(&url, &identifier),
        };

        let object = match self.client.read(&url).await {
            Ok(Some(object)) => object,
            Ok(None) => {
                debug!("{} not found, clearing ID", url);
                data.clear_id();
                return Ok(());
            }
            Err(e) => return Err(fail(e.to_string())),
        };

        let mode = data
            .get_str("dynamic_sort_subtable")
            .and_then(SortMode::parse)
            .unwrap_or_default();
        refresh_object(data, &object, mode).map_err(ProviderError::new)
    }

    /// Issue a mutating call, wrapped in an ADOM lock when workspace mode is on
    async fn mutate(
        &self,
        adom: Option<String>,
        method: RpcMethod,
        url: &str,
        payload: Option<&Json>,
    ) -> Result<(), Error> {
        let Some(adom) = adom else {
            return self.send(method, url, payload).await;
        };

        self.client.lock_adom(&adom).await?;
        let result = match self.send(method, url, payload).await {
            Ok(()) => self.client.commit_adom(&adom).await,
            Err(e) => Err(e),
        };
        let unlocked = self.client.unlock_adom(&adom).await;
        result.and(unlocked)
    }

    async fn send(&self, method: RpcMethod, url: &str, payload: Option<&Json>) -> Result<(), Error> {
        match (method, payload) {
            (RpcMethod::Delete, _) => self.client.delete(url).await,
            (_, Some(data)) => self.client.create_update(method, url, data).await.map(|_| ()),
            (_, None) => self.client.call(method, url, None).await.map(|_| ()),
        }
    }

    async fn begin_operation(&self) -> Result<(), Error> {
        if self.config.clean_session {
            self.client.login().await?;
        }
        Ok(())
    }

    async fn end_operation(&self) {
        if self.config.clean_session
            && let Err(e) = self.client.logout().await
        {
            warn!("logout failed: {}", e);
        }
    }

    /// Resolve URL template parameters: resource data first, then provider config
    fn path_params(
        &self,
        config: &FmgSchemaConfig,
        data: &ResourceData<'_>,
    ) -> Result<HashMap<&'static str, String>, String> {
        let mut params = HashMap::new();
        match config.scope {
            Scope::Device | Scope::DeviceVdom => {
                let device = data
                    .get_str("device_name")
                    .map(str::to_string)
                    .or_else(|| self.config.device_name.clone())
                    .ok_or_else(|| "Parameter device_name is missing".to_string())?;
                params.insert("device", device);

                if config.scope == Scope::DeviceVdom {
                    let vdom = data
                        .get_str("device_vdom")
                        .map(str::to_string)
                        .unwrap_or_else(|| self.config.vdom.clone());
                    params.insert("vdom", vdom);
                }
            }
            Scope::Adom => {
                params.insert("adom", self.adom_param(data)?);
            }
        }
        Ok(params)
    }

    fn scope_type(&self, data: &ResourceData<'_>) -> Result<ScopeType, String> {
        let scope = match data.get_str("scopetype") {
            Some(s) => ScopeType::parse(s).map_err(|e| e.to_string())?,
            None => ScopeType::Inherit,
        };
        Ok(match scope {
            ScopeType::Inherit => self.config.effective_scope(),
            other => other,
        })
    }

    fn adom_name<'a>(&'a self, data: &'a ResourceData<'_>) -> &'a str {
        data.get_str("adom").unwrap_or(&self.config.adom)
    }

    /// `{adom}` value: "global" or "adom/<name>"
    fn adom_param(&self, data: &ResourceData<'_>) -> Result<String, String> {
        Ok(match self.scope_type(data)? {
            ScopeType::Global => "global".to_string(),
            _ => format!("adom/{}", self.adom_name(data)),
        })
    }

    /// ADOM to lock around a change, if workspace mode is on
    fn workspace_adom(&self, config: &FmgSchemaConfig, data: &ResourceData<'_>) -> Option<String> {
        if self.config.workspace_mode != WorkspaceMode::Normal {
            return None;
        }
        match config.scope {
            Scope::Adom => match self.scope_type(data) {
                Ok(ScopeType::Global) => Some("global".to_string()),
                _ => Some(self.adom_name(data).to_string()),
            },
            Scope::Device | Scope::DeviceVdom => Some(self.config.adom.clone()),
        }
    }
}

/// Resource data seeded with already known attributes
fn seed_data<'a>(
    schema: &'a ResourceSchema,
    id: &ResourceId,
    attributes: &HashMap<String, Value>,
) -> ResourceData<'a> {
    let resource = Resource {
        id: id.clone(),
        attributes: attributes.clone(),
    };
    ResourceData::from_resource(schema, &resource)
}

/// Remote ID: the fixed singleton name or the key attribute's value
fn identifier_of(config: &FmgSchemaConfig, data: &ResourceData<'_>) -> Result<String, String> {
    match config.identity {
        Identity::Singleton(name) => Ok(name.to_string()),
        Identity::Key { attribute } => data
            .get_ok(attribute)
            .map(Value::to_key_string)
            .ok_or_else(|| format!("{} is required", attribute)),
    }
}

/// Build the request payload: every configured field under its API name
pub(crate) fn expand_object(schema: &ResourceSchema, data: &ResourceData<'_>) -> Json {
    let mut names: Vec<&String> = data.attributes().keys().collect();
    names.sort();

    let mut payload = serde_json::Map::new();
    for name in names {
        if is_meta_attribute(name) {
            continue;
        }
        let Some(attr) = schema.get(name) else {
            continue;
        };
        if attr.is_read_only() {
            continue;
        }
        if let Some(value) = data.get(name)
            && let Some(v) = expand(value, &attr.attr_type)
        {
            payload.insert(attr.api_name(), v);
        }
    }
    Json::Object(payload)
}

/// Copy every field of an API object into the resource data.
///
/// A value that does not fit its attribute is retried through
/// [`forti_api_patch`]; an empty array for a scalar leaves the field unset.
/// Fields the object does not carry are cleared, except meta and sensitive
/// attributes, which the API never reports.
pub(crate) fn refresh_object(
    data: &mut ResourceData<'_>,
    object: &Json,
    mode: SortMode,
) -> Result<(), String> {
    let schema = data.schema();
    let mut names: Vec<&String> = schema.attributes.keys().collect();
    names.sort();

    for name in names {
        if is_meta_attribute(name) {
            continue;
        }
        let Some(attr) = schema.get(name) else {
            continue;
        };
        if attr.sensitive {
            continue;
        }
        let Some(raw) = object.get(attr.api_name()) else {
            data.remove(name);
            continue;
        };

        let Some(mut value) = flatten(raw, &attr.attr_type) else {
            if raw.is_number() {
                return Err(format!("Error reading {}: {} is not an integer", name, raw));
            }
            data.remove(name);
            continue;
        };
        sort_value(&mut value, &attr.attr_type, mode);

        if let Err(err) = data.set(name, value) {
            match forti_api_patch(raw, &attr.attr_type) {
                Some(mut patched) => {
                    sort_value(&mut patched, &attr.attr_type, mode);
                    data.set(name, patched)
                        .map_err(|e| format!("Error reading {}: {}", name, e))?;
                }
                None if raw.as_array().is_some_and(|a| a.is_empty()) => {
                    data.remove(name);
                }
                None => return Err(format!("Error reading {}: {}", name, err)),
            }
        }
    }
    Ok(())
}

fn sort_value(value: &mut Value, attr_type: &AttributeType, mode: SortMode) {
    if let (AttributeType::Block(block), Value::List(rows)) = (attr_type, value) {
        sort_table(rows, block, mode);
    }
}
