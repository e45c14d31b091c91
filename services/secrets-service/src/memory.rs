// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! In-memory controller
//!
//! Keeps apps and secrets in a map behind a `RwLock`. Nothing is persisted;
//! this exists so the service can run standalone (optionally preloaded from
//! a seed file) and so the HTTP surface can be tested against real rules.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use secrets_api::{
    App, AppList, BadRequest, Conflict, CreateAppRequest, Forbidden, Health, NotFound,
    PutSecretRequest, Secret, SecretList, SecretVersion, Timestamp, Unprocessable, Uuid,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::controller::{
    CallContext, Controller, CreateAppInput, DeleteAppInput, DeleteSecretInput, GetAppInput,
    GetSecretInput, GetSecretVersionInput, ListAppsInput, ListSecretVersionsInput,
    ListSecretsInput, PutSecretInput, PutSecretOutput, SearchSecretsInput, UpdateAppInput,
};

/// Largest accepted secret value, in bytes
pub const MAX_SECRET_VALUE_BYTES: usize = 64 * 1024;

/// Longest accepted secret key
pub const MAX_SECRET_KEY_LEN: usize = 128;

// ============================================================================
// Seed data
// ============================================================================

/// Apps and secrets to preload, as read from a seed file
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub apps: Vec<SeedApp>,
}

#[derive(Debug, Deserialize)]
pub struct SeedApp {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub secrets: Vec<SeedSecret>,
}

#[derive(Debug, Deserialize)]
pub struct SeedSecret {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub write_only: bool,
}

impl Seed {
    /// Load a seed file (JSON)
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }
}

// ============================================================================
// State
// ============================================================================

struct StoredVersion {
    version: u32,
    value: String,
    created_at: Timestamp,
}

struct StoredSecret {
    description: Option<String>,
    write_only: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Oldest first; never empty
    versions: Vec<StoredVersion>,
}

impl StoredSecret {
    fn latest(&self) -> &StoredVersion {
        // versions is never empty: a secret is created with its first version
        &self.versions[self.versions.len() - 1]
    }

    fn version(&self, version: u32) -> Option<&StoredVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    fn to_secret(&self, key: &str, selected: &StoredVersion, include_value: bool) -> Secret {
        Secret {
            key: key.to_string(),
            value: (include_value && !self.write_only).then(|| selected.value.clone()),
            description: self.description.clone(),
            version: selected.version,
            write_only: self.write_only,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn to_version(&self, stored: &StoredVersion) -> SecretVersion {
        SecretVersion {
            version: stored.version,
            value: (!self.write_only).then(|| stored.value.clone()),
            created_at: stored.created_at,
        }
    }
}

struct StoredApp {
    id: Uuid,
    name: String,
    description: Option<String>,
    locked: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    secrets: BTreeMap<String, StoredSecret>,
}

impl StoredApp {
    fn to_app(&self) -> App {
        App {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            locked: self.locked,
            secret_count: self.secrets.len() as u64,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn secret(&self, key: &str) -> Result<&StoredSecret> {
        self.secrets.get(key).ok_or_else(|| {
            NotFound::new(format!("secret {} not found in app {}", key, self.name)).into()
        })
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(Forbidden::new(format!("app {} is locked", self.name)).into());
        }
        Ok(())
    }
}

#[derive(Default)]
struct State {
    apps: BTreeMap<Uuid, StoredApp>,
}

impl State {
    fn app(&self, app_id: Uuid) -> Result<&StoredApp> {
        self.apps
            .get(&app_id)
            .ok_or_else(|| NotFound::new(format!("app {} not found", app_id)).into())
    }

    fn app_mut(&mut self, app_id: Uuid) -> Result<&mut StoredApp> {
        self.apps
            .get_mut(&app_id)
            .ok_or_else(|| NotFound::new(format!("app {} not found", app_id)).into())
    }

    fn name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.apps
            .values()
            .any(|app| app.name == name && Some(app.id) != except)
    }

    fn list_apps(&self, input: ListAppsInput) -> Result<AppList> {
        let mut apps: Vec<App> = self.apps.values().map(StoredApp::to_app).collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name));

        let (apps, next_starting_after) = paginate(
            apps,
            |app| &app.name,
            input.starting_after.as_deref(),
            input.limit,
        )?;

        Ok(AppList {
            apps,
            next_starting_after,
        })
    }

    fn create_app(&mut self, request: CreateAppRequest) -> Result<App> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(BadRequest::new("app name must not be empty").into());
        }
        if self.name_taken(name, None) {
            return Err(Conflict::new(format!("app name {} is already taken", name)).into());
        }

        let now = Utc::now();
        let app = StoredApp {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: request.description,
            locked: request.locked,
            created_at: now,
            updated_at: now,
            secrets: BTreeMap::new(),
        };
        let created = app.to_app();
        self.apps.insert(app.id, app);

        Ok(created)
    }

    fn update_app(&mut self, input: UpdateAppInput) -> Result<App> {
        self.app(input.app_id)?;
        let body = input.body;

        let name = match body.name.as_deref().map(str::trim) {
            Some("") => return Err(BadRequest::new("app name must not be empty").into()),
            Some(name) => {
                if self.name_taken(name, Some(input.app_id)) {
                    return Err(
                        BadRequest::new(format!("app name {} is already taken", name)).into(),
                    );
                }
                Some(name.to_string())
            }
            None => None,
        };

        let app = self.app_mut(input.app_id)?;

        let only_unlocks =
            body.locked == Some(false) && name.is_none() && body.description.is_none();
        if app.locked && !only_unlocks {
            return Err(Forbidden::new(format!("app {} is locked", app.name)).into());
        }

        if let Some(name) = name {
            app.name = name;
        }
        if let Some(description) = body.description {
            app.description = Some(description);
        }
        if let Some(locked) = body.locked {
            app.locked = locked;
        }
        app.updated_at = Utc::now();

        Ok(app.to_app())
    }

    fn delete_app(&mut self, input: DeleteAppInput) -> Result<()> {
        let app = self.app(input.app_id)?;
        app.ensure_unlocked()?;
        if !app.secrets.is_empty() && !input.force {
            return Err(Forbidden::new(format!(
                "app {} still has {} secrets; pass force=true to delete it",
                app.name,
                app.secrets.len()
            ))
            .into());
        }

        self.apps.remove(&input.app_id);
        Ok(())
    }

    fn list_secrets(&self, input: ListSecretsInput) -> Result<SecretList> {
        let app = self.app(input.app_id)?;
        let secrets = app
            .secrets
            .iter()
            .map(|(key, stored)| stored.to_secret(key, stored.latest(), input.include_values))
            .collect();

        let (secrets, next_starting_after) = paginate(
            secrets,
            |secret| &secret.key,
            input.starting_after.as_deref(),
            input.limit,
        )?;

        Ok(SecretList {
            secrets,
            next_starting_after,
        })
    }

    fn search_secrets(&self, input: SearchSecretsInput) -> Result<SecretList> {
        let app = self.app(input.app_id)?;
        let needle = input.q.to_lowercase();

        let secrets = app
            .secrets
            .iter()
            .filter(|(key, stored)| {
                key.to_lowercase().contains(&needle)
                    || stored
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .map(|(key, stored)| stored.to_secret(key, stored.latest(), input.include_values))
            .collect();

        let (secrets, next_starting_after) = paginate(
            secrets,
            |secret| &secret.key,
            input.starting_after.as_deref(),
            input.limit,
        )?;

        Ok(SecretList {
            secrets,
            next_starting_after,
        })
    }

    fn get_secret(&self, input: GetSecretInput) -> Result<Secret> {
        let app = self.app(input.app_id)?;
        let stored = app.secret(&input.key)?;

        if stored.write_only {
            return Err(Forbidden::new(format!("secret {} is write-only", input.key)).into());
        }

        let selected = match input.version {
            Some(version) => stored.version(version).ok_or_else(|| {
                NotFound::new(format!("secret {} has no version {}", input.key, version))
            })?,
            None => stored.latest(),
        };

        Ok(stored.to_secret(&input.key, selected, true))
    }

    fn put_secret(&mut self, input: PutSecretInput) -> Result<PutSecretOutput> {
        let PutSecretInput { app_id, key, body } = input;
        validate_put(&key, &body)?;

        let app = self.app_mut(app_id)?;
        app.ensure_unlocked()?;

        let now = Utc::now();
        let output = match app.secrets.get_mut(&key) {
            Some(stored) => {
                let version = stored.latest().version + 1;
                stored.versions.push(StoredVersion {
                    version,
                    value: body.value,
                    created_at: now,
                });
                if body.description.is_some() {
                    stored.description = body.description;
                }
                if let Some(write_only) = body.write_only {
                    // Once write-only, a secret stays write-only
                    stored.write_only |= write_only;
                }
                stored.updated_at = now;
                PutSecretOutput::Updated(stored.to_secret(&key, stored.latest(), true))
            }
            None => {
                let stored = StoredSecret {
                    description: body.description,
                    write_only: body.write_only.unwrap_or(false),
                    created_at: now,
                    updated_at: now,
                    versions: vec![StoredVersion {
                        version: 1,
                        value: body.value,
                        created_at: now,
                    }],
                };
                let secret = stored.to_secret(&key, stored.latest(), true);
                app.secrets.insert(key, stored);
                PutSecretOutput::Created(secret)
            }
        };
        app.updated_at = now;

        Ok(output)
    }

    fn delete_secret(&mut self, input: DeleteSecretInput) -> Result<()> {
        let app = self.app_mut(input.app_id)?;
        app.ensure_unlocked()?;
        app.secret(&input.key)?;

        app.secrets.remove(&input.key);
        app.updated_at = Utc::now();
        Ok(())
    }

    fn list_secret_versions(&self, input: ListSecretVersionsInput) -> Result<Vec<SecretVersion>> {
        let stored = self.app(input.app_id)?.secret(&input.key)?;
        Ok(stored
            .versions
            .iter()
            .rev()
            .map(|v| stored.to_version(v))
            .collect())
    }

    fn get_secret_version(&self, input: GetSecretVersionInput) -> Result<SecretVersion> {
        let stored = self.app(input.app_id)?.secret(&input.key)?;
        let version = stored.version(input.version).ok_or_else(|| {
            NotFound::new(format!(
                "secret {} has no version {}",
                input.key, input.version
            ))
        })?;
        Ok(stored.to_version(version))
    }
}

/// Check a secret write before touching state
fn validate_put(key: &str, body: &PutSecretRequest) -> Result<()> {
    if key.is_empty()
        || key.len() > MAX_SECRET_KEY_LEN
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(Unprocessable::new(format!(
            "secret key {:?} must be 1-{} characters of [A-Za-z0-9_.-]",
            key, MAX_SECRET_KEY_LEN
        ))
        .into());
    }
    if body.value.is_empty() {
        return Err(BadRequest::new("secret value must not be empty").into());
    }
    if body.value.len() > MAX_SECRET_VALUE_BYTES {
        return Err(Unprocessable::new(format!(
            "secret value is {} bytes; the limit is {}",
            body.value.len(),
            MAX_SECRET_VALUE_BYTES
        ))
        .into());
    }
    Ok(())
}

/// Cut one page out of `items`, which must already be sorted by `key`
///
/// `starting_after` names the last item of the previous page. Returns the
/// page and, when more items follow, the marker for the next page.
fn paginate<T>(
    items: Vec<T>,
    key: impl Fn(&T) -> &String,
    starting_after: Option<&str>,
    limit: usize,
) -> Result<(Vec<T>, Option<String>)> {
    let start = match starting_after {
        None => 0,
        Some(marker) => {
            items
                .iter()
                .position(|item| key(item) == marker)
                .ok_or_else(|| {
                    BadRequest::new(format!("unknown starting_after marker {}", marker))
                })?
                + 1
        }
    };

    let mut page: Vec<T> = items.into_iter().skip(start).collect();
    let more = page.len() > limit;
    page.truncate(limit);

    let next = if more {
        page.last().map(|item| key(item).clone())
    } else {
        None
    };

    Ok((page, next))
}

// ============================================================================
// Controller
// ============================================================================

/// Controller that keeps everything in process memory
#[derive(Default)]
pub struct MemoryController {
    state: RwLock<State>,
}

impl MemoryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller preloaded with `seed`
    ///
    /// Seed entries go through the same checks as API calls, so a seed that
    /// names an app twice or carries an invalid key is rejected.
    pub fn from_seed(seed: Seed) -> Result<Self> {
        let mut state = State::default();

        for seed_app in seed.apps {
            let app = state
                .create_app(CreateAppRequest {
                    name: seed_app.name.clone(),
                    description: seed_app.description,
                    locked: false,
                })
                .with_context(|| format!("Invalid seed app {}", seed_app.name))?;

            for secret in seed_app.secrets {
                state
                    .put_secret(PutSecretInput {
                        app_id: app.id,
                        key: secret.key.clone(),
                        body: PutSecretRequest {
                            value: secret.value,
                            description: secret.description,
                            write_only: Some(secret.write_only),
                        },
                    })
                    .with_context(|| {
                        format!("Invalid seed secret {} in app {}", secret.key, seed_app.name)
                    })?;
            }

            // Lock last so the app's own secrets can be loaded
            if seed_app.locked {
                state.app_mut(app.id)?.locked = true;
            }
        }

        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl Controller for MemoryController {
    async fn health_check(&self, _call: &CallContext) -> Result<Health> {
        Ok(Health {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    async fn list_apps(&self, _call: &CallContext, input: ListAppsInput) -> Result<AppList> {
        self.state.read().await.list_apps(input)
    }

    async fn create_app(&self, _call: &CallContext, input: CreateAppInput) -> Result<App> {
        let app = self.state.write().await.create_app(input.body)?;
        tracing::info!(app_id = %app.id, name = %app.name, "Created app");
        Ok(app)
    }

    async fn get_app(&self, _call: &CallContext, input: GetAppInput) -> Result<App> {
        self.state
            .read()
            .await
            .app(input.app_id)
            .map(StoredApp::to_app)
    }

    async fn update_app(&self, _call: &CallContext, input: UpdateAppInput) -> Result<App> {
        self.state.write().await.update_app(input)
    }

    async fn delete_app(&self, _call: &CallContext, input: DeleteAppInput) -> Result<()> {
        let app_id = input.app_id;
        self.state.write().await.delete_app(input)?;
        tracing::info!(app_id = %app_id, "Deleted app");
        Ok(())
    }

    async fn list_secrets(
        &self,
        _call: &CallContext,
        input: ListSecretsInput,
    ) -> Result<SecretList> {
        self.state.read().await.list_secrets(input)
    }

    async fn search_secrets(
        &self,
        _call: &CallContext,
        input: SearchSecretsInput,
    ) -> Result<SecretList> {
        self.state.read().await.search_secrets(input)
    }

    async fn get_secret(&self, _call: &CallContext, input: GetSecretInput) -> Result<Secret> {
        self.state.read().await.get_secret(input)
    }

    async fn put_secret(
        &self,
        _call: &CallContext,
        input: PutSecretInput,
    ) -> Result<PutSecretOutput> {
        self.state.write().await.put_secret(input)
    }

    async fn delete_secret(&self, _call: &CallContext, input: DeleteSecretInput) -> Result<()> {
        self.state.write().await.delete_secret(input)
    }

    async fn list_secret_versions(
        &self,
        _call: &CallContext,
        input: ListSecretVersionsInput,
    ) -> Result<Vec<SecretVersion>> {
        self.state.read().await.list_secret_versions(input)
    }

    async fn get_secret_version(
        &self,
        _call: &CallContext,
        input: GetSecretVersionInput,
    ) -> Result<SecretVersion> {
        self.state.read().await.get_secret_version(input)
    }
}

// ============================================================================
// Tests
// ============================================================================
