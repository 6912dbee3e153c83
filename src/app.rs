//! Application root: builds the store, registers modules and mounts the
//! root component on a host element.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::config::{mount_element_id, AppConfig};
use crate::modules::{self, foo};
use crate::store::{MutationLogger, Store, StoreError, StoreHandle, StoreOptions};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid mount point '{0}'")]
    InvalidMountPoint(String),

    #[error("Mount point '#{0}' not found in host")]
    MountPointNotFound(String),
}

/// The environment the application is attached to.
pub trait Host {
    fn has_element(&self, id: &str) -> bool;
}

/// Host without a document; every mount point resolves.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessHost;

impl Host for HeadlessHost {
    fn has_element(&self, _id: &str) -> bool {
        true
    }
}

/// Host backed by a fixed set of element ids.
#[derive(Debug, Default, Clone)]
pub struct DocumentHost {
    element_ids: HashSet<String>,
}

impl DocumentHost {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            element_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Host for DocumentHost {
    fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }
}

/// Root UI collaborator bound to the store.
///
/// Reads go through the handle; writes only through mutations.
#[derive(Clone)]
pub struct RootComponent {
    store: StoreHandle,
}

impl RootComponent {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn bars(&self) -> Result<Vec<String>, StoreError> {
        self.store
            .module_state::<foo::FooState>(foo::NAME)
            .map(|state| state.bars)
    }

    pub fn add_bar(&self, bar: &str) -> Result<(), StoreError> {
        self.store
            .dispatch_mutation(foo::NAME, foo::ADD_BAR, Value::String(bar.to_string()))
    }

    pub fn remove_bar(&self, bar: &str) -> Result<(), StoreError> {
        self.store
            .dispatch_mutation(foo::NAME, foo::REMOVE_BAR, Value::String(bar.to_string()))
    }

    pub fn commit(&self, mutation_type: &str, payload: Value) -> Result<(), StoreError> {
        self.store.commit(mutation_type, payload)
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }
}

/// Application built but not yet attached to a host.
pub struct App {
    root: RootComponent,
}

impl App {
    /// Run the startup sequence: create the store, register every module
    /// and bind the root component.
    ///
    /// # Errors
    /// Any registration error aborts startup.
    pub fn bootstrap(config: &AppConfig) -> Result<Self, AppError> {
        let mut store = Store::initialize(StoreOptions::default().strict(config.store.strict))?;
        modules::register_all(&mut store)?;

        if config.store.log_mutations {
            store.subscribe(MutationLogger);
        }

        tracing::info!(modules = ?store.module_names(), "Application bootstrapped");
        Ok(Self {
            root: RootComponent::new(StoreHandle::new(store)),
        })
    }

    pub fn root(&self) -> &RootComponent {
        &self.root
    }

    /// Attach to `mount_point` (`"#app"` or `"app"`) in `host`.
    pub fn mount<H: Host>(self, host: &H, mount_point: &str) -> Result<MountedApp, AppError> {
        let element_id = mount_element_id(mount_point)
            .ok_or_else(|| AppError::InvalidMountPoint(mount_point.to_string()))?;
        if !host.has_element(element_id) {
            return Err(AppError::MountPointNotFound(element_id.to_string()));
        }

        tracing::info!(element = %element_id, "Application mounted");
        Ok(MountedApp {
            element_id: element_id.to_string(),
            root: self.root,
        })
    }
}

/// Application attached to a host element.
pub struct MountedApp {
    element_id: String,
    root: RootComponent,
}

impl MountedApp {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn root(&self) -> &RootComponent {
        &self.root
    }

    pub fn store(&self) -> &StoreHandle {
        self.root.store()
    }
}
