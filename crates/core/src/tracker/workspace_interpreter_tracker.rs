use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::{
    interfaces::{InterpreterChangeEvent, InterpreterService, WorkspaceService},
    types::Environment,
    utils::paths::{are_paths_same, workspace_folder_identifier},
};

type InterpreterMap = HashMap<String, Option<PathBuf>>;

/// Tracks the active interpreter of every workspace folder.
///
/// The map is keyed by workspace folder identifier and refreshed whenever the
/// interpreter service reports a change. A failed lookup for one folder never
/// stops the others from updating.
pub struct WorkspaceInterpreterTracker {
    interpreters: Arc<dyn InterpreterService>,
    workspace: Arc<dyn WorkspaceService>,
    active: Arc<RwLock<InterpreterMap>>,
    enabled: bool,
    listener: Mutex<Option<JoinHandle<()>>>,
    /// Serializes `activate` calls
    activation: tokio::sync::Mutex<()>,
}

impl WorkspaceInterpreterTracker {
    pub fn new(
        interpreters: Arc<dyn InterpreterService>,
        workspace: Arc<dyn WorkspaceService>,
        enabled: bool,
    ) -> Self {
        Self {
            interpreters,
            workspace,
            active: Arc::new(RwLock::new(HashMap::new())),
            enabled,
            listener: Mutex::new(None),
            activation: tokio::sync::Mutex::new(()),
        }
    }

    /// Start listening for interpreter changes. Calling it twice is a no-op.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn activate(&self) {
        if !self.enabled {
            tracing::debug!("Interpreter tracking disabled");
            return;
        }

        let _activation = self.activation.lock().await;
        if self.is_active() {
            return;
        }

        // Changes that arrive during the initial refresh queue up in `changes`
        // and are applied by the listener after it
        let changes = self.interpreters.subscribe();
        refresh(&*self.interpreters, &*self.workspace, &self.active).await;

        let handle = tokio::spawn(listen(
            changes,
            Arc::clone(&self.interpreters),
            Arc::clone(&self.workspace),
            Arc::clone(&self.active),
        ));
        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Stop listening. The last known interpreters stay available.
    pub fn deactivate(&self) {
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Re-resolve the active interpreter of every workspace folder now
    pub async fn refresh(&self) {
        refresh(&*self.interpreters, &*self.workspace, &self.active).await;
    }

    /// Whether `interpreter` is the active one for the folder owning `resource`
    pub fn is_active_workspace_interpreter(
        &self,
        resource: Option<&Path>,
        interpreter: Option<&Environment>,
    ) -> bool {
        let Some(interpreter) = interpreter else {
            return false;
        };

        let folder = resource.and_then(|r| self.workspace.owning_folder(r));
        let key = workspace_folder_identifier(folder.as_ref().map(|f| f.path.as_path()));

        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        match active.get(&key) {
            Some(Some(path)) => are_paths_same(path, &interpreter.executable),
            _ => false,
        }
    }

    /// Snapshot of the tracked interpreters
    pub fn tracked(&self) -> HashMap<String, Option<PathBuf>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for WorkspaceInterpreterTracker {
    fn drop(&mut self) {
        self.deactivate();
    }
}

async fn listen(
    mut changes: broadcast::Receiver<InterpreterChangeEvent>,
    interpreters: Arc<dyn InterpreterService>,
    workspace: Arc<dyn WorkspaceService>,
    active: Arc<RwLock<InterpreterMap>>,
) {
    loop {
        match changes.recv().await {
            Ok(event) => {
                tracing::debug!("Interpreter changed for {:?}", event.resource);
                refresh(&*interpreters, &*workspace, &active).await;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Missed {} interpreter change events", skipped);
                refresh(&*interpreters, &*workspace, &active).await;
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn refresh(
    interpreters: &dyn InterpreterService,
    workspace: &dyn WorkspaceService,
    active: &RwLock<InterpreterMap>,
) {
    let folders = workspace.workspace_folders();
    let lookups = folders.iter().map(|folder| async move {
        let key = workspace_folder_identifier(Some(&folder.path));
        let result = interpreters.active_interpreter(Some(&folder.path)).await;
        (key, folder, result)
    });
    let results = join_all(lookups).await;

    let mut active = active.write().unwrap_or_else(PoisonError::into_inner);
    let open: HashSet<&str> = results.iter().map(|(key, _, _)| key.as_str()).collect();
    active.retain(|key, _| open.contains(key.as_str()));

    for (key, folder, result) in &results {
        match result {
            Ok(interpreter) => {
                active.insert(
                    key.clone(),
                    interpreter.as_ref().map(|i| i.executable.clone()),
                );
            }
            Err(e) => {
                tracing::debug!(
                    "Ignoring interpreter lookup failure for {}: {}",
                    folder.path.display(),
                    e
                );
            }
        }
    }
}
