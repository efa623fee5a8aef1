//! Interpreter service backed by an explicit table
//!
//! Used by the command line tool, where interpreters come from flags and the
//! config file rather than from an editor.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

use crate::{
    error::Result,
    interfaces::{InterpreterChangeEvent, InterpreterService},
    types::Environment,
    utils::paths::is_path_contained,
};

const CHANNEL_CAPACITY: usize = 16;

pub struct StaticInterpreterService {
    /// Per-folder interpreters
    folders: RwLock<Vec<(PathBuf, Environment)>>,
    /// Interpreter used for resources outside every folder
    fallback: RwLock<Option<Environment>>,
    changes: broadcast::Sender<InterpreterChangeEvent>,
}

impl StaticInterpreterService {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            folders: RwLock::new(Vec::new()),
            fallback: RwLock::new(None),
            changes,
        }
    }

    pub fn with_fallback(self, environment: Environment) -> Self {
        *self.fallback.write().unwrap_or_else(PoisonError::into_inner) = Some(environment);
        self
    }

    pub fn with_folder(self, folder: impl Into<PathBuf>, environment: Environment) -> Self {
        self.folders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((folder.into(), environment));
        self
    }

    /// Change the active interpreter for `folder` (or the fallback when `None`)
    /// and notify subscribers
    pub fn set_active(&self, folder: Option<PathBuf>, environment: Option<Environment>) {
        match &folder {
            Some(path) => {
                let mut folders = self.folders.write().unwrap_or_else(PoisonError::into_inner);
                folders.retain(|(existing, _)| existing != path);
                if let Some(environment) = environment {
                    folders.push((path.clone(), environment));
                }
            }
            None => {
                *self.fallback.write().unwrap_or_else(PoisonError::into_inner) = environment;
            }
        }

        // No subscribers is fine
        let _ = self.changes.send(InterpreterChangeEvent { resource: folder });
    }

    fn lookup(&self, resource: Option<&Path>) -> Option<Environment> {
        if let Some(resource) = resource {
            let folders = self.folders.read().unwrap_or_else(PoisonError::into_inner);
            let best = folders
                .iter()
                .filter(|(folder, _)| is_path_contained(folder, resource))
                .max_by_key(|(folder, _)| folder.components().count());
            if let Some((_, environment)) = best {
                return Some(environment.clone());
            }
        }

        self.fallback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for StaticInterpreterService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterpreterService for StaticInterpreterService {
    async fn active_interpreter(&self, resource: Option<&Path>) -> Result<Option<Environment>> {
        let environment = self.lookup(resource);
        tracing::trace!(
            "Active interpreter for {:?}: {:?}",
            resource,
            environment.as_ref().map(|e| &e.executable)
        );
        Ok(environment)
    }

    fn subscribe(&self) -> broadcast::Receiver<InterpreterChangeEvent> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnvironmentKind;

    fn venv(path: &str) -> Environment {
        Environment::new(path, EnvironmentKind::VirtualEnv)
    }

    #[tokio::test]
    async fn test_innermost_folder_wins() {
        let service = StaticInterpreterService::new()
            .with_fallback(venv("/usr/bin/python3"))
            .with_folder("/work", venv("/work/.venv/bin/python"))
            .with_folder("/work/app", venv("/work/app/.venv/bin/python"));

        let env = service
            .active_interpreter(Some(Path::new("/work/app/main.py")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(env.executable, PathBuf::from("/work/app/.venv/bin/python"));

        let env = service
            .active_interpreter(Some(Path::new("/tmp/scratch.py")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(env.executable, PathBuf::from("/usr/bin/python3"));
    }

    #[tokio::test]
    async fn test_no_interpreter() {
        let service = StaticInterpreterService::new();
        assert!(service.active_interpreter(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_active_notifies() {
        let service = StaticInterpreterService::new();
        let mut changes = service.subscribe();

        service.set_active(Some(PathBuf::from("/work/app")), Some(venv("/work/app/.venv/bin/python")));

        let event = changes.recv().await.unwrap();
        assert_eq!(event.resource, Some(PathBuf::from("/work/app")));
        let env = service
            .active_interpreter(Some(Path::new("/work/app")))
            .await
            .unwrap();
        assert!(env.is_some());
    }
}
