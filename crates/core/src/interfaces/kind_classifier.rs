use std::path::Path;

use crate::types::EnvironmentKind;

/// Works out the kind of an environment discovered without one
pub trait EnvironmentKindClassifier: Send + Sync {
    fn classify(&self, executable: &Path) -> EnvironmentKind;
}
