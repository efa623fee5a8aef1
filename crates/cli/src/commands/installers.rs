use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::TargetArgs;
use crate::display::{print_installers, print_tracked_interpreters};
use crate::utils::InstallContext;

pub async fn installers_command(target: &TargetArgs, config: Option<&Path>) -> Result<()> {
    let context = InstallContext::load(target, config)?;
    let registry = context.registry();

    let supported = registry.supported_installers(&context.target).await;
    println!("🔍 Installers for {}", context.target.describe());
    print_installers(&registry.ordered(), &supported);

    let tracker = context.config.tracker(
        Arc::clone(&context.services.interpreters),
        Arc::clone(&context.services.workspace),
    );
    tracker.activate().await;
    if tracker.is_active() {
        print_tracked_interpreters(&tracker.tracked());
    }

    Ok(())
}
