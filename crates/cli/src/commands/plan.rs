use anyhow::{Context, Result, bail};
use module_installer_core::{InstallRequest, services::TokioProcessRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::cli::{FlagArgs, TargetArgs};
use crate::display::print_plan;
use crate::utils::InstallContext;

pub async fn plan_command(
    module: &str,
    target: &TargetArgs,
    flags: FlagArgs,
    json: bool,
    config: Option<&Path>,
) -> Result<()> {
    let context = InstallContext::load(target, config)?;
    let request = InstallRequest::new(module, context.target.clone()).with_flags(flags.to_flags());
    debug!("Planning {} with flags {}", module, request.flags);

    // Nothing runs while planning
    let service = context.install_service(Arc::new(TokioProcessRunner::new()));
    let Some(plan) = service.plan(&request).await? else {
        bail!("No installer supports {}", context.target.describe());
    };

    if json {
        let output = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{output}");
    } else {
        print_plan(&plan);
    }

    Ok(())
}
