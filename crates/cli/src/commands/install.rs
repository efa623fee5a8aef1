use anyhow::{Result, bail};
use module_installer_core::{InstallOutcome, InstallRequest, services::TokioProcessRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::{FlagArgs, TargetArgs};
use crate::utils::InstallContext;

pub async fn install_command(
    module: &str,
    target: &TargetArgs,
    flags: FlagArgs,
    config: Option<&Path>,
) -> Result<()> {
    let context = InstallContext::load(target, config)?;
    let request = InstallRequest::new(module, context.target.clone()).with_flags(flags.to_flags());

    let service = context.install_service(Arc::new(TokioProcessRunner::new()));
    match service.install(&request).await? {
        InstallOutcome::Installed { plan, output } => {
            info!("Ran: {}", plan.command.to_shell_command());
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            println!("✅ Installed {} with {}", module, plan.display_name);
            Ok(())
        }
        InstallOutcome::NoInstaller => {
            bail!("No installer supports {}", context.target.describe())
        }
    }
}
