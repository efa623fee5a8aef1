use module_installer_core::{InstallPlan, ModuleInstaller};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub fn print_plan(plan: &InstallPlan) {
    println!("📦 Installer: {} ({})", plan.display_name, plan.installer_type);
    println!(
        "🐍 Environment: {} {}",
        plan.environment.kind,
        plan.environment.executable.display()
    );
    if let Some(cwd) = &plan.command.cwd {
        println!("📂 Working directory: {}", cwd.display());
    }
    println!("🔧 Command: {}", plan.command.to_shell_command());
}

/// One line per installer, best first, marking the ones that support the target
pub fn print_installers(
    installers: &[Arc<dyn ModuleInstaller>],
    supported: &[Arc<dyn ModuleInstaller>],
) {
    let width = installers
        .iter()
        .map(|i| i.display_name().len())
        .max()
        .unwrap_or(0);

    for installer in installers {
        let is_supported = supported.iter().any(|s| s.name() == installer.name());
        println!(
            "{} {:<width$}  priority {:>3}  {}",
            if is_supported { "✅" } else { "❌" },
            installer.display_name(),
            installer.priority(),
            installer.installer_type(),
        );
    }
}

/// Active interpreter per workspace folder, sorted by folder
pub fn print_tracked_interpreters(tracked: &HashMap<String, Option<PathBuf>>) {
    let mut folders: Vec<_> = tracked.iter().collect();
    folders.sort_by(|a, b| a.0.cmp(b.0));

    println!("🐍 Workspace interpreters:");
    for (folder, interpreter) in folders {
        match interpreter {
            Some(path) => println!("   • {}: {}", folder, path.display()),
            None => println!("   • {}: none", folder),
        }
    }
}
