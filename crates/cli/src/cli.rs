use clap::{Args, Parser, Subcommand};
use module_installer_core::{EnvironmentKind, InstallFlags};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "module-installer")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Config file to use instead of the nearest .module-installer.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which installer would be used and the command it would run
    #[command(visible_alias = "p")]
    Plan {
        /// Module to install
        module: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Install a module with the selected installer
    #[command(visible_alias = "i")]
    Install {
        /// Module to install
        module: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        flags: FlagArgs,
    },
    /// List registered installers and whether each supports the target
    Installers {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Where to install
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Interpreter to install into
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Environment kind of --python (detected from its layout when omitted)
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<EnvironmentKind>,

    /// Environment name, used by conda
    #[arg(long = "env-name")]
    pub env_name: Option<String>,

    /// Environment root, when it is not next to the interpreter
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// File or folder whose active interpreter is the target
    #[arg(long)]
    pub resource: Option<PathBuf>,

    /// Workspace folder; repeat for several (defaults to the current directory)
    #[arg(short, long = "workspace")]
    pub workspaces: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FlagArgs {
    /// Upgrade the module if it is already installed
    #[arg(short = 'U', long)]
    pub upgrade: bool,

    /// Reinstall even if the module is present
    #[arg(long)]
    pub reinstall: bool,

    /// Also update the module's dependencies
    #[arg(long)]
    pub update_deps: bool,
}

impl FlagArgs {
    pub fn to_flags(self) -> InstallFlags {
        let mut flags = InstallFlags::empty();
        if self.upgrade {
            flags |= InstallFlags::UPGRADE;
        }
        if self.reinstall {
            flags |= InstallFlags::REINSTALL;
        }
        if self.update_deps {
            flags |= InstallFlags::UPDATE_DEPENDENCIES;
        }
        flags
    }
}

fn parse_kind(value: &str) -> Result<EnvironmentKind, String> {
    value.parse().map_err(|e: module_installer_core::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan() {
        let cli = Cli::parse_from([
            "module-installer",
            "plan",
            "requests",
            "--python",
            "/w/.venv/bin/python",
            "--kind",
            "Pipenv",
            "-w",
            "/w",
            "-U",
            "--update-deps",
        ]);

        let Commands::Plan {
            module,
            target,
            flags,
            json,
        } = cli.command
        else {
            panic!("expected plan");
        };
        assert_eq!(module, "requests");
        assert_eq!(target.kind, Some(EnvironmentKind::Pipenv));
        assert_eq!(target.workspaces, vec![PathBuf::from("/w")]);
        assert!(!json);
        assert_eq!(
            flags.to_flags(),
            InstallFlags::UPGRADE | InstallFlags::UPDATE_DEPENDENCIES
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = Cli::try_parse_from(["module-installer", "plan", "x", "--kind", "nix"]);
        assert!(result.is_err());
    }
}
