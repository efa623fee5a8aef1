use async_trait::async_trait;
use module_installer_core::{
    Environment, EnvironmentKind, ExecutionArgs, InstallFlags, InstallOutcome, InstallRequest,
    InstallTarget, InstallerRegistry, InstallerServices, InstallerSettings, InstallerType,
    ModuleInstallService, ModuleInstaller, Result,
    installer::{CondaInstaller, PipInstaller, PipenvInstaller, PoetryInstaller, SystemPipInstaller},
    interfaces::{ProcessOutput, ProcessRunner},
    services::{FolderWorkspaceService, StaticInterpreterService},
};
use std::sync::Arc;

const PIPENV_PYTHON: &str = "/work/app/.venv/bin/python";

fn pipenv_env() -> Environment {
    Environment::new(PIPENV_PYTHON, EnvironmentKind::Pipenv)
}

fn services() -> InstallerServices {
    let interpreters = StaticInterpreterService::new()
        .with_folder("/work/app", pipenv_env())
        .with_folder("/work/other", pipenv_env());
    InstallerServices::new(
        Arc::new(interpreters),
        Arc::new(FolderWorkspaceService::new(["/work/app", "/work/other"])),
    )
}

#[tokio::test]
async fn pipenv_verb_is_update_for_any_flag() {
    let installer = PipenvInstaller::new(services());
    let env = pipenv_env();

    for bits in 1..=InstallFlags::all().bits() {
        let flags = InstallFlags::from_bits_truncate(bits);
        let args = installer.execution_args("requests", &env, flags);
        assert_eq!(args.args[0], "update", "flags {flags}");
    }

    let args = installer.execution_args("requests", &env, InstallFlags::empty());
    assert_eq!(args.exe, "pipenv");
    assert_eq!(args.args, vec!["install", "requests", "--dev"]);

    let args = installer.execution_args("requests", &env, InstallFlags::UPGRADE);
    assert_eq!(args.args, vec!["update", "requests", "--dev"]);
}

#[tokio::test]
async fn pipenv_supports_only_its_own_folder() {
    let installer = PipenvInstaller::new(services());

    assert!(installer.is_supported(&InstallTarget::resource("/work/app")).await);
    assert!(!installer.is_supported(&InstallTarget::resource("/work/other")).await);
}

/// Supports everything at a fixed priority
struct Always {
    name: &'static str,
    priority: i32,
}

#[async_trait]
impl ModuleInstaller for Always {
    fn name(&self) -> &str {
        self.name
    }

    fn display_name(&self) -> &str {
        self.name
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::Pip
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn is_supported(&self, _target: &InstallTarget) -> bool {
        true
    }

    fn execution_args(&self, module: &str, _env: &Environment, _flags: InstallFlags) -> ExecutionArgs {
        ExecutionArgs::new(self.name, vec![module.to_string()])
    }
}

#[tokio::test]
async fn selection_ignores_registration_order_for_distinct_priorities() {
    let installers = || -> Vec<Arc<dyn ModuleInstaller>> {
        vec![
            Arc::new(Always { name: "low", priority: -5 }),
            Arc::new(Always { name: "mid", priority: 0 }),
            Arc::new(Always { name: "high", priority: 7 }),
        ]
    };
    let target = InstallTarget::resource("/anywhere");

    let mut forward = InstallerRegistry::new();
    installers().into_iter().for_each(|i| forward.register(i));
    let mut reverse = InstallerRegistry::new();
    installers().into_iter().rev().for_each(|i| reverse.register(i));

    for _ in 0..3 {
        let a = forward.select_installer("x", &target, InstallFlags::empty()).await.unwrap();
        let b = reverse.select_installer("x", &target, InstallFlags::empty()).await.unwrap();
        assert_eq!(a.name(), "high");
        assert_eq!(b.name(), "high");
    }
}

#[tokio::test]
async fn default_registry_picks_by_environment_kind() {
    let registry = InstallerRegistry::with_defaults(services(), &InstallerSettings::default());

    for (kind, expected) in [
        (EnvironmentKind::Conda, "Conda"),
        (EnvironmentKind::Pipenv, "pipenv"),
        (EnvironmentKind::Poetry, "poetry"),
        (EnvironmentKind::VirtualEnv, "Pip"),
        (EnvironmentKind::Unknown, "Pip"),
        (EnvironmentKind::System, "SystemPip"),
    ] {
        let target = InstallTarget::Environment(Environment::new("/e/bin/python", kind));
        let selected = registry
            .select_installer("x", &target, InstallFlags::empty())
            .await
            .unwrap();
        assert_eq!(selected.name(), expected, "{kind}");
    }
}

#[tokio::test]
async fn nothing_supported_is_not_an_error() {
    let services = InstallerServices::new(
        Arc::new(StaticInterpreterService::new()),
        Arc::new(FolderWorkspaceService::default()),
    );
    let settings = InstallerSettings::default();
    let mut registry = InstallerRegistry::new();
    registry.register(Arc::new(CondaInstaller::new(services.clone(), &settings)));
    registry.register(Arc::new(PoetryInstaller::new(services.clone(), &settings)));
    registry.register(Arc::new(PipInstaller::new(services.clone(), &settings)));
    registry.register(Arc::new(SystemPipInstaller::new(services.clone(), &settings)));

    let target = InstallTarget::Resource(None);
    assert!(registry.select_installer("x", &target, InstallFlags::empty()).await.is_none());

    let service = ModuleInstallService::new(registry, services, Arc::new(NeverRuns));
    let outcome = service.install(&InstallRequest::new("x", target)).await.unwrap();
    assert_eq!(outcome, InstallOutcome::NoInstaller);
}

struct NeverRuns;

#[async_trait]
impl ProcessRunner for NeverRuns {
    async fn run(&self, command: &ExecutionArgs) -> Result<ProcessOutput> {
        panic!("nothing should run, got {}", command.to_shell_command());
    }
}
