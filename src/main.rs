use console::style;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rns_mesh_setup::{
    exit_code,
    probe::SystemProbe,
    prompt::ConsolePrompter,
    steps::packages::PipInstaller,
    system::HostSystem,
    ui::{self, ConsoleReporter, Reporter},
    Installer, InstallerError, Outcome, Services, Settings,
};

const CANCELLED_MSG: &str = "Installation cancelled by user";

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    init_logging();
    install_interrupt_handler();

    let result = run();
    let code = exit_code(&result);

    match result {
        Ok(Outcome::Completed(report)) => {
            info!(
                installed = report.installed.len(),
                failures = report.failures.len(),
                "installation finished"
            );
        }
        Ok(Outcome::Declined) => info!("operator declined at start"),
        Err(e) if e.is_cancellation() => print_cancelled(),
        Err(e) => {
            println!();
            ConsoleReporter.error(&e.to_string());
        }
    }

    std::process::exit(code);
}

fn run() -> Result<Outcome, InstallerError> {
    let settings = Settings::from_env()?;

    let reporter = ConsoleReporter;
    let mut prompter = ConsolePrompter;
    let system = HostSystem::new(settings.python.clone());
    let packages = PipInstaller::new(settings.python.clone());
    let probe = SystemProbe {
        device_dir: settings.device_dir.clone(),
        python: settings.python.clone(),
    };

    let services = Services {
        prompt: &mut prompter,
        ui: &reporter,
        system: &system,
        packages: &packages,
        probe: &probe,
    };

    Installer::new(&settings, services).run()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Diagnostics go to stderr and stay quiet unless `RUST_LOG` asks for more.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rns_mesh_setup=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Ctrl-C outside a prompt (e.g. while pip runs) ends the run right away.
/// Inside a prompt the raw-mode read sees it first and unwinds normally.
fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        ui::restore_terminal();
        print_cancelled();
        std::process::exit(0);
    }) {
        warn!(error = %e, "could not install interrupt handler");
    }
}

fn print_cancelled() {
    println!();
    println!();
    println!("  {}", style(CANCELLED_MSG).yellow());
}
