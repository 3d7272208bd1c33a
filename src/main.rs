use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use containerconf::cli::{Cli, Command, DriverAction};
use containerconf::config::{AppSettings, ContainerConfig};
use containerconf::drivers::{installed_or_empty, DriverRepository, FsDriverRepository};
use containerconf::launch::launch_env;
use containerconf::logging::init_tracing;
use containerconf::reconcile::ReconcileContext;
use containerconf::ui::editor::EditorOutcome;
use containerconf::ui::{run_driver_manager, ConfigEditor};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path),
        None => AppSettings::load(),
    }
    .context("Failed to load settings")?;

    let log_file = cli.is_interactive().then(|| settings.log_file());
    init_tracing(cli.verbose, log_file.as_deref()).context("Failed to open log file")?;

    let repository = FsDriverRepository::new(settings.driver_root());

    match cli.command {
        Command::Edit {
            file,
            title,
            default_profile,
        } => {
            let initial = ContainerConfig::load_from(&file)?;
            let ctx = reconcile_context(&settings, &repository);
            let title = title.unwrap_or_else(|| format!("Edit {}", initial.name));
            match ConfigEditor::open(title, initial, default_profile, Arc::new(ctx)).run()? {
                EditorOutcome::Saved(config) => {
                    config.save_to(&file)?;
                    println!("Saved {}", file.display());
                }
                EditorOutcome::Dismissed => println!("No changes saved"),
            }
        }
        Command::Show { file } => {
            let (config, _) = load_reconciled(&file, &settings, &repository)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Command::Env { file } => {
            let (config, _) = load_reconciled(&file, &settings, &repository)?;
            for (name, value) in launch_env(&config).iter() {
                println!("{}={}", name, value);
            }
        }
        Command::Drivers { action: None } => run_driver_manager(Box::new(repository))?,
        Command::Drivers {
            action: Some(DriverAction::List),
        } => {
            for id in repository.list()? {
                println!("{}", id);
            }
        }
        Command::Drivers {
            action: Some(DriverAction::Import { archive }),
        } => match repository.import(&archive) {
            Ok(id) => println!("Installed driver: {}", id),
            Err(err) => bail!(err.import_message()),
        },
        Command::Drivers {
            action: Some(DriverAction::Remove { id, yes }),
        } => {
            if !yes && !confirm(&format!(
                "Are you sure you want to remove driver '{}'? This cannot be undone. [y/N] ",
                id
            ))? {
                println!("Cancelled");
                return Ok(());
            }
            match repository.remove(&id) {
                Ok(()) => println!("Removed driver: {}", id),
                Err(err) => bail!(err.remove_message(&id)),
            }
        }
    }

    Ok(())
}

fn reconcile_context(settings: &AppSettings, repository: &FsDriverRepository) -> ReconcileContext {
    ReconcileContext::from_gpu(
        &settings.gpu_info(),
        installed_or_empty(repository),
        settings.cpu_count(),
    )
}

fn load_reconciled(
    file: &Path,
    settings: &AppSettings,
    repository: &FsDriverRepository,
) -> anyhow::Result<(ContainerConfig, containerconf::reconcile::Selections)> {
    let config = ContainerConfig::load_from(file)?;
    Ok(reconcile_context(settings, repository).reconcile(config))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
