use anyhow::{Result, anyhow};
use clap::Parser;
use env_logger::Env;
use log::info;
use meetslot::app::Application;
use meetslot::cli::{Cli, Commands, ConfigActions};
use meetslot::config::{get_config_path, Config};

fn main() -> Result<()> {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    // `config init` writes defaults, so it must work before any file exists
    let initializing = matches!(cli.command, Some(Commands::Config { action: ConfigActions::Init { .. } }));
    let config = match &cli.config {
        _ if initializing => Config::default(),
        Some(path) => Config::load_required(path)?,
        None => Config::load()?,
    };

    match cli.command {
        None => Application::new(&config)?.run(),
        Some(Commands::Demo { export }) => {
            info!("Running demo");
            let output = Application::new(&config)?.run_demo(export.as_deref())?;
            println!("{}", output);
            Ok(())
        }
        Some(Commands::Request { name, email, message, confirm }) => {
            let mut app = Application::new(&config)?;
            let summary = app.request(&name, &email, &message)?;
            println!("{}", summary);
            if let Some(slot_number) = confirm {
                let request_id = app
                    .scheduler()
                    .pending_requests()
                    .last()
                    .map(|request| request.id)
                    .ok_or_else(|| anyhow!("No pending request to confirm"))?;
                println!("{}", app.confirm(request_id, slot_number)?);
            }
            Ok(())
        }
        Some(Commands::Calendar { days }) => {
            println!("{}", Application::new(&config)?.calendar(days));
            Ok(())
        }
        Some(Commands::Config { action }) => handle_config(action, &config, cli.config.as_deref()),
    }
}

fn handle_config(action: ConfigActions, config: &Config, explicit: Option<&std::path::Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    match action {
        ConfigActions::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigActions::Init { force } => {
            if path.exists() && !force {
                return Err(anyhow!("{} already exists (use --force to overwrite)", path.display()));
            }
            Config::default().save_to(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigActions::Path => println!("{}", path.display()),
    }
    Ok(())
}
