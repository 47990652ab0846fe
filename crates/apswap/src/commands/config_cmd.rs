//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        // ── Init: write defaults ────────────────────────────────────
        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !*force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let cfg = Config::default();
            let out = config::renderer(global, &cfg)?;
            let written = config::save_config(&cfg)?;
            out.emit(&out.check(&format!("Wrote {}", written.display())));
            Ok(())
        }

        // ── Show: resolved configuration ────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = config::renderer(global, &cfg)?;
            out.emit(&out.single(
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |_| config::config_path().display().to_string(),
            ));
            Ok(())
        }

        ConfigCommand::Path => {
            let out = config::renderer(global, &config::load_config_or_default())?;
            out.emit(&config::config_path().display().to_string());
            Ok(())
        }
    }
}
