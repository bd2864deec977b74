//! Config subcommand handlers.

use dialoguer::Input;

use sitepulse_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => init(global, force),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts, force: bool) -> Result<(), CliError> {
    let path = config::config_path(global);

    if path.exists() {
        let prompt = format!("{} already exists. Overwrite?", path.display());
        if !util::confirm(&prompt, force)? {
            output::print_note("left existing config untouched", global.quiet);
            return Ok(());
        }
    }

    let raw = match global.backend_url {
        Some(ref url) => url.clone(),
        None => Input::<String>::new()
            .with_prompt("Backend URL")
            .validate_with(|input: &String| {
                sitepulse_config::parse_backend_url(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(util::prompt_err)?,
    };
    sitepulse_config::parse_backend_url(&raw)?;

    let cfg = Config {
        backend_url: Some(raw.trim().to_owned()),
        insecure: global.insecure,
        ..Config::default()
    };
    sitepulse_config::save_config(&cfg, &path)?;
    output::print_note(&format!("wrote {}", path.display()), global.quiet);
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)?,
        ref format => output::render_single(format, &cfg, |_| String::new()),
    };
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}
