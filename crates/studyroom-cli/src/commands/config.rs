//! Reading and editing `config.toml` from the command line.

use std::path::Path;

use clap::Subcommand;
use studyroom_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, addressed by dotted key (e.g. "timer.default_minutes")
    Get { key: String },
    /// Change one setting and write the file
    Set { key: String, value: String },
    /// Print every setting as TOML
    List {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the file with built-in defaults
    Reset,
    /// Print where the file lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::path()?;
    match action {
        ConfigAction::Get { key } => show_key(&path, &key),
        ConfigAction::Set { key, value } => update_key(&path, &key, &value),
        ConfigAction::List { json } => {
            let config = Config::load_from(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            tracing::info!(path = %path.display(), "config reset");
            println!("defaults written to {}", path.display());
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn show_key(path: &Path, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value = Config::load_from(path)?
        .get(key)
        .ok_or_else(|| format!("unknown key: {key}"))?;
    println!("{value}");
    Ok(())
}

fn update_key(path: &Path, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_from(path)?;
    config.set(key, value)?;
    config.save_to(path)?;
    // Echo back the stored form ("Chem" is saved as "chemistry").
    let stored = config.get(key).unwrap_or_else(|| value.to_string());
    println!("{key} = {stored}");
    Ok(())
}
