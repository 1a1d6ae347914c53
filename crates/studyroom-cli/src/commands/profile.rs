use clap::Subcommand;

use super::{open_engine, print_json};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the local profile
    Show,
    /// Create the profile, or rename it
    Create { name: String },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        ProfileAction::Show => match engine.profile() {
            Some(profile) => print_json(&profile)?,
            None => eprintln!("no profile yet; run `profile create <name>`"),
        },
        ProfileAction::Create { name } => {
            let profile = engine.create_profile(&name)?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
