use clap::Subcommand;
use studyroom_core::{NewResource, ResourceCategory};

use super::{open_engine, parse_subject, print_json};

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Save a study link
    Add {
        title: String,
        url: String,
        /// Subject it belongs to; omit for a general resource
        #[arg(long)]
        subject: Option<String>,
        /// book, video, tool, pdf or website
        #[arg(long, default_value = "website")]
        category: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List saved links
    List {
        /// Only this subject ("general" for links without one)
        #[arg(long)]
        subject: Option<String>,
    },
    /// Remove a link
    Delete { id: String },
}

pub fn run(action: ResourceAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        ResourceAction::Add {
            title,
            url,
            subject,
            category,
            description,
        } => {
            let mut new_resource =
                NewResource::new(title, url).with_category(category.parse::<ResourceCategory>()?);
            if let Some(raw) = subject {
                new_resource = new_resource.with_subject(parse_subject(&raw)?);
            }
            if let Some(description) = description {
                new_resource = new_resource.with_description(description);
            }
            print_json(&engine.add_resource(new_resource)?)?;
        }
        ResourceAction::List { subject } => {
            let resources = match subject.as_deref() {
                None => engine.resources(),
                Some(raw) if raw.eq_ignore_ascii_case("general") => engine.resources_for(None),
                Some(raw) => engine.resources_for(Some(parse_subject(raw)?)),
            };
            print_json(&resources)?;
        }
        ResourceAction::Delete { id } => {
            if !engine.delete_resource(&id) {
                return Err(format!("resource not found: {id}").into());
            }
            println!("Resource deleted: {id}");
        }
    }
    Ok(())
}
