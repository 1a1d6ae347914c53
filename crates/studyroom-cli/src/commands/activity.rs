use studyroom_core::Config;

use super::{open_engine, print_json};

pub fn run(limit: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let limit = limit.unwrap_or_else(|| Config::load_or_default().study.activity_limit);
    let engine = open_engine()?;
    print_json(&engine.recent_activity(limit))
}
