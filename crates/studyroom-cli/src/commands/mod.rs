pub mod activity;
pub mod config;
pub mod profile;
pub mod resource;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod task;
pub mod timer;

use studyroom_core::{CoreError, SqliteStore, StatsEngine, Subject};

pub type Engine = StatsEngine<SqliteStore>;

/// Statistics engine over the on-disk store, with starter data in place.
pub fn open_engine() -> Result<Engine, CoreError> {
    let engine = StatsEngine::new(SqliteStore::open()?);
    engine.initialize_default_data();
    Ok(engine)
}

pub fn parse_subject(raw: &str) -> Result<Subject, Box<dyn std::error::Error>> {
    Ok(raw.parse::<Subject>()?)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
