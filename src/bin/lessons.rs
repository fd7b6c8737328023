use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use pointer_basics::config::LessonConfig;
use pointer_basics::{lessons, logging};

fn main() -> Result<()> {
    logging::init();

    // Optional first argument: a TOML file overriding the starting values.
    let config = match env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => LessonConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LessonConfig::default(),
    };
    if !config.color {
        colored::control::set_override(false);
    }

    for lesson in lessons::ALL.iter() {
        info!(lesson = lesson.name, "running");
        println!("{}", format!("== {} ==", lesson.name).as_str().bold().cyan());
        let lines = (lesson.run)(&config).with_context(|| format!("lesson '{}'", lesson.name))?;
        for line in lines {
            println!("{}", line);
        }
        println!();
    }

    Ok(())
}
