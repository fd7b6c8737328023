// Lesson p4: Const handles and a scoped heap array
use anyhow::{Context, Result};
use pointer_basics::config::LessonConfig;
use pointer_basics::{lessons, logging};

fn main() -> Result<()> {
    logging::init();
    let lines = lessons::const_and_heap(&LessonConfig::default())
        .context("const and heap lesson failed")?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
