// Lesson p1: Pointer content, dereference, write through
use anyhow::Result;
use pointer_basics::config::LessonConfig;
use pointer_basics::{lessons, logging};

fn main() -> Result<()> {
    logging::init();
    for line in lessons::pointer_content(&LessonConfig::default())? {
        println!("{}", line);
    }
    Ok(())
}
