// Lesson f1: Increment by reference and by pointer
use anyhow::Result;
use pointer_basics::config::LessonConfig;
use pointer_basics::{lessons, logging};

fn main() -> Result<()> {
    logging::init();
    for line in lessons::increment(&LessonConfig::default())? {
        println!("{}", line);
    }
    Ok(())
}
