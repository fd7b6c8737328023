// Lesson p2: Value sizes vs. pointer sizes
//
// On a 64-bit target every pointer is 8 bytes, whatever it points to.
use anyhow::Result;
use pointer_basics::config::LessonConfig;
use pointer_basics::{lessons, logging};

fn main() -> Result<()> {
    logging::init();
    for line in lessons::sizes(&LessonConfig::default())? {
        println!("{}", line);
    }
    Ok(())
}
