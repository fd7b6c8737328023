// Each lesson builds its output as lines so the binaries only print them.

use tracing::debug;

use crate::config::LessonConfig;
use crate::error::Error;
use crate::heap_array::HeapArray;
use crate::mutate::{inc_pointer, inc_reference, Addr};
use crate::qualifiers::{FixedReadOnly, ReadOnly};
use crate::sizes::{element_offsets, size_report};

pub type Lines = Vec<String>;

/// A lesson's name and the function that runs it.
pub struct Lesson {
    pub name: &'static str,
    pub run: fn(&LessonConfig) -> Result<Lines, Error>,
}

pub const ALL: [Lesson; 4] = [
    Lesson { name: "f1: increment by reference and by pointer", run: increment },
    Lesson { name: "p1: pointer content", run: pointer_content },
    Lesson { name: "p2: sizes and pointer arithmetic", run: sizes },
    Lesson { name: "p4: const handles and heap arrays", run: const_and_heap },
];

pub fn increment(config: &LessonConfig) -> Result<Lines, Error> {
    let mut day = config.increment.day;
    let mut lines = Vec::new();

    inc_reference(&mut day);
    lines.push(format!("incremented by reference: {}", day));

    inc_pointer(Addr::of(&mut day));
    lines.push(format!("incremented by pointer: {}", day));

    Ok(lines)
}

pub fn pointer_content(config: &LessonConfig) -> Result<Lines, Error> {
    let mut day = config.pointer.day;
    let mut lines = Vec::new();

    {
        let mut p_day = Addr::of(&mut day);
        lines.push(format!("Pointer content: {:p}", p_day));
        lines.push(format!("Pointer ref value: {}", p_day.read()));

        p_day.write(config.pointer.update);
        lines.push(format!("Updated pointer ref value: {}", *p_day));
    }
    lines.push(format!("Updated value: {}", day));

    Ok(lines)
}

pub fn sizes(config: &LessonConfig) -> Result<Lines, Error> {
    let mut lines: Lines = size_report().iter().flat_map(|row| row.lines()).collect();

    let block = HeapArray::<i32>::new(config.sizes.offsets_len)?;
    for (i, offset) in element_offsets(&block).into_iter().enumerate() {
        lines.push(format!("int element {} at base + {} bytes", i, offset));
    }

    Ok(lines)
}

pub fn const_and_heap(config: &LessonConfig) -> Result<Lines, Error> {
    let month = config.heap.month;
    let holiday = config.heap.holiday;
    let mut lines = Vec::new();

    let mut p_month_a = ReadOnly::new(&month);
    lines.push(format!("read-only handle reads: {}", *p_month_a));

    let p_month_b = FixedReadOnly::new(&month);
    lines.push(format!("fixed read-only handle reads: {}", *p_month_b));

    p_month_a.rebind(&holiday);
    lines.push(format!("read-only handle rebound, reads: {}", *p_month_a));

    let years = HeapArray::<i32>::new(config.heap.years)?;
    lines.push(format!(
        "allocated {} ints ({} bytes)",
        years.len(),
        years.byte_size()
    ));
    debug!(len = years.len(), "releasing years");
    years.release();
    lines.push("released years".to_string());

    Ok(lines)
}
