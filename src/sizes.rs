// Sizes of values vs. sizes of pointers to them, and element offsets
// computed with pointer arithmetic.

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRow {
    pub label: &'static str,
    pub value_size: usize,
    pub pointer_size: usize,
}

impl SizeRow {
    pub fn of<T>(label: &'static str) -> Self {
        SizeRow {
            label,
            value_size: size_of::<T>(),
            pointer_size: size_of::<*const T>(),
        }
    }

    /// Two report lines: the value size, then the pointer size.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("{} size: {}", self.label, self.value_size),
            format!("pointer to {} size: {}", self.label, self.pointer_size),
        ]
    }
}

/// int, char and double, as their one-to-one Rust scalars.
pub fn size_report() -> Vec<SizeRow> {
    vec![
        SizeRow::of::<i32>("int"),
        SizeRow::of::<u8>("char"),
        SizeRow::of::<f64>("double"),
    ]
}

/// Byte offset of every element from the first one.
///
/// ```
/// use pointer_basics::sizes::element_offsets;
///
/// assert_eq!(element_offsets(&[1u16, 2, 3]), vec![0, 2, 4]);
/// ```
pub fn element_offsets<T>(items: &[T]) -> Vec<usize> {
    let base = items.as_ptr();
    (0..items.len())
        .map(|i| {
            // SAFETY: `i < len`, so `base.add(i)` stays in the same allocation.
            let slot = unsafe { base.add(i) };
            let bytes = unsafe { (slot as *const u8).offset_from(base as *const u8) };
            bytes as usize
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_size_is_independent_of_pointee() {
        let rows = size_report();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.pointer_size, size_of::<usize>());
        }
    }

    #[test]
    fn test_value_sizes() {
        let rows = size_report();
        let sizes: Vec<_> = rows.iter().map(|r| (r.label, r.value_size)).collect();
        assert_eq!(sizes, vec![("int", 4), ("char", 1), ("double", 8)]);
    }

    #[test]
    fn test_row_lines() {
        let [value, pointer] = SizeRow::of::<i32>("int").lines();
        assert_eq!(value, "int size: 4");
        assert_eq!(pointer, format!("pointer to int size: {}", size_of::<usize>()));
    }

    #[test]
    fn test_offsets_follow_element_size() {
        let values = [0f64; 5];
        let offsets = element_offsets(&values);
        assert_eq!(offsets, vec![0, 8, 16, 24, 32]);

        let empty: [u32; 0] = [];
        assert!(element_offsets(&empty).is_empty());
    }

    #[test]
    fn test_offsets_of_zero_sized_elements() {
        assert_eq!(element_offsets(&[(), (), ()]), vec![0, 0, 0]);
    }
}
