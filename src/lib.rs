//! # Pointer Basics
//!
//! Small lessons on reaching memory you do not own, and owning memory you
//! allocate.
//!
//! ## Lessons
//!
//! 1. **f1** - Mutating a caller's value by alias (`&mut T`) and by address
//!    ([`mutate::Addr`])
//! 2. **p1** - Printing a pointer, reading and writing through it
//! 3. **p2** - Value sizes vs. pointer sizes, element offsets
//! 4. **p4** - Read-only and fixed handles, allocating and releasing a
//!    heap array ([`heap_array::HeapArray`])
//!
//! ## Running
//!
//! ```bash
//! cargo run --bin f1_increment
//! cargo run --bin p1_pointer_content
//! cargo run --bin p2_sizes
//! cargo run --bin p4_const_and_heap
//!
//! # All lessons, optionally with a TOML file of starting values
//! cargo run --bin lessons -- lessons.toml
//! RUST_LOG=debug cargo run --bin lessons
//! ```

pub mod config;
pub mod error;
pub mod heap_array;
pub mod lessons;
pub mod logging;
pub mod mutate;
pub mod qualifiers;
pub mod sizes;

pub use error::{AllocError, ConfigError, Error};
