//! Type aliases for commonly used complex types.
//!
//! The editor is single-threaded, so shared mutable state is always
//! `Rc<RefCell<T>>`. The alias keeps handler signatures readable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridpoly_core::types::*;
//!
//! let log: Shared<Vec<String>> = shared(Vec::new());
//! log.borrow_mut().push("saved".to_string());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when an event handler closure needs to write into state that the
/// caller also reads (status banners, collected notices, render counters).
pub type Shared<T> = Rc<RefCell<T>>;

/// Creates a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
