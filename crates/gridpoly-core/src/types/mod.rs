//! Type system utilities and aliases.
//!
//! - [`aliases`]: `Shared<T>` (`Rc<RefCell<T>>`) and its constructor.

pub mod aliases;

pub use aliases::*;
