//! Type aliases for commonly used shared types.
//!
//! Editing happens on a single interaction thread, so collaborators that are
//! both owned by the host and registered with an editing component (selection
//! listeners, change handlers) are shared through `Rc<RefCell<T>>`.
//!
//! ## Usage
//!
//! ```rust
//! use beatedit_core::types::{shared, Shared};
//!
//! let counter: Shared<u32> = shared(0);
//! *counter.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Trait objects coerce through it, so a `Shared<UndoRedoManager>` can be
/// handed out as a `Shared<dyn ChangeHandler>`.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value in a new [`Shared`] cell.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
