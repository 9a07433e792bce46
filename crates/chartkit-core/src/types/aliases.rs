//! Type aliases for commonly used complex types.
//!
//! The drawing core is single-threaded: every pointer callback runs on the UI
//! thread, so shared state uses `Rc<RefCell<T>>` rather than locks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chartkit_core::types::*;
//!
//! // Instead of: Rc<RefCell<AnnotationRegistry>>
//! let registry: Shared<AnnotationRegistry> = shared(AnnotationRegistry::new());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The annotation registry is handed to the interaction controller and to
/// toolbar/keyboard collaborators through this alias.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
