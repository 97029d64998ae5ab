pub mod binder;
pub mod visiters;

pub use binder::Binder;
pub use visiters::{walk, CursorReferenceCollector, NodeVisitor};
