pub mod cursor;
pub mod executor;

pub use cursor::{CursorRegistry, InMemoryCursorRegistry, RowLocation};
pub use executor::{ExecutionOutcome, Executor};
