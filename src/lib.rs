use std::{fs::File, io::Read, path::Path};

pub mod ast;
pub mod execution;
pub mod frontend;
pub mod pipeline;
pub mod semantic;
pub mod utils;

pub use utils::errors;

pub const VERSION: &str = "0.1.0";

pub struct LineNumber {
    pub line: usize,
}

impl Default for LineNumber {
    fn default() -> Self {
        Self { line: 1 }
    }
}

use crate::errors::{SqlError, SqlResult};
use crate::utils::config::input::SOURCE_EXTENSION;

pub fn read(filename: &Path) -> SqlResult<String> {
    match filename.extension() {
        Some(ext) if ext == SOURCE_EXTENSION => {}
        _ => {
            return Err(SqlError::FileReadError(format!(
                "File must have a .{} extension",
                SOURCE_EXTENSION
            )));
        }
    }
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
