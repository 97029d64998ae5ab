use crate::utils::errors::CursorResolutionError;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Physical address of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLocation(pub u64);

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Open cursors of one session.
pub trait CursorRegistry {
    /// Location of the row `name` is currently positioned on.
    fn resolve(&self, name: &str) -> Result<RowLocation, CursorResolutionError>;
}

#[derive(Debug)]
struct OpenCursor {
    rows: Vec<RowLocation>,
    // None before the first fetch and after the last row.
    position: Option<usize>,
    fetched: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryCursorRegistry {
    cursors: HashMap<String, OpenCursor>,
}

impl InMemoryCursorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or reopens) `name` over `rows`, positioned before the first row.
    pub fn open(&mut self, name: impl Into<String>, rows: Vec<RowLocation>) {
        let name = name.into();
        debug!("open cursor {} over {} rows", name, rows.len());
        self.cursors.insert(
            name,
            OpenCursor {
                rows,
                position: None,
                fetched: 0,
            },
        );
    }

    /// Moves to the next row. Returns `None` once the rows are exhausted.
    pub fn fetch_next(&mut self, name: &str) -> Result<Option<RowLocation>, CursorResolutionError> {
        let cursor = self
            .cursors
            .get_mut(name)
            .ok_or_else(|| CursorResolutionError::NotOpen(name.to_string()))?;
        if cursor.fetched < cursor.rows.len() {
            cursor.position = Some(cursor.fetched);
            cursor.fetched += 1;
        } else {
            cursor.position = None;
        }
        Ok(cursor.position.map(|i| cursor.rows[i]))
    }

    pub fn close(&mut self, name: &str) -> Result<(), CursorResolutionError> {
        debug!("close cursor {}", name);
        self.cursors
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CursorResolutionError::NotOpen(name.to_string()))
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.cursors.contains_key(name)
    }
}

impl CursorRegistry for InMemoryCursorRegistry {
    fn resolve(&self, name: &str) -> Result<RowLocation, CursorResolutionError> {
        let cursor = self
            .cursors
            .get(name)
            .ok_or_else(|| CursorResolutionError::NotOpen(name.to_string()))?;
        cursor
            .position
            .map(|i| cursor.rows[i])
            .ok_or_else(|| CursorResolutionError::NotPositioned(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_lifecycle() {
        let mut registry = InMemoryCursorRegistry::new();
        assert_eq!(
            registry.resolve("c"),
            Err(CursorResolutionError::NotOpen("c".to_string()))
        );
        registry.open("c", vec![RowLocation(10), RowLocation(11)]);
        assert_eq!(
            registry.resolve("c"),
            Err(CursorResolutionError::NotPositioned("c".to_string()))
        );
        assert_eq!(registry.fetch_next("c"), Ok(Some(RowLocation(10))));
        assert_eq!(registry.resolve("c"), Ok(RowLocation(10)));
        assert_eq!(registry.fetch_next("c"), Ok(Some(RowLocation(11))));
        assert_eq!(registry.fetch_next("c"), Ok(None));
        assert!(registry.resolve("c").is_err());
        registry.close("c").unwrap();
        assert!(!registry.is_open("c"));
    }
}
