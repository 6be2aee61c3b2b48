//! Column projection: keep or remove a configured set of columns.

use crate::errors::{CsvMillError, Result};
use crate::row::DELIMITER;

/// Whether the index list names columns to retain or columns to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMode {
    Keep,
    Remove,
}

/// An ascending, duplicate-free list of zero-based column indices, tagged
/// keep or remove. Built once from configuration by resolving column names
/// against a header; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    mode: ColumnMode,
    indices: Vec<usize>,
}

impl ColumnSet {
    /// Builds a set from already-known indices. Sorts and deduplicates.
    #[must_use]
    pub fn from_indices(mode: ColumnMode, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { mode, indices }
    }

    /// Resolves column names against a header into a sorted, duplicate-free
    /// index list. Any name absent from the header is a configuration error.
    pub fn resolve(mode: ColumnMode, names: &[String], header: &[String]) -> Result<Self> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let index = header
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| CsvMillError::ColumnNotFound { name: name.clone() })?;
            indices.push(index);
        }
        Ok(Self::from_indices(mode, indices))
    }

    /// The keep/remove tag.
    #[must_use]
    pub fn mode(&self) -> ColumnMode {
        self.mode
    }

    /// The resolved indices, ascending and duplicate-free.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Projects a row: in remove mode every field not listed is copied, in
    /// keep mode exactly the listed fields are copied, in original order.
    ///
    /// # Errors
    ///
    /// [`CsvMillError::MalformedRow`] if the row ends before every listed
    /// index has been matched.
    pub fn project(&self, row: &str) -> Result<String> {
        let fields: Vec<&str> = row.split(DELIMITER).collect();
        if let Some(&max) = self.indices.last() {
            if max >= fields.len() {
                return Err(CsvMillError::MalformedRow { column: max, found: fields.len() });
            }
        }

        let kept: Vec<&str> = match self.mode {
            ColumnMode::Remove => fields
                .iter()
                .enumerate()
                .filter(|(i, _)| self.indices.binary_search(i).is_err())
                .map(|(_, f)| *f)
                .collect(),
            ColumnMode::Keep => self.indices.iter().map(|&i| fields[i]).collect(),
        };
        Ok(kept.join(","))
    }
}

/// Projects through an optional set; `None` means no column changes.
pub fn project_row(set: Option<&ColumnSet>, row: &str) -> Result<String> {
    match set {
        Some(set) => set.project(row),
        None => Ok(row.to_string()),
    }
}
