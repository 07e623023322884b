use crate::error::{Result, UnfollowError};
use crate::parser::Username;
use crate::sink::write_list;
use std::path::Path;

/// The list a viewer displays and edits.
///
/// Removals only touch this in-memory copy; the archive and any files
/// written earlier are left alone until [`save`](Self::save) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnfollowerListModel {
    items: Vec<Username>,
}

impl UnfollowerListModel {
    pub fn new(items: Vec<Username>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Username] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Username> {
        self.items.get(index).ok_or(UnfollowError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<Username> {
        if index >= self.items.len() {
            return Err(UnfollowError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes a selection of positions (as they were before the call).
    ///
    /// Either every index is valid and all are removed, or nothing changes.
    /// Repeated indices count once. Returns the removed names in list order.
    pub fn remove_selected(&mut self, indices: &[usize]) -> Result<Vec<Username>> {
        let mut selection = indices.to_vec();
        selection.sort_unstable();
        selection.dedup();

        if let Some(&index) = selection.iter().find(|&&i| i >= self.items.len()) {
            return Err(UnfollowError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let mut removed: Vec<Username> = selection
            .iter()
            .rev()
            .map(|&i| self.items.remove(i))
            .collect();
        removed.reverse();
        Ok(removed)
    }

    pub fn to_list(&self) -> Vec<Username> {
        self.items.clone()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_list(path, &self.items)
    }
}
