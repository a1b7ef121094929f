//! Ownership and mutation primitives shared by every node type.

use std::ops::{Deref, DerefMut};
use std::ptr;

use thiserror::Error;

/// Misuse of the tree mutation API.
///
/// These are never produced for trees built solely by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("The given node is not a child of this list")]
    NotAChild,
    #[error("Index {index} is out of bounds for a list of {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{found} is not allowed as {role}")]
    WrongKind { role: &'static str, found: String },
    #[error("Positional argument cannot follow named argument")]
    PositionalAfterNamed,
    #[error("Argument name {0} used more than once")]
    DuplicateArgument(String),
    #[error("{0}")]
    InvalidFrame(&'static str),
    #[error("Number of columns ({columns}) does not match number of values ({values})")]
    ColumnCountMismatch { columns: usize, values: usize },
    #[error("Too many dots in qualified name: {0}")]
    TooManyNameParts(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
}

/// An ordered, homogeneous list of nodes.
///
/// Dereferences to a slice, so indexing and iteration work as usual.
/// Identity-based lookups compare addresses, which is how a caller holding
/// a reference obtained from the list points at one particular element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeList<T> {
    items: Vec<T>,
}

impl<T> NodeList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the element at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Sets the element at `index`, returning the one it replaced.
    ///
    /// Setting at `len()` appends and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::IndexOutOfBounds` for an index past the end.
    pub fn set(&mut self, index: usize, item: T) -> Result<Option<T>, NodeError> {
        let len = self.items.len();
        if index == len {
            self.items.push(item);
            Ok(None)
        } else if index < len {
            Ok(Some(std::mem::replace(&mut self.items[index], item)))
        } else {
            Err(NodeError::IndexOutOfBounds { index, len })
        }
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::IndexOutOfBounds` for a missing index.
    pub fn unset(&mut self, index: usize) -> Result<T, NodeError> {
        let len = self.items.len();
        if index < len {
            Ok(self.items.remove(index))
        } else {
            Err(NodeError::IndexOutOfBounds { index, len })
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the whole contents of the list.
    pub fn replace(&mut self, items: impl IntoIterator<Item = T>) {
        self.items = items.into_iter().collect();
    }

    /// Appends the contents of each collection in turn.
    pub fn merge<I>(&mut self, collections: impl IntoIterator<Item = I>)
    where
        I: IntoIterator<Item = T>,
    {
        for collection in collections {
            self.items.extend(collection);
        }
    }

    /// Returns the index of the element living at `node`.
    #[must_use]
    pub fn position_of(&self, node: *const T) -> Option<usize> {
        self.items.iter().position(|item| ptr::eq(item, node))
    }

    /// Replaces the element living at `old` with `new`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::NotAChild` if `old` does not point into this list.
    pub fn replace_child(&mut self, old: *const T, new: T) -> Result<T, NodeError> {
        let index = self.position_of(old).ok_or(NodeError::NotAChild)?;
        Ok(std::mem::replace(&mut self.items[index], new))
    }

    /// Removes the element living at `node`.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::NotAChild` if `node` does not point into this list.
    pub fn remove_child(&mut self, node: *const T) -> Result<T, NodeError> {
        let index = self.position_of(node).ok_or(NodeError::NotAChild)?;
        Ok(self.items.remove(index))
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for NodeList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for NodeList<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for NodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NodeList<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_unset() {
        let mut list: NodeList<i32> = vec![1, 2].into();
        assert_eq!(list.set(0, 10), Ok(Some(1)));
        assert_eq!(list.set(2, 3), Ok(None));
        assert_eq!(
            list.set(5, 0),
            Err(NodeError::IndexOutOfBounds { index: 5, len: 3 })
        );
        assert_eq!(list.unset(1), Ok(2));
        assert_eq!(&*list, &[10, 3]);
        assert!(list.unset(2).is_err());
    }

    #[test]
    fn test_merge_and_replace() {
        let mut list: NodeList<i32> = NodeList::new();
        list.merge([vec![1, 2], vec![3]]);
        assert_eq!(list.len(), 3);
        list.replace([7]);
        assert_eq!(&*list, &[7]);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_replace_child_by_identity() {
        let mut list: NodeList<String> = vec!["a".to_string(), "a".to_string()].into();
        let second: *const String = &list[1];
        let old = list.replace_child(second, "b".to_string()).unwrap();
        assert_eq!(old, "a");
        assert_eq!(&*list, &["a".to_string(), "b".to_string()]);

        let outsider = "a".to_string();
        assert_eq!(
            list.replace_child(&outsider, "c".to_string()),
            Err(NodeError::NotAChild)
        );

        let first: *const String = &list[0];
        assert_eq!(list.remove_child(first).unwrap(), "a");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let list: NodeList<Vec<i32>> = vec![vec![1]].into();
        let mut copy = list.clone();
        copy[0].push(2);
        assert_eq!(list[0], vec![1]);
        assert_eq!(copy[0], vec![1, 2]);
    }
}
