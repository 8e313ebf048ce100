//! Validation schemas and the field error mapping a validation pass produces.

use std::collections::BTreeMap;

use crate::form::FormModel;

/// Error messages keyed by field.
///
/// Iteration follows the field's `Ord`, which for every field enum in this
/// crate is declaration order, so [`FieldErrors::first`] is the field a user
/// should be sent to first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    inner: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. Only the first message per field is kept.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.inner.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.inner.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.inner.contains_key(&field)
    }

    /// The first invalid field in declaration order.
    pub fn first(&self) -> Option<F> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.inner.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// A set of validation rules for a form model.
///
/// Implementations must be pure: the same values always produce the same
/// result, and validation never touches the network.
pub trait Schema<M: FormModel> {
    /// Typed value produced when every field passes.
    type Output;

    fn validate(&self, values: &M) -> Result<Self::Output, FieldErrors<M::Field>>;
}
