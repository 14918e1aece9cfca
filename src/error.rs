use thiserror::Error;

/// The error returned by `get` when the class of a reference has no value.
///
/// This also happens when a value was set on a reference whose class was later merged
/// into a class with a different representative, see [`MergePolicy`].
///
/// [`MergePolicy`]: enum.MergePolicy.html
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("no value is stored for the equivalence class of `{reference}`")]
pub struct NoValueError {
    reference: String,
}

impl NoValueError {
    pub(crate) fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_owned(),
        }
    }

    /// The reference that was looked up.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}
