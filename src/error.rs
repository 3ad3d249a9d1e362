/// Errors returned by [`AvlTree`](crate::AvlTree) operations.
///
/// Duplicate inserts and deletes of absent values are not errors; they are
/// reported through the `bool` results of [`insert`](crate::AvlTree::insert)
/// and [`delete`](crate::AvlTree::delete).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum AvlError {
    /// The requested one-based position is outside `1..=len`.
    #[error("impossible value for k: {k} is outside 1..={len}")]
    InvalidArgument {
        /// The requested position.
        k: usize,
        /// Number of elements in the tree at the time of the call.
        len: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn message_names_the_bounds() {
        let error = AvlError::InvalidArgument { k: 0, len: 7 };
        assert_eq!(error.to_string(), "impossible value for k: 0 is outside 1..=7");
    }
}
