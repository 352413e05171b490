// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by adapter lookups and mutations.

use crate::ViewType;

/// Failure of a position or view-type lookup.
///
/// Neither case is recoverable by retrying: both indicate that the host and
/// the adapter disagree about the item sequence or the registered rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DelegateError {
    /// The position is outside `0..len`.
    #[error("position {position} is out of range for {len} items")]
    OutOfRange {
        /// The requested position.
        position: usize,
        /// Number of item slots at the time of the call.
        len: usize,
    },
    /// No registered delegate carries this view type.
    #[error("no delegate is registered for view type {0}")]
    UnknownViewType(ViewType),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::DelegateError;
    use crate::ViewType;

    #[test]
    fn messages_name_the_offending_values() {
        let err = DelegateError::OutOfRange {
            position: 5,
            len: 3,
        };
        assert_eq!(err.to_string(), "position 5 is out of range for 3 items");

        let err = DelegateError::UnknownViewType(ViewType::new(9));
        assert_eq!(err.to_string(), "no delegate is registered for view type #9");
    }
}
