// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-type identifiers handed to a host's recycling pool.

use core::fmt;

/// Raw value used by hosts that encode "no renderable type" as a signed integer.
pub const NO_VIEW_TYPE: i32 = -1;

/// Identifier for a structurally distinct row layout.
///
/// Ids are assigned by [`DelegateSet`](crate::DelegateSet) in registration order,
/// starting at `0`. A host recycling pool should only reuse a view for a position
/// whose resolved type is equal to the type the view was created for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewType(u32);

impl ViewType {
    /// Creates a view type from its numeric id.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Encodes an optional view type as a signed integer, using [`NO_VIEW_TYPE`] for `None`.
    ///
    /// Ids above `i32::MAX` cannot be represented and also map to [`NO_VIEW_TYPE`].
    ///
    /// ```
    /// use understory_delegate_list::{NO_VIEW_TYPE, ViewType};
    ///
    /// assert_eq!(ViewType::to_raw(Some(ViewType::new(3))), 3);
    /// assert_eq!(ViewType::to_raw(None), NO_VIEW_TYPE);
    /// ```
    #[must_use]
    pub fn to_raw(ty: Option<Self>) -> i32 {
        ty.and_then(|ty| i32::try_from(ty.0).ok())
            .unwrap_or(NO_VIEW_TYPE)
    }

    /// Decodes a signed host value. Negative values mean "no type".
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out sequential view types, starting at `0`.
#[derive(Clone, Debug, Default)]
pub(crate) struct ViewTypeGenerator {
    next: u32,
}

impl ViewTypeGenerator {
    /// Returns the next id and advances the counter.
    pub(crate) fn next_type(&mut self) -> ViewType {
        let ty = ViewType(self.next);
        debug_assert!(self.next < u32::MAX, "view type ids exhausted");
        self.next = self.next.saturating_add(1);
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::{NO_VIEW_TYPE, ViewType, ViewTypeGenerator};

    #[test]
    fn generator_counts_up_from_zero() {
        let mut generator = ViewTypeGenerator::default();
        assert_eq!(generator.next_type().get(), 0);
        assert_eq!(generator.next_type().get(), 1);
        assert_eq!(generator.next_type().get(), 2);
    }

    #[test]
    fn raw_encoding_uses_sentinel_for_none() {
        assert_eq!(ViewType::to_raw(None), NO_VIEW_TYPE);
        assert_eq!(ViewType::to_raw(Some(ViewType::new(7))), 7);
        assert_eq!(ViewType::from_raw(NO_VIEW_TYPE), None);
        assert_eq!(ViewType::from_raw(-42), None);
        assert_eq!(ViewType::from_raw(0), Some(ViewType::new(0)));
    }

    #[test]
    fn ids_beyond_i32_range_are_not_representable() {
        let ty = ViewType::new(u32::MAX);
        assert_eq!(ViewType::to_raw(Some(ty)), NO_VIEW_TYPE);
    }
}
