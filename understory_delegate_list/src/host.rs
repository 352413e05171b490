// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a host list widget drives.
//!
//! A host toolkit wraps its own list/recycler component in a thin shim that
//! forwards these four calls. The host keeps ownership of view instances and of
//! the recycling pool; the adapter only answers which type a position needs and
//! how to create or bind a view of that type.
//!
//! ## Typical host loop
//!
//! For each position the host is about to show:
//!
//! 1. Ask [`ListAdapter::view_type`]. `None` means the position cannot be
//!    rendered and should be left blank.
//! 2. Reuse a pooled view of that type, or call [`ListAdapter::create_view`].
//! 3. Call [`ListAdapter::bind_view`] with the view and the position.

use crate::{DelegateError, ViewType};

/// Host-facing operations of a list adapter.
pub trait ListAdapter {
    /// Item type stored by the adapter.
    type Item;
    /// View handle created by the adapter and owned by the host.
    type View;
    /// Parent element passed to creators.
    type Container: ?Sized;

    /// Number of positions the host should show.
    fn item_count(&self) -> usize;

    /// View type for the item at `position`, or `None` if it has no renderable type.
    fn view_type(&self, position: usize) -> Result<Option<ViewType>, DelegateError>;

    /// Creates a new view of `view_type` inside `container`.
    fn create_view(
        &mut self,
        view_type: ViewType,
        container: &mut Self::Container,
    ) -> Result<Self::View, DelegateError>;

    /// Binds `view` to the item at `position`.
    ///
    /// Returns the view type of the rule that performed the bind, or `None`
    /// if nothing was bound.
    fn bind_view(
        &mut self,
        view: &mut Self::View,
        position: usize,
    ) -> Result<Option<ViewType>, DelegateError>;
}
