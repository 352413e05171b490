// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adapter: owned item slots plus a rule registry.

use alloc::vec::Vec;
use core::fmt;

use crate::damage::{ItemChange, ItemDamage};
use crate::{DelegateError, DelegateSet, ListAdapter, ViewType};

/// Item slots and delegates for one list.
///
/// Type parameters:
/// - `T`: the item type.
/// - `V`: the view handle returned by creators and passed to binders.
/// - `C`: the container passed to creators (for example a parent widget).
///
/// Each slot holds either an item or a placeholder (`None`). Placeholders have
/// no view type and are never bound; hosts typically leave those rows blank
/// until the item arrives via [`set`](Self::set).
///
/// Rules should be registered before the adapter is handed to a host. Mutations
/// after that point are recorded and reported by [`commit`](Self::commit).
pub struct DelegateAdapter<T, V, C: ?Sized> {
    slots: Vec<Option<T>>,
    delegates: DelegateSet<T, V, C>,
    pending: ItemDamage,
}

impl<T, V, C: ?Sized> Default for DelegateAdapter<T, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, V, C: ?Sized> fmt::Debug for DelegateAdapter<T, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateAdapter")
            .field("slots", &self.slots)
            .field("delegates", &self.delegates)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<T, V, C: ?Sized> DelegateAdapter<T, V, C> {
    /// Creates an adapter with no items and no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::from_slots(Vec::new())
    }

    /// Creates an adapter over `items`, all present.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self::from_slots(items.into_iter().map(Some))
    }

    /// Creates an adapter over `slots`, where `None` marks a placeholder.
    #[must_use]
    pub fn from_slots(slots: impl IntoIterator<Item = Option<T>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            delegates: DelegateSet::new(),
            pending: ItemDamage::default(),
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_rule(
        mut self,
        matches: impl Fn(&T) -> bool + 'static,
        create: impl FnMut(&mut C) -> V + 'static,
        bind: impl FnMut(&mut V, &T) + 'static,
    ) -> Self {
        self.register(matches, create, bind);
        self
    }

    /// Builder form of [`register_fallback`](Self::register_fallback).
    #[must_use]
    pub fn with_fallback(
        mut self,
        create: impl FnMut(&mut C) -> V + 'static,
        bind: impl FnMut(&mut V, &T) + 'static,
    ) -> Self {
        self.register_fallback(create, bind);
        self
    }

    /// Registers a rule with the next view type.
    ///
    /// Items are matched against rules in registration order; the first
    /// accepting rule decides the view type, creator, and binder.
    pub fn register(
        &mut self,
        matches: impl Fn(&T) -> bool + 'static,
        create: impl FnMut(&mut C) -> V + 'static,
        bind: impl FnMut(&mut V, &T) + 'static,
    ) -> &mut Self {
        self.delegates.push(matches, create, bind);
        self
    }

    /// Registers a rule that accepts every item.
    ///
    /// Rules registered after a fallback are unreachable.
    pub fn register_fallback(
        &mut self,
        create: impl FnMut(&mut C) -> V + 'static,
        bind: impl FnMut(&mut V, &T) + 'static,
    ) -> &mut Self {
        self.register(|_| true, create, bind)
    }

    /// Registered rules.
    #[must_use]
    pub fn delegates(&self) -> &DelegateSet<T, V, C> {
        &self.delegates
    }

    /// Number of slots, including placeholders.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in position order.
    #[must_use]
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    /// Iterates slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// The item at `position`, or `Ok(None)` for a placeholder.
    pub fn item_at(&self, position: usize) -> Result<Option<&T>, DelegateError> {
        self.slots
            .get(position)
            .map(Option::as_ref)
            .ok_or_else(|| self.out_of_range(position))
    }

    /// View type of the first rule accepting the item at `position`.
    ///
    /// Returns `Ok(None)` for placeholders and for items no rule accepts.
    pub fn view_type_for(&self, position: usize) -> Result<Option<ViewType>, DelegateError> {
        let Some(item) = self.item_at(position)? else {
            return Ok(None);
        };
        let ty = self.delegates.resolve(item);
        if ty.is_none() {
            tracing::debug!(position, "no delegate matches item");
        }
        Ok(ty)
    }

    /// Creates a view with the creator registered for `view_type`.
    pub fn create_view(
        &mut self,
        view_type: ViewType,
        container: &mut C,
    ) -> Result<V, DelegateError> {
        self.delegates.create(view_type, container)
    }

    /// Binds `view` to the item at `position` with the first accepting rule.
    ///
    /// Placeholders and unmatched items are skipped without calling any binder;
    /// the return value is then `Ok(None)`.
    pub fn bind_view(
        &mut self,
        view: &mut V,
        position: usize,
    ) -> Result<Option<ViewType>, DelegateError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get(position)
            .ok_or(DelegateError::OutOfRange { position, len })?;
        let Some(item) = slot else {
            return Ok(None);
        };
        let bound = self.delegates.bind(view, item);
        if bound.is_none() {
            tracing::debug!(position, "no delegate matches item; bind skipped");
        }
        Ok(bound)
    }

    /// Appends an item.
    pub fn push(&mut self, item: T) {
        self.push_slot(Some(item));
    }

    /// Appends a placeholder.
    pub fn push_placeholder(&mut self) {
        self.push_slot(None);
    }

    fn push_slot(&mut self, slot: Option<T>) {
        let start = self.slots.len();
        self.slots.push(slot);
        self.pending.record(ItemChange::Inserted { start, count: 1 });
    }

    /// Appends all `items`.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        let start = self.slots.len();
        self.slots.extend(items.into_iter().map(Some));
        let count = self.slots.len() - start;
        if count > 0 {
            self.pending.record(ItemChange::Inserted { start, count });
        }
    }

    /// Inserts a slot at `position`, shifting later slots back.
    ///
    /// `position` may equal [`item_count`](Self::item_count) to append.
    pub fn insert(&mut self, position: usize, slot: Option<T>) -> Result<(), DelegateError> {
        if position > self.slots.len() {
            return Err(self.out_of_range(position));
        }
        self.slots.insert(position, slot);
        self.pending.record(ItemChange::Inserted {
            start: position,
            count: 1,
        });
        Ok(())
    }

    /// Removes the slot at `position` and returns its item, if any.
    pub fn remove(&mut self, position: usize) -> Result<Option<T>, DelegateError> {
        self.check(position)?;
        let slot = self.slots.remove(position);
        self.pending.record(ItemChange::Removed {
            start: position,
            count: 1,
        });
        Ok(slot)
    }

    /// Replaces the slot at `position` and returns the previous item, if any.
    pub fn set(&mut self, position: usize, slot: Option<T>) -> Result<Option<T>, DelegateError> {
        self.check(position)?;
        let previous = core::mem::replace(&mut self.slots[position], slot);
        self.pending.record(ItemChange::Changed { position });
        Ok(previous)
    }

    /// Moves the slot at `from` so that it ends up at `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), DelegateError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        self.pending.record(ItemChange::Moved { from, to });
        Ok(())
    }

    /// Replaces every slot.
    pub fn replace_all(&mut self, slots: impl IntoIterator<Item = Option<T>>) {
        self.slots.clear();
        self.slots.extend(slots);
        self.pending.record(ItemChange::Reset);
    }

    /// Removes every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.pending.record(ItemChange::Reset);
    }

    /// Returns the changes made since the previous commit and clears them.
    pub fn commit(&mut self) -> ItemDamage {
        let damage = core::mem::take(&mut self.pending);
        tracing::trace!(changes = damage.changes.len(), "committed item changes");
        damage
    }

    fn check(&self, position: usize) -> Result<(), DelegateError> {
        if position < self.slots.len() {
            Ok(())
        } else {
            Err(self.out_of_range(position))
        }
    }

    fn out_of_range(&self, position: usize) -> DelegateError {
        DelegateError::OutOfRange {
            position,
            len: self.slots.len(),
        }
    }
}

impl<T, V, C: ?Sized> ListAdapter for DelegateAdapter<T, V, C> {
    type Item = T;
    type View = V;
    type Container = C;

    fn item_count(&self) -> usize {
        self.item_count()
    }

    fn view_type(&self, position: usize) -> Result<Option<ViewType>, DelegateError> {
        self.view_type_for(position)
    }

    fn create_view(
        &mut self,
        view_type: ViewType,
        container: &mut C,
    ) -> Result<V, DelegateError> {
        self.create_view(view_type, container)
    }

    fn bind_view(
        &mut self,
        view: &mut V,
        position: usize,
    ) -> Result<Option<ViewType>, DelegateError> {
        self.bind_view(view, position)
    }
}
