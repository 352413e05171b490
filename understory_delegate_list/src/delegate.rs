// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule registry: ordered delegates with first-match-wins resolution.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::view_type::ViewTypeGenerator;
use crate::{DelegateError, ViewType};

type MatchFn<T> = Box<dyn Fn(&T) -> bool>;
type CreateFn<V, C> = Box<dyn FnMut(&mut C) -> V>;
type BindFn<T, V> = Box<dyn FnMut(&mut V, &T)>;

/// A registered rule: predicate, view type, creator, and binder.
///
/// Delegates are created by [`DelegateSet::push`] and never change afterwards.
pub struct Delegate<T: ?Sized, V, C: ?Sized> {
    view_type: ViewType,
    matches: MatchFn<T>,
    create: CreateFn<V, C>,
    bind: BindFn<T, V>,
}

impl<T: ?Sized, V, C: ?Sized> Delegate<T, V, C> {
    /// The view type assigned at registration.
    #[must_use]
    pub const fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// Returns `true` if this delegate's predicate accepts `item`.
    #[must_use]
    pub fn matches(&self, item: &T) -> bool {
        (self.matches)(item)
    }
}

impl<T: ?Sized, V, C: ?Sized> fmt::Debug for Delegate<T, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("view_type", &self.view_type)
            .finish_non_exhaustive()
    }
}

/// Ordered set of delegates.
///
/// Resolution scans delegates in registration order and stops at the first
/// predicate that accepts the item. A later rule is never chosen over an
/// earlier one, even if it is more specific, so catch-all rules belong last.
///
/// Rule counts are expected to be small (one per distinct row layout), so
/// lookups are linear scans over inline storage.
pub struct DelegateSet<T: ?Sized, V, C: ?Sized> {
    delegates: SmallVec<[Delegate<T, V, C>; 4]>,
    ids: ViewTypeGenerator,
}

impl<T: ?Sized, V, C: ?Sized> Default for DelegateSet<T, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, V, C: ?Sized> fmt::Debug for DelegateSet<T, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateSet")
            .field("delegates", &self.delegates)
            .field("ids", &self.ids)
            .finish()
    }
}

impl<T: ?Sized, V, C: ?Sized> DelegateSet<T, V, C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delegates: SmallVec::new(),
            ids: ViewTypeGenerator::default(),
        }
    }

    /// Appends a rule and returns the view type assigned to it.
    ///
    /// Shadowed rules (for example anything registered after a catch-all) are
    /// accepted but can never be selected.
    pub fn push(
        &mut self,
        matches: impl Fn(&T) -> bool + 'static,
        create: impl FnMut(&mut C) -> V + 'static,
        bind: impl FnMut(&mut V, &T) + 'static,
    ) -> ViewType {
        let view_type = self.ids.next_type();
        tracing::trace!(view_type = view_type.get(), "registered delegate");
        self.delegates.push(Delegate {
            view_type,
            matches: Box::new(matches),
            create: Box::new(create),
            bind: Box::new(bind),
        });
        view_type
    }

    /// Number of registered delegates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Returns `true` if no delegates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Iterates delegates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Delegate<T, V, C>> + '_ {
        self.delegates.iter()
    }

    /// Iterates assigned view types in registration order.
    pub fn view_types(&self) -> impl Iterator<Item = ViewType> + '_ {
        self.delegates.iter().map(Delegate::view_type)
    }

    /// Returns the view type of the first delegate that accepts `item`.
    #[must_use]
    pub fn resolve(&self, item: &T) -> Option<ViewType> {
        self.delegates
            .iter()
            .find(|d| d.matches(item))
            .map(Delegate::view_type)
    }

    /// Invokes the creator registered for `view_type`.
    pub fn create(&mut self, view_type: ViewType, container: &mut C) -> Result<V, DelegateError> {
        let delegate = self
            .delegates
            .iter_mut()
            .find(|d| d.view_type == view_type)
            .ok_or(DelegateError::UnknownViewType(view_type))?;
        Ok((delegate.create)(container))
    }

    /// Binds `view` to `item` with the first delegate that accepts it.
    ///
    /// Returns the view type of the delegate that performed the bind, or `None`
    /// if no rule matched and nothing was called.
    pub fn bind(&mut self, view: &mut V, item: &T) -> Option<ViewType> {
        let delegate = self.delegates.iter_mut().find(|d| (d.matches)(item))?;
        (delegate.bind)(view, item);
        Some(delegate.view_type)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::DelegateSet;
    use crate::{DelegateError, ViewType};

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn logging_set(log: &Log) -> DelegateSet<i32, String, ()> {
        let mut set = DelegateSet::new();
        let (c, b) = (log.clone(), log.clone());
        set.push(
            |n: &i32| n % 2 == 0,
            move |_: &mut ()| {
                c.borrow_mut().push("create even");
                String::from("even")
            },
            move |_: &mut String, _: &i32| b.borrow_mut().push("bind even"),
        );
        let (c, b) = (log.clone(), log.clone());
        set.push(
            |_: &i32| true,
            move |_: &mut ()| {
                c.borrow_mut().push("create any");
                String::from("any")
            },
            move |_: &mut String, _: &i32| b.borrow_mut().push("bind any"),
        );
        set
    }

    #[test]
    fn ids_follow_registration_order() {
        let log = Log::default();
        let set = logging_set(&log);
        let ids: Vec<u32> = set.view_types().map(ViewType::get).collect();
        assert_eq!(ids, [0, 1]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn first_match_wins_over_later_catch_all() {
        let log = Log::default();
        let set = logging_set(&log);
        assert_eq!(set.resolve(&4), Some(ViewType::new(0)));
        assert_eq!(set.resolve(&5), Some(ViewType::new(1)));
    }

    #[test]
    fn shadowed_rule_is_never_selected() {
        let mut set: DelegateSet<i32, (), ()> = DelegateSet::new();
        set.push(|_| true, |_| (), |_, _| {});
        let shadowed = set.push(|n| *n == 1, |_| (), |_, _| {});
        assert_eq!(shadowed, ViewType::new(1));
        assert_eq!(set.resolve(&1), Some(ViewType::new(0)));
    }

    #[test]
    fn unmatched_item_resolves_to_none_and_skips_bind() {
        let mut set: DelegateSet<i32, u8, ()> = DelegateSet::new();
        set.push(|n| *n > 0, |_| 0, |v, _| *v += 1);
        assert_eq!(set.resolve(&-3), None);

        let mut view = 0_u8;
        assert_eq!(set.bind(&mut view, &-3), None);
        assert_eq!(view, 0, "binder must not run for unmatched items");
    }

    #[test]
    fn create_and_bind_use_the_same_delegate() {
        let log = Log::default();
        let mut set = logging_set(&log);
        let ty = set.resolve(&6).unwrap();
        let mut view = set.create(ty, &mut ()).unwrap();
        assert_eq!(view, "even");
        assert_eq!(set.bind(&mut view, &6), Some(ty));
        assert_eq!(*log.borrow(), ["create even", "bind even"]);
    }

    #[test]
    fn unknown_view_type_is_an_error() {
        let log = Log::default();
        let mut set = logging_set(&log);
        let err = set.create(ViewType::new(9), &mut ()).unwrap_err();
        assert_eq!(err, DelegateError::UnknownViewType(ViewType::new(9)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsized_items_are_supported() {
        let mut set: DelegateSet<str, usize, ()> = DelegateSet::new();
        let header = set.push(|s| s.starts_with('#'), |_| 0, |v, s| *v = s.len());
        let body = set.push(|_| true, |_| 0, |v, s| *v = s.len());
        assert_eq!(set.resolve("# Title"), Some(header));
        assert_eq!(set.resolve("text"), Some(body));
    }
}
