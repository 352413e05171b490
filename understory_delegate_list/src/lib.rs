// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_delegate_list --heading-base-level=0

//! Understory Delegate List: closure-based view-type dispatch for virtualized lists.
//!
//! Recycling list widgets need three answers per visible position: which view
//! *type* the row needs (so pooled views of that type can be reused), how to
//! create a view of that type, and how to bind a view to the row's data. This
//! crate lets callers supply those answers as ordered rules built from closures
//! instead of subclassing a toolkit adapter.
//!
//! The core concepts are:
//!
//! - [`DelegateSet`]: an ordered registry of rules. Each rule pairs a predicate
//!   with a creator and a binder and is assigned the next [`ViewType`]
//!   (`0`, `1`, `2`, … in registration order). The first rule whose predicate
//!   accepts an item wins.
//! - [`DelegateAdapter`]: owns the item slots and a [`DelegateSet`], answers
//!   position-based queries, and records item mutations as [`ItemDamage`]
//!   drained by [`DelegateAdapter::commit`].
//! - [`ListAdapter`]: the four calls a host list widget makes (count, type,
//!   create, bind). Toolkit integrations implement a shim that forwards to it.
//!
//! This crate deliberately does **not** virtualize, lay out, or pool views.
//! Host frameworks own the view instances and the recycling pool, and decide
//! which positions are visible (for example with `understory_virtual_list`).
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_delegate_list::{DelegateAdapter, ViewType};
//!
//! #[derive(Debug, PartialEq)]
//! enum Row {
//!     Even(String),
//!     Other(String),
//! }
//!
//! let mut adapter = DelegateAdapter::<i32, Row, ()>::from_items([2, 3, 4])
//!     .with_rule(
//!         |n| n % 2 == 0,
//!         |_| Row::Even(String::new()),
//!         |row, n| {
//!             if let Row::Even(text) = row {
//!                 *text = n.to_string();
//!             }
//!         },
//!     )
//!     .with_fallback(
//!         |_| Row::Other(String::new()),
//!         |row, n| {
//!             if let Row::Other(text) = row {
//!                 *text = n.to_string();
//!             }
//!         },
//!     );
//!
//! assert_eq!(adapter.view_type_for(0)?, Some(ViewType::new(0)));
//! assert_eq!(adapter.view_type_for(1)?, Some(ViewType::new(1)));
//!
//! // A host would reuse a pooled view of this type if it had one.
//! let ty = adapter.view_type_for(1)?.unwrap();
//! let mut row = adapter.create_view(ty, &mut ())?;
//! adapter.bind_view(&mut row, 1)?;
//! assert_eq!(row, Row::Other("3".into()));
//! # Ok::<(), understory_delegate_list::DelegateError>(())
//! ```
//!
//! ## Placeholders and change tracking
//!
//! Slots may be empty (`None`), for example while data is still loading.
//! Placeholders have no view type and are never bound. Mutations are batched:
//!
//! ```rust
//! use understory_delegate_list::{DelegateAdapter, ItemChange};
//!
//! let mut adapter = DelegateAdapter::<u32, (), ()>::from_slots([Some(1), None]);
//! assert_eq!(adapter.view_type_for(1)?, None);
//!
//! adapter.set(1, Some(2))?;
//! adapter.push(3);
//!
//! let damage = adapter.commit();
//! assert_eq!(
//!     damage.changes.as_slice(),
//!     [
//!         ItemChange::Changed { position: 1 },
//!         ItemChange::Inserted { start: 2, count: 1 },
//!     ]
//! );
//! # Ok::<(), understory_delegate_list::DelegateError>(())
//! ```
//!
//! Hosts that encode view types as signed integers can use
//! [`ViewType::to_raw`], which maps "no type" to [`NO_VIEW_TYPE`] (`-1`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod damage;
mod delegate;
mod error;
mod host;
mod view_type;

pub use adapter::DelegateAdapter;
pub use damage::{ItemChange, ItemDamage};
pub use delegate::{Delegate, DelegateSet};
pub use error::DelegateError;
pub use host::ListAdapter;
pub use view_type::{NO_VIEW_TYPE, ViewType};
