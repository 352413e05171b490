// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toy recycling host driving a `DelegateAdapter`.
//!
//! This example shows how a list widget would use the adapter:
//! - ask for the view type of each visible position,
//! - reuse a pooled view of that type or create a new one,
//! - bind the view to the position's item,
//! - and react to committed item changes.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example recycling_host`

use std::collections::HashMap;
use std::ops::Range;

use tracing_subscriber::EnvFilter;
use understory_delegate_list::{DelegateAdapter, DelegateError, ListAdapter, ViewType};

/// Chat transcript entries.
#[derive(Clone, Debug)]
enum Message {
    DateHeader(&'static str),
    Incoming(&'static str),
    Outgoing(&'static str),
}

/// Stand-in for a widget: a layout name plus its rendered text.
#[derive(Debug)]
struct Cell {
    layout: &'static str,
    serial: usize,
    text: String,
}

/// Stand-in for the parent widget; it hands out serial numbers to new cells.
#[derive(Debug, Default)]
struct Parent {
    created: usize,
}

impl Parent {
    fn make_cell(&mut self, layout: &'static str) -> Cell {
        self.created += 1;
        Cell {
            layout,
            serial: self.created,
            text: String::new(),
        }
    }
}

/// Minimal host: a visible window plus a per-type pool of detached views.
#[derive(Debug, Default)]
struct Host {
    parent: Parent,
    attached: Vec<(usize, ViewType, Cell)>,
    pool: HashMap<ViewType, Vec<Cell>>,
}

impl Host {
    /// Realizes `window`, recycling every view currently attached.
    fn show<A>(&mut self, adapter: &mut A, window: Range<usize>) -> Result<(), DelegateError>
    where
        A: ListAdapter<View = Cell, Container = Parent>,
    {
        for (_, ty, cell) in self.attached.drain(..) {
            self.pool.entry(ty).or_default().push(cell);
        }
        let end = window.end.min(adapter.item_count());
        for position in window.start..end {
            let Some(ty) = adapter.view_type(position)? else {
                println!("{position:>3}: <blank>");
                continue;
            };
            let mut cell = match self.pool.get_mut(&ty).and_then(Vec::pop) {
                Some(cell) => cell,
                None => adapter.create_view(ty, &mut self.parent)?,
            };
            adapter.bind_view(&mut cell, position)?;
            println!(
                "{position:>3}: [{} #{}] {}",
                cell.layout, cell.serial, cell.text
            );
            self.attached.push((position, ty, cell));
        }
        Ok(())
    }
}

fn main() -> Result<(), DelegateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let transcript = [
        Message::DateHeader("Monday"),
        Message::Incoming("hi!"),
        Message::Outgoing("hello"),
        Message::Incoming("lunch?"),
        Message::DateHeader("Tuesday"),
        Message::Outgoing("sure"),
        Message::Incoming("great"),
    ];

    let mut adapter = DelegateAdapter::<Message, Cell, Parent>::from_items(transcript)
        .with_rule(
            |m| matches!(m, Message::DateHeader(_)),
            |parent| parent.make_cell("header"),
            |cell, m| {
                if let Message::DateHeader(day) = m {
                    cell.text = format!("-- {day} --");
                }
            },
        )
        .with_rule(
            |m| matches!(m, Message::Outgoing(_)),
            |parent| parent.make_cell("bubble-right"),
            |cell, m| {
                if let Message::Outgoing(text) = m {
                    cell.text = format!("{text:>20}");
                }
            },
        )
        .with_fallback(
            |parent| parent.make_cell("bubble-left"),
            |cell, m| {
                if let Message::Incoming(text) = m {
                    cell.text = (*text).to_owned();
                }
            },
        );
    // Older history is still loading.
    adapter.push_placeholder();

    let mut host = Host::default();
    println!("window 0..4");
    host.show(&mut adapter, 0..4)?;
    println!("window 3..8");
    host.show(&mut adapter, 3..8)?;

    adapter.set(7, Some(Message::Outgoing("see you")))?;
    let damage = adapter.commit();
    println!("changes: {:?}", damage.changes);
    println!("window 3..8 after update");
    host.show(&mut adapter, 3..8)?;

    println!("views created: {}", host.parent.created);
    Ok(())
}
