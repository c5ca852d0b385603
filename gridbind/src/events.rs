//! Event types flowing in from the widget and out to the host.
//!
//! The widget reports raw cell-level events as [`GridEvent`]s. The binding
//! turns them into [`HostEvent`]s and delivers them, in order, to every
//! subscriber registered with [`Subscribers::subscribe`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::data::{CellValue, SortColumn};

// =============================================================================
// Inbound
// =============================================================================

/// Raw pointer event behind a context-menu request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContextMenuEvent {
    /// Pointer position relative to the grid.
    pub x: f64,
    pub y: f64,
    /// Cell under the pointer, if any.
    pub row: Option<usize>,
    pub cell: Option<usize>,
}

/// Events fired by the grid widget.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// An editor is about to open on a cell.
    BeforeEditCell { row: usize, column_id: String },
    /// An editor committed a new value.
    CellChanged {
        row: usize,
        column_id: String,
        value: CellValue,
    },
    /// The cursor moved. `cell` is a grid ordinal (0 = row header).
    ActiveCellChanged { row: usize, cell: usize },
    /// The user asked to sort by one or more columns.
    Sort { columns: Vec<SortColumn> },
    /// The viewport scrolled to a vertical pixel offset.
    Scroll { scroll_top: f64 },
    ContextMenu(ContextMenuEvent),
    SelectedRowsChanged { rows: Vec<usize> },
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored.
    Ignored,
    /// Event was handled.
    Handled,
    /// Event was handled and the widget should skip its default behavior.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled (handled or consumed).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

// =============================================================================
// Outbound
// =============================================================================

/// Lifecycle events delivered to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The grid was built for the first time.
    LoadFinished,
    RowEditBegin { row: usize },
    /// A row with uncommitted changes was left.
    RowEditExit { row: usize },
    /// `column` is the data-column index from the column index.
    CellEditBegin { row: usize, column: usize },
    CellEditExit {
        row: usize,
        column: usize,
        new_value: CellValue,
    },
    ActiveRowChanged { row: usize },
    TopRowChanged { row: usize },
    ContextMenu(ContextMenuEvent),
    SelectedRowsChanged { rows: Vec<usize> },
}

/// Callback type for receiving host events.
pub type EventCallback = Box<dyn FnMut(&HostEvent)>;

/// Ordered list of host event subscribers.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Vec<EventCallback>,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Callbacks run in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&HostEvent) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Deliver one event to every subscriber.
    pub fn emit(&mut self, event: HostEvent) {
        log::trace!("[gridbind] emit {:?}", event);
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Simple event collector for testing and scripting.
///
/// Clones share the same buffer, so one clone can be moved into a
/// subscriber while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber callback that records into this collector.
    pub fn callback(&self) -> impl FnMut(&HostEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_run_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::new();
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            subscribers.subscribe(move |_| order.borrow_mut().push(tag));
        }
        subscribers.emit(HostEvent::LoadFinished);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_collector_take_drains() {
        let collector = EventCollector::new();
        let mut subscribers = Subscribers::new();
        subscribers.subscribe(collector.callback());
        subscribers.emit(HostEvent::RowEditBegin { row: 2 });
        subscribers.emit(HostEvent::TopRowChanged { row: 4 });

        assert_eq!(collector.len(), 2);
        assert_eq!(
            collector.take(),
            vec![HostEvent::RowEditBegin { row: 2 }, HostEvent::TopRowChanged { row: 4 }]
        );
        assert!(collector.is_empty());
    }

    #[test]
    fn test_event_result() {
        assert!(EventResult::Consumed.is_handled());
        assert!(EventResult::Handled.is_handled());
        assert!(!EventResult::Ignored.is_handled());
    }
}
