//! Notifications and the bus delivering them
//!
//! The bus only records who listens to what. Delivery is done by
//! [`ComplexCells`](crate::ComplexCells), which hands each notification to
//! its subscribers in registration order.

use dmn_cells_core::CellKey;
use dmn_cells_feel::DataType;
use std::fmt;

/// Notification topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CellRender,
    SimpleModeActivated,
    SimpleModeDeactivated,
    DataTypeEdited,
    AllowedValuesEdited,
    ContentNodeCreated,
    ComplexCellOpen,
    ComplexCellClose,
}

impl Topic {
    /// Topic name as used by the grid
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::CellRender => "cell.render",
            Topic::SimpleModeActivated => "simpleMode.activated",
            Topic::SimpleModeDeactivated => "simpleMode.deactivated",
            Topic::DataTypeEdited => "typeRow.editDataType",
            Topic::AllowedValuesEdited => "typeRow.editAllowedValues",
            Topic::ContentNodeCreated => "contentNode.created",
            Topic::ComplexCellOpen => "complexCell.open",
            Topic::ComplexCellClose => "complexCell.close",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A cell was (re)drawn
    CellRender { cell: CellKey },
    /// Simple mode was switched on
    SimpleModeActivated,
    /// Simple mode was switched off
    SimpleModeDeactivated,
    /// A column's data type changed
    DataTypeEdited,
    /// A column's declared value list changed
    AllowedValuesEdited,
    /// Rows or cells were inserted
    ContentNodeCreated,
    /// The overlay of a cell was opened
    ComplexCellOpen { cell: CellKey },
    /// The overlay of a cell was closed
    ComplexCellClose { cell: CellKey },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::CellRender { .. } => Topic::CellRender,
            Event::SimpleModeActivated => Topic::SimpleModeActivated,
            Event::SimpleModeDeactivated => Topic::SimpleModeDeactivated,
            Event::DataTypeEdited => Topic::DataTypeEdited,
            Event::AllowedValuesEdited => Topic::AllowedValuesEdited,
            Event::ContentNodeCreated => Topic::ContentNodeCreated,
            Event::ComplexCellOpen { .. } => Topic::ComplexCellOpen,
            Event::ComplexCellClose { .. } => Topic::ComplexCellClose,
        }
    }
}

/// Handle identifying one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
struct Listener {
    id: SubscriptionId,
    topic: Topic,
    owner: DataType,
}

/// Subscription registry keyed by topic
#[derive(Debug, Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe an editor to a topic
    pub fn on(&mut self, topic: Topic, owner: DataType) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, topic, owner });
        id
    }

    /// Remove a subscription; `false` if it was already gone
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// Subscribe an editor to several topics at once
    pub fn subscribe(&mut self, owner: DataType, topics: &[Topic]) -> Registration {
        Registration {
            ids: topics.iter().map(|&topic| self.on(topic, owner)).collect(),
        }
    }

    /// Editors listening to a topic, in registration order
    pub fn subscribers(&self, topic: Topic) -> Vec<DataType> {
        self.listeners
            .iter()
            .filter(|listener| listener.topic == topic)
            .map(|listener| listener.owner)
            .collect()
    }

    /// Total number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// The subscriptions an editor holds
///
/// Released when the editor is torn down so no handler outlives it.
#[derive(Debug, Default)]
pub struct Registration {
    ids: Vec<SubscriptionId>,
}

impl Registration {
    /// Drop every subscription from the bus; returns how many were live
    pub fn release(&mut self, bus: &mut EventBus) -> usize {
        self.ids.drain(..).filter(|&id| bus.off(id)).count()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_in_registration_order() {
        let mut bus = EventBus::new();
        bus.on(Topic::ComplexCellOpen, DataType::String);
        bus.on(Topic::ComplexCellOpen, DataType::Number);
        bus.on(Topic::CellRender, DataType::Date);

        assert_eq!(
            bus.subscribers(Topic::ComplexCellOpen),
            vec![DataType::String, DataType::Number]
        );
        assert!(bus.subscribers(Topic::ContentNodeCreated).is_empty());
    }

    #[test]
    fn test_registration_release() {
        let mut bus = EventBus::new();
        let mut number = bus.subscribe(
            DataType::Number,
            &[Topic::SimpleModeActivated, Topic::SimpleModeDeactivated],
        );
        let _string = bus.subscribe(DataType::String, &[Topic::SimpleModeActivated]);
        assert_eq!(number.len(), 2);
        assert_eq!(bus.listener_count(), 3);

        assert_eq!(number.release(&mut bus), 2);
        assert!(number.is_empty());
        assert_eq!(
            bus.subscribers(Topic::SimpleModeActivated),
            vec![DataType::String]
        );

        // releasing twice is harmless
        assert_eq!(number.release(&mut bus), 0);
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::DataTypeEdited.to_string(), "typeRow.editDataType");
        assert_eq!(
            Event::CellRender {
                cell: CellKey::new("r", "c")
            }
            .topic(),
            Topic::CellRender
        );
    }
}
