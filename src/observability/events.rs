//! Observable events
//!
//! Every log line names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    BootStart,
    ConfigLoaded,
    Serving,
    ShutdownComplete,

    // Item operations
    ItemsListed,
    ItemCreated,
    ItemRead,
    ItemReplaced,
    ItemDeleted,

    /// An operation returned an error
    OperationFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SERVER_LISTENING",
            Event::ShutdownComplete => "SHUTDOWN",

            Event::ItemsListed => "ITEM_LISTED",
            Event::ItemCreated => "ITEM_CREATED",
            Event::ItemRead => "ITEM_READ",
            Event::ItemReplaced => "ITEM_REPLACED",
            Event::ItemDeleted => "ITEM_DELETED",

            Event::OperationFailed => "OPERATION_FAILED",
        }
    }

    /// Mutating item operations
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Event::ItemCreated | Event::ItemReplaced | Event::ItemDeleted
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ItemCreated.as_str(), "ITEM_CREATED");
        assert_eq!(Event::Serving.to_string(), "SERVER_LISTENING");
    }

    #[test]
    fn test_write_events() {
        assert!(Event::ItemDeleted.is_write());
        assert!(!Event::ItemRead.is_write());
        assert!(!Event::ItemsListed.is_write());
    }
}
