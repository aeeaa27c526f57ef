//! Tag-to-type dispatch table.
//!
//! Built once at startup and passed by reference into the decode loop.
//! Each slot holds the `MessageType` for that tag byte; the behavior for a
//! type is the exhaustive `match` in [`crate::decoder`].

use itch_core::MessageType;

/// Immutable mapping from tag byte to message type.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    entries: [Option<MessageType>; 256],
}

impl DispatchTable {
    /// Build the table for every ITCH 5.0 message type.
    pub fn new() -> Self {
        let mut entries = [None; 256];
        for msg_type in MessageType::ALL {
            entries[usize::from(msg_type.tag())] = Some(msg_type);
        }
        Self { entries }
    }

    /// Resolve a tag byte.
    #[inline]
    pub fn lookup(&self, tag: u8) -> Option<MessageType> {
        self.entries[usize::from(tag)]
    }

    /// Number of tags with a registered type.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_registered() {
        let table = DispatchTable::new();
        assert_eq!(table.len(), MessageType::ALL.len());
        for t in MessageType::ALL {
            assert_eq!(table.lookup(t.tag()), Some(t));
        }
    }

    #[test]
    fn test_unknown_tags_absent() {
        let table = DispatchTable::new();
        assert_eq!(table.lookup(b'Z'), None);
        assert_eq!(table.lookup(0x00), None);
        assert_eq!(table.lookup(0xff), None);
        // Tags are case-sensitive: 'h' is Operational Halt, 'H' Trading Action.
        assert_eq!(table.lookup(b'h'), Some(MessageType::OperationalHalt));
        assert_eq!(table.lookup(b'H'), Some(MessageType::StockTradingAction));
    }
}
