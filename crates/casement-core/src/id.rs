//! Identifiers shared across the toolkit.

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for an element in an element tree.
    ///
    /// IDs are generational: once an element is destroyed its ID never
    /// resolves again, even if the slot is reused.
    pub struct ElementId;
}

/// Handle to a node created by a scene backend.
///
/// The toolkit never interprets the value; it only hands it back to the
/// backend that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderNodeId(pub u64);

impl RenderNodeId {
    /// Get the raw u64 value of this node ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}
