//! Post-adoption persistence hook.
//!
//! Durable storage is an external collaborator: the engine only promises
//! to call [`BlockSink::save`] for every block it adopts — mined locally
//! or received — and to keep going if the hook fails.

use std::fmt;

use crate::types::Block;

/// Callback invoked after a block is locally adopted.
pub trait BlockSink {
    /// Persists `block`. Failures are logged by the engine and never
    /// surface as engine errors.
    fn save(&mut self, block: &Block) -> Result<(), SinkError>;
}

/// Error reported by a persistence hook.
#[derive(Debug)]
pub struct SinkError(pub String);

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink error: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

/// Sink that drops every block.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl BlockSink for NullSink {
    fn save(&mut self, _block: &Block) -> Result<(), SinkError> {
        Ok(())
    }
}

/// In-memory sink retaining every saved block, for tests and small
/// devnets.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Blocks in adoption order.
    pub saved: Vec<Block>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockSink for MemorySink {
    fn save(&mut self, block: &Block) -> Result<(), SinkError> {
        self.saved.push(block.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_adoption_order() {
        let mut sink = MemorySink::new();
        sink.save(&Block::genesis()).expect("save");
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].block_id, 0);
    }

    #[test]
    fn sink_trait_is_object_safe() {
        fn use_trait_object(sink: &mut dyn BlockSink) {
            let _ = sink.save(&Block::genesis());
        }

        let mut sink = NullSink;
        use_trait_object(&mut sink);
    }
}
