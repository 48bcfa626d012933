//! Mock conversation capability.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use viewfinder_core::{ConversationRecord, ConversationStatus, Turn};
use viewfinder_error::{HttpError, ViewfinderError, ViewfinderResult};
use viewfinder_interface::ConversationSource;

/// Mock conversation source that walks through a status sequence.
///
/// The last status repeats once the sequence runs out. Turns are returned
/// with every record.
#[derive(Debug)]
pub struct MockConversationSource {
    statuses: Mutex<Vec<ConversationStatus>>,
    turns: Vec<Turn>,
    unreachable: bool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockConversationSource {
    /// Report `statuses` in order, with `turns`.
    pub fn new(statuses: Vec<ConversationStatus>, turns: Vec<Turn>) -> Self {
        Self {
            statuses: Mutex::new(statuses),
            turns,
            unreachable: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A conversation that is already done.
    pub fn done(turns: Vec<Turn>) -> Self {
        Self::new(vec![ConversationStatus::Done], turns)
    }

    /// A conversation that never leaves processing.
    pub fn stuck() -> Self {
        Self::new(vec![ConversationStatus::Processing], Vec::new())
    }

    /// A capability that errors on every query.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new(Vec::new(), Vec::new())
        }
    }

    /// Number of queries made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConversationSource for MockConversationSource {
    async fn get(&self, conversation_id: &str) -> ViewfinderResult<ConversationRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(ViewfinderError::from(HttpError::new("connection refused")));
        }

        let status = {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.len() > 1 {
                statuses.remove(0)
            } else {
                statuses
                    .first()
                    .copied()
                    .unwrap_or(ConversationStatus::Processing)
            }
        };

        Ok(ConversationRecord {
            conversation_id: conversation_id.to_string(),
            status,
            turns: self.turns.clone(),
        })
    }
}
