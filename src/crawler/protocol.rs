//! Messages exchanged between the coordinator and its workers
//!
//! Workers pull work: each one announces that it is idle on a channel shared
//! by all workers, and the coordinator answers on that worker's own channel
//! with either a link to crawl or the termination signal.

use std::fmt;
use tokio::sync::mpsc;

/// Assignments a worker can have queued at once: one link still unread plus
/// the termination signal sent after the quota is met.
const ASSIGNMENT_BUFFER: usize = 2;

/// Identity of one worker; the coordinator itself is rank 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sent by a worker when it is ready for its next assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleAnnouncement {
    pub worker: WorkerId,
}

/// The coordinator's answer to an idle announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkAssignment {
    /// Crawl this article; the name is relative to the site root
    Link(String),

    /// No more work: the worker must exit
    Terminate,
}

/// Creates the channel carrying assignments to one worker
pub fn assignment_channel() -> (mpsc::Sender<WorkAssignment>, mpsc::Receiver<WorkAssignment>) {
    mpsc::channel(ASSIGNMENT_BUFFER)
}

/// Creates the channel all workers announce idleness on
///
/// A worker never has more than one unanswered announcement, so one slot per
/// worker means announcing never blocks.
pub fn request_channel(
    workers: u32,
) -> (mpsc::Sender<IdleAnnouncement>, mpsc::Receiver<IdleAnnouncement>) {
    mpsc::channel(workers.max(1) as usize)
}
