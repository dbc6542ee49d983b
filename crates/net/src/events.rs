// ABOUTME: Aggregates per-episode download status updates into immutable snapshots.
// ABOUTME: A tokio task owns the map; producers send messages, consumers watch snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use podcore_model::{DownloadState, DownloadStatus};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Immutable view of every tracked download, keyed by media URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeDownloadEvent {
    statuses: Arc<HashMap<String, DownloadStatus>>,
}

impl EpisodeDownloadEvent {
    fn new(statuses: HashMap<String, DownloadStatus>) -> Self {
        Self {
            statuses: Arc::new(statuses),
        }
    }

    pub fn status(&self, url: &str) -> Option<DownloadStatus> {
        self.statuses.get(url).copied()
    }

    /// True while the download is queued or running.
    pub fn is_downloading(&self, url: &str) -> bool {
        self.status(url)
            .is_some_and(|s| s.state != DownloadState::Completed)
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.statuses.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("download event aggregator has shut down")]
pub struct AggregatorClosed;

#[derive(Debug)]
enum Message {
    Update { url: String, status: DownloadStatus },
    Remove { url: String },
    Shutdown,
}

/// Cloneable handle for download workers. Messages from one publisher are
/// applied in the order they were sent.
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    tx: mpsc::UnboundedSender<Message>,
}

impl StatusPublisher {
    pub fn update(&self, url: impl Into<String>, status: DownloadStatus) -> Result<(), AggregatorClosed> {
        self.send(Message::Update {
            url: url.into(),
            status,
        })
    }

    pub fn remove(&self, url: impl Into<String>) -> Result<(), AggregatorClosed> {
        self.send(Message::Remove { url: url.into() })
    }

    /// Asks the aggregator to stop after the messages already queued.
    pub fn shutdown(&self) -> Result<(), AggregatorClosed> {
        self.send(Message::Shutdown)
    }

    fn send(&self, message: Message) -> Result<(), AggregatorClosed> {
        self.tx.send(message).map_err(|_| AggregatorClosed)
    }
}

/// Owns the aggregation task. Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct DownloadEventAggregator {
    publisher: StatusPublisher,
    snapshots: watch::Receiver<EpisodeDownloadEvent>,
    task: JoinHandle<()>,
}

impl DownloadEventAggregator {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(EpisodeDownloadEvent::default());
        let task = tokio::spawn(run(rx, snapshot_tx));
        Self {
            publisher: StatusPublisher { tx },
            snapshots,
            task,
        }
    }

    pub fn publisher(&self) -> StatusPublisher {
        self.publisher.clone()
    }

    /// A receiver that is notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<EpisodeDownloadEvent> {
        self.snapshots.clone()
    }

    pub fn current(&self) -> EpisodeDownloadEvent {
        self.snapshots.borrow().clone()
    }

    /// Stops the task once queued messages are applied and returns the final snapshot.
    pub async fn shutdown(self) -> EpisodeDownloadEvent {
        // Already closed means the task has stopped on its own.
        let _ = self.publisher.shutdown();
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "download event aggregator task failed");
        }
        self.snapshots.borrow().clone()
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<Message>, snapshots: watch::Sender<EpisodeDownloadEvent>) {
    let mut statuses: HashMap<String, DownloadStatus> = HashMap::new();
    while let Some(message) = rx.recv().await {
        match message {
            Message::Update { url, status } => {
                if statuses.get(&url) == Some(&status) {
                    continue;
                }
                statuses.insert(url, status);
            }
            Message::Remove { url } => {
                if statuses.remove(&url).is_none() {
                    continue;
                }
            }
            Message::Shutdown => break,
        }
        snapshots.send_replace(EpisodeDownloadEvent::new(statuses.clone()));
    }
    tracing::debug!(tracked = statuses.len(), "download event aggregator stopped");
}
