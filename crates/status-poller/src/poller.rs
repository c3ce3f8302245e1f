//! The per-page poll loop.
//!
//! A page lifecycle owns one [`StatusPoller`]: it is initialized against the
//! freshly loaded document, polls every pending video it found, and ends
//! when the first video settles. The caller then reloads the page, which
//! restarts the whole cycle against the new document.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::client::StatusSource;
use crate::discovery::{self, PendingVideo};
use crate::status::{StatusResponse, VideoId, VideoState};

/// Delay between settled status requests. Fixed interval, no backoff, no
/// retry cap.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Terminal result of one video's poll loop.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Generation finished with a playable URL.
    Completed { video_url: String },
    /// Generation failed server-side. Reloading lets the server render
    /// whatever failure state it now has.
    Failed { response: StatusResponse },
}

/// The event that demands a page reload.
#[derive(Debug, Clone)]
pub struct ReloadTrigger {
    pub video_id: VideoId,
    pub outcome: PollOutcome,
}

/// Polls every pending video of one page lifecycle.
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    pending: Vec<PendingVideo>,
}

impl StatusPoller {
    /// Scan a freshly loaded document for pending videos.
    ///
    /// Called once per page lifecycle; no request is issued until
    /// [`run`](Self::run).
    pub fn initialize(document: &str, source: Arc<dyn StatusSource>) -> Self {
        let pending = discovery::discover_pending(document);
        Self { source, pending }
    }

    /// Build a poller from an already-known pending set.
    pub fn with_pending(pending: Vec<PendingVideo>, source: Arc<dyn StatusSource>) -> Self {
        Self { source, pending }
    }

    /// Videos this poller is watching.
    pub fn pending(&self) -> &[PendingVideo] {
        &self.pending
    }

    /// Poll until one video reaches a terminal state.
    ///
    /// Returns `None` when the page has nothing pending. Otherwise the
    /// first terminal outcome wins; dropping the `JoinSet` aborts the
    /// remaining loops, the way a reload tears down every timer on the
    /// page.
    pub async fn run(self) -> Option<ReloadTrigger> {
        if self.pending.is_empty() {
            return None;
        }

        info!(count = self.pending.len(), "starting status polls");

        let mut tasks = JoinSet::new();
        for video in self.pending {
            let source = Arc::clone(&self.source);
            tasks.spawn(poll_video(source, video.id));
        }

        // Loop tasks only finish on a terminal outcome, so the first
        // completion is the reload trigger.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(trigger) => return Some(trigger),
                Err(err) => error!(error = %err, "poll task aborted"),
            }
        }

        None
    }
}

/// One video's schedule -> request -> decide loop.
///
/// Every iteration waits the full interval before the request, so there is
/// never more than one in-flight request per video. Failures of any kind
/// reschedule; only a terminal status returns.
async fn poll_video(source: Arc<dyn StatusSource>, id: VideoId) -> ReloadTrigger {
    loop {
        sleep(POLL_INTERVAL).await;

        let response = match source.fetch_status(&id).await {
            Ok(response) => response,
            Err(err) => {
                error!(video_id = %id, error = %err, "status poll failed");
                continue;
            }
        };

        match response.state() {
            VideoState::Ready { video_url } => {
                info!(video_id = %id, video_url = %video_url, "video completed");
                return ReloadTrigger {
                    video_id: id,
                    outcome: PollOutcome::Completed { video_url },
                };
            }
            VideoState::Failed => {
                error!(video_id = %id, response = ?response, "video generation failed");
                return ReloadTrigger {
                    video_id: id,
                    outcome: PollOutcome::Failed { response },
                };
            }
            VideoState::InProgress => {
                debug!(video_id = %id, status = %response.status, "video still generating");
            }
        }
    }
}
