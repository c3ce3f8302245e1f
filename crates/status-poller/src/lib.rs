//! Status polling for asynchronously generated chat videos.
//!
//! The chat application renders a placeholder for every video that is still
//! generating, tagged with `data-video-pending="true"` and the video's id.
//! This crate discovers those markers in a page, polls each video's status
//! endpoint on a fixed interval, and reports when a terminal status calls
//! for the page to be reloaded.

pub mod client;
pub mod discovery;
pub mod error;
pub mod poller;
pub mod status;

pub use client::{HttpStatusSource, StatusSource};
pub use discovery::{discover_pending, PendingVideo};
pub use error::PollError;
pub use poller::{PollOutcome, ReloadTrigger, StatusPoller, POLL_INTERVAL};
pub use status::{StatusResponse, VideoId, VideoState};
