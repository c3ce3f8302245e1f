//! Discovery of pending-video markers in a server-rendered page.

use scraper::{Html, Selector};

use crate::status::VideoId;

/// Elements the server tags while a video is still generating.
const PENDING_SELECTOR: &str = r#"[data-video-pending="true"]"#;
const VIDEO_ID_ATTR: &str = "data-video-id";

/// A video the page marked as still generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVideo {
    pub id: VideoId,
}

/// Scan a document for pending videos.
///
/// Elements without a usable `data-video-id` are skipped silently; a
/// placeholder rendered without an id cannot be polled.
pub fn discover_pending(html: &str) -> Vec<PendingVideo> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PENDING_SELECTOR).unwrap();

    document
        .select(&selector)
        .filter_map(|element| {
            let id = element.value().attr(VIDEO_ID_ATTR)?;
            if id.is_empty() {
                return None;
            }
            Some(PendingVideo {
                id: VideoId(id.to_string()),
            })
        })
        .collect()
}
