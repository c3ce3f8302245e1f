use serde::{Deserialize, Serialize};

/// Opaque identifier of a generated video, as carried in the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(pub String);

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `GET /videos/{id}/status/`.
///
/// The server also echoes the upstream job id as `external_id`; it is kept
/// for diagnostics but never drives a decision. Unknown `status` strings
/// must survive deserialization, so the field stays a plain string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Decision view of a status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoState {
    /// Generation finished and the playable URL is known.
    Ready { video_url: String },
    /// Generation failed server-side.
    Failed,
    /// Still queued, still processing, or a shape we do not recognize.
    InProgress,
}

impl StatusResponse {
    /// Map the raw response onto the poll decision.
    ///
    /// `completed` counts as ready only once the URL is actually there; the
    /// server writes the status before the URL in some paths, so a bare
    /// `completed` means keep polling.
    pub fn state(&self) -> VideoState {
        match self.status.as_str() {
            "completed" => match self.video_url.as_deref() {
                Some(url) if !url.is_empty() => VideoState::Ready {
                    video_url: url.to_string(),
                },
                _ => VideoState::InProgress,
            },
            "failed" => VideoState::Failed,
            _ => VideoState::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, video_url: Option<&str>) -> StatusResponse {
        StatusResponse {
            status: status.to_string(),
            video_url: video_url.map(str::to_string),
            external_id: None,
        }
    }

    #[test]
    fn test_completed_with_url_is_ready() {
        let state = response("completed", Some("/media/42.mp4")).state();
        assert_eq!(
            state,
            VideoState::Ready {
                video_url: "/media/42.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_completed_without_url_is_in_progress() {
        assert_eq!(response("completed", None).state(), VideoState::InProgress);
        assert_eq!(
            response("completed", Some("")).state(),
            VideoState::InProgress
        );
    }

    #[test]
    fn test_failed_is_terminal_regardless_of_url() {
        assert_eq!(response("failed", None).state(), VideoState::Failed);
        assert_eq!(
            response("failed", Some("/media/7.mp4")).state(),
            VideoState::Failed
        );
    }

    #[test]
    fn test_non_terminal_statuses_keep_polling() {
        for status in ["pending", "processing", "queued", "something-new", ""] {
            assert_eq!(response(status, None).state(), VideoState::InProgress);
        }
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let parsed: StatusResponse = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(parsed.status, "pending");
        assert!(parsed.video_url.is_none());
        assert!(parsed.external_id.is_none());
    }

    #[test]
    fn test_deserialize_full_payload() {
        let parsed: StatusResponse = serde_json::from_str(
            r#"{"status":"completed","video_url":"/media/42.mp4","external_id":"job-9"}"#,
        )
        .unwrap();
        assert_eq!(parsed.status, "completed");
        assert_eq!(parsed.video_url.as_deref(), Some("/media/42.mp4"));
        assert_eq!(parsed.external_id.as_deref(), Some("job-9"));
    }
}
