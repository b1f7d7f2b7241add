use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{KonspektError, Result};

/// One timed caption segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// External transcript-retrieval collaborator, keyed by video id.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Returns the ordered caption segments for a video.
    ///
    /// Fails with [`KonspektError::NoTranscript`] when the video has no
    /// caption track, [`KonspektError::TranscriptsDisabled`] when captions
    /// are turned off for the video, and
    /// [`KonspektError::TranscriptFetchFailed`] for everything else.
    async fn fetch(&self, video_id: &str) -> Result<Vec<Segment>>;
}

const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";

/// Caption client backed by YouTube's innertube player API.
///
/// Uses the Android client context, which serves caption tracks without the
/// throttling applied to the web client.
pub struct InnertubeClient {
    http: reqwest::Client,
}

impl InnertubeClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn player_response(&self, video_id: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(PLAYER_URL)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "context": {
                    "client": {
                        "clientName": "ANDROID",
                        "clientVersion": "20.10.38",
                        "androidSdkVersion": 30,
                    }
                },
                "videoId": video_id,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;
        Ok(response)
    }

    async fn fetch_track(&self, base_url: &str) -> Result<Vec<Segment>> {
        let track_url = format!("{}&fmt=json3", base_url);
        let track = self
            .http
            .get(&track_url)
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        Ok(parse_json3_events(&track))
    }
}

impl Default for InnertubeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for InnertubeClient {
    async fn fetch(&self, video_id: &str) -> Result<Vec<Segment>> {
        let player = self.player_response(video_id).await?;

        let status = player["playabilityStatus"]["status"].as_str().unwrap_or("");
        if status != "OK" {
            let reason = player["playabilityStatus"]["reason"]
                .as_str()
                .unwrap_or(status)
                .to_string();
            return Err(KonspektError::TranscriptFetchFailed {
                video_id: video_id.to_string(),
                reason,
            });
        }

        let Some(renderer) = player["captions"]["playerCaptionsTracklistRenderer"].as_object()
        else {
            return Err(KonspektError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            });
        };

        let Some(base_url) = renderer
            .get("captionTracks")
            .and_then(|tracks| tracks.as_array())
            .and_then(|tracks| tracks.first())
            .and_then(|track| track["baseUrl"].as_str())
        else {
            return Err(KonspektError::NoTranscript {
                video_id: video_id.to_string(),
            });
        };

        self.fetch_track(base_url).await
    }
}

/// Flatten a `fmt=json3` caption payload into timed segments.
fn parse_json3_events(track: &serde_json::Value) -> Vec<Segment> {
    let Some(events) = track["events"].as_array() else {
        return Vec::new();
    };

    events
        .iter()
        .filter_map(|event| {
            let start_ms = event["tStartMs"].as_f64()?;
            let duration_ms = event["dDurationMs"].as_f64().unwrap_or(0.0);
            let text = event["segs"]
                .as_array()?
                .iter()
                .filter_map(|seg| seg["utf8"].as_str())
                .collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                start: start_ms / 1000.0,
                end: (start_ms + duration_ms) / 1000.0,
                text: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json3_events_flatten_into_segments() {
        let track = serde_json::json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 1500, "segs": [{"utf8": "never gonna"}, {"utf8": " give"}]},
                {"tStartMs": 1500, "dDurationMs": 900, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2400, "dDurationMs": 1100, "segs": [{"utf8": "you up"}]},
                {"tStartMs": 3500}
            ]
        });

        let segments = parse_json3_events(&track);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "never gonna give");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 1.5);
        assert_eq!(segments[1].text, "you up");
        assert_eq!(segments[1].start, 2.4);
    }

    #[test]
    fn missing_events_yield_no_segments() {
        let track = serde_json::json!({"wireMagic": "pb3"});
        assert!(parse_json3_events(&track).is_empty());
    }
}
