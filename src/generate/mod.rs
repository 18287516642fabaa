// Post generation: produce the raw model output that extraction later mines.
//
// Two modes. Per-platform asks the model once per platform with a dedicated
// prompt, normalizes each reply into a `{"platform", "content"}` object, and
// joins them into a JSON array. Combined asks once for everything and hands
// back the reply untouched, in whatever shape the model chose.

pub mod client;
pub mod prompts;
pub mod traits;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::platform::Platform;
use traits::TextGenerator;

/// How to ask the model for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One request per platform, replies normalized and joined
    PerPlatform,
    /// A single request for all platforms, reply returned verbatim
    Combined,
}

/// Everything needed to generate posts for a set of platforms.
pub struct GenerationJob<'a> {
    /// Transcript or other material the posts are about
    pub source_text: &'a str,
    /// Free-form guidance placed at the top of every prompt
    pub instructions: &'a str,
    pub platforms: &'a [Platform],
    pub mode: Mode,
    /// Max in-flight requests in per-platform mode
    pub concurrency: usize,
}

/// Run a generation job and return the raw output to extract from.
pub async fn generate_raw_output(generator: &dyn TextGenerator, job: &GenerationJob<'_>) -> Result<String> {
    if job.source_text.trim().is_empty() {
        anyhow::bail!("Source text is empty, nothing to write posts about");
    }
    if job.platforms.is_empty() {
        anyhow::bail!("Select at least one platform");
    }

    match job.mode {
        Mode::Combined => {
            let request = prompts::combined_request(job.platforms, job.source_text, job.instructions);
            info!(platforms = job.platforms.len(), "Generating all platforms in one request");
            generator.generate(&request).await
        }
        Mode::PerPlatform => {
            info!(
                platforms = job.platforms.len(),
                concurrency = job.concurrency,
                "Generating one request per platform"
            );

            // `buffered` keeps results in the requested platform order.
            let entries: Vec<String> = stream::iter(job.platforms)
                .map(|platform| async move {
                    let request = prompts::platform_request(platform, job.source_text, job.instructions);
                    match generator.generate(&request).await {
                        Ok(reply) => normalize_tool_output(platform, &reply),
                        Err(e) => {
                            warn!(platform = platform.name(), error = %e, "Generation failed");
                            json!({
                                "platform": platform.name(),
                                "content": "",
                                "error": e.to_string(),
                            })
                            .to_string()
                        }
                    }
                })
                .buffered(job.concurrency.max(1))
                .collect()
                .await;

            Ok(format!("[{}]", entries.join(",")))
        }
    }
}

/// Normalize one platform's reply into a JSON object string.
///
/// A reply that is a JSON object is kept, with `platform` filled in when the
/// model left it out and, for length-limited platforms, `char_count` filled
/// in from `content`. Anything else becomes the `content` of a fresh object.
pub fn normalize_tool_output(platform: &Platform, reply: &str) -> String {
    normalize_reply(platform, reply).to_string()
}

fn normalize_reply(platform: &Platform, reply: &str) -> Value {
    let mut obj = match serde_json::from_str::<Value>(reply.trim()) {
        Ok(Value::Object(obj)) => obj,
        _ => {
            let mut obj = Map::new();
            obj.insert("content".to_string(), Value::String(reply.to_string()));
            obj
        }
    };

    if !obj.contains_key("platform") {
        obj.insert("platform".to_string(), Value::String(platform.name().to_string()));
    }

    if platform.char_limit().is_some() && !obj.contains_key("char_count") {
        if let Some(content) = obj.get("content").and_then(Value::as_str) {
            let count = content.chars().count();
            obj.insert("char_count".to_string(), Value::from(count));
        }
    }

    Value::Object(obj)
}
