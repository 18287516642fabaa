// Composition tests: generation output flowing into extraction.
//
// A fake TextGenerator stands in for the model provider, so these run the
// real prompt building, normalization, and extraction chain with no network.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use postcraft::extract::{extract_content, extract_post};
use postcraft::generate::traits::{GenerationRequest, TextGenerator};
use postcraft::generate::{generate_raw_output, normalize_tool_output, GenerationJob, Mode};
use postcraft::platform::Platform;

/// Replies by platform, keyed on the platform name appearing in the prompt.
struct FakeGenerator {
    replies: Vec<(&'static str, Result<&'static str, &'static str>)>,
    combined_reply: &'static str,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    fn new(replies: Vec<(&'static str, Result<&'static str, &'static str>)>) -> Self {
        Self {
            replies,
            combined_reply: "",
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());

        if request.prompt.contains("Target platforms:") {
            return Ok(self.combined_reply.to_string());
        }
        for (name, reply) in &self.replies {
            if request.prompt.contains(&format!("Create a {name} post")) {
                return match reply {
                    Ok(text) => Ok(text.to_string()),
                    Err(message) => anyhow::bail!("{message}"),
                };
            }
        }
        anyhow::bail!("unexpected prompt")
    }
}

fn all() -> Vec<Platform> {
    vec![Platform::LinkedIn, Platform::Instagram, Platform::Twitter]
}

fn job<'a>(platforms: &'a [Platform], mode: Mode) -> GenerationJob<'a> {
    GenerationJob {
        source_text: "The new wagon has 600 horsepower and a surprisingly quiet cabin.",
        instructions: "Write from the viewer's perspective.",
        platforms,
        mode,
        concurrency: 2,
    }
}

// ============================================================
// Per-platform generation -> extraction
// ============================================================

#[tokio::test]
async fn per_platform_replies_extract_cleanly() {
    let generator = FakeGenerator::new(vec![
        ("LinkedIn", Ok(r#"{"content": "This technical breakdown highlights efficiency."}"#)),
        ("Instagram", Ok("Just watched this sick review! 🔥")),
        ("Twitter", Ok(r#"{"platform": "Twitter", "content": "Wagons > SUVs?"}"#)),
    ]);
    let platforms = all();

    let raw = generate_raw_output(&generator, &job(&platforms, Mode::PerPlatform))
        .await
        .unwrap();

    assert_eq!(generator.call_count(), 3);
    assert_eq!(
        extract_content(&raw, &Platform::LinkedIn, &platforms),
        "This technical breakdown highlights efficiency."
    );
    assert_eq!(
        extract_content(&raw, &Platform::Instagram, &platforms),
        "Just watched this sick review! 🔥"
    );

    let twitter = extract_post(&raw, &Platform::Twitter, &platforms);
    assert_eq!(twitter.content, "Wagons > SUVs?");
    assert_eq!(twitter.char_count, Some(14));
}

#[tokio::test]
async fn per_platform_output_keeps_requested_order() {
    let generator = FakeGenerator::new(vec![
        ("LinkedIn", Ok("L")),
        ("Twitter", Ok("T")),
    ]);
    let platforms = vec![Platform::Twitter, Platform::LinkedIn];

    let raw = generate_raw_output(&generator, &job(&platforms, Mode::PerPlatform))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["platform"], "Twitter");
    assert_eq!(value[1]["platform"], "LinkedIn");
}

#[tokio::test]
async fn failed_platform_degrades_to_empty_post() {
    let generator = FakeGenerator::new(vec![
        ("LinkedIn", Ok("Solid analysis.")),
        ("Instagram", Ok("Vibes only.")),
        ("Twitter", Err("rate limited")),
    ]);
    let platforms = all();

    let raw = generate_raw_output(&generator, &job(&platforms, Mode::PerPlatform))
        .await
        .unwrap();

    let twitter = extract_post(&raw, &Platform::Twitter, &platforms);
    assert_eq!(twitter.content, "");
    assert_eq!(twitter.char_count, Some(0));
    assert_eq!(extract_content(&raw, &Platform::LinkedIn, &platforms), "Solid analysis.");
    assert!(raw.contains("rate limited"));
}

#[tokio::test]
async fn prompts_carry_platform_sampling_settings() {
    let generator = FakeGenerator::new(vec![("Twitter", Ok("t"))]);
    let platforms = vec![Platform::Twitter];

    generate_raw_output(&generator, &job(&platforms, Mode::PerPlatform))
        .await
        .unwrap();

    let calls = generator.calls.lock().unwrap();
    assert_eq!(calls[0].max_tokens, 250);
    assert!(calls[0].prompt.starts_with("Write from the viewer's perspective."));
    assert!(calls[0].prompt.contains("600 horsepower"));
}

// ============================================================
// Combined generation -> extraction
// ============================================================

#[tokio::test]
async fn combined_reply_returned_verbatim_and_extracted() {
    let mut generator = FakeGenerator::new(vec![]);
    generator.combined_reply = "Sure! Here are your posts.\n\nLinkedIn Post:\nEngineering matters.\n\nInstagram Post:\nSo fast! 🚗💨";
    let platforms = vec![Platform::LinkedIn, Platform::Instagram];

    let raw = generate_raw_output(&generator, &job(&platforms, Mode::Combined))
        .await
        .unwrap();

    assert_eq!(generator.call_count(), 1);
    assert_eq!(raw, generator.combined_reply);
    assert_eq!(
        extract_content(&raw, &Platform::LinkedIn, &platforms),
        "Engineering matters."
    );
    assert_eq!(extract_content(&raw, &Platform::Instagram, &platforms), "So fast! 🚗💨");
}

// ============================================================
// Validation
// ============================================================

#[tokio::test]
async fn empty_source_text_rejected_before_calling_model() {
    let generator = FakeGenerator::new(vec![]);
    let platforms = all();
    let mut empty_job = job(&platforms, Mode::PerPlatform);
    empty_job.source_text = "   \n";

    assert!(generate_raw_output(&generator, &empty_job).await.is_err());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn empty_platform_list_rejected() {
    let generator = FakeGenerator::new(vec![]);
    assert!(generate_raw_output(&generator, &job(&[], Mode::Combined)).await.is_err());
}

// ============================================================
// Tool output normalization
// ============================================================

#[test]
fn normalized_tool_output_round_trips_through_extraction() {
    let normalized = normalize_tool_output(&Platform::Twitter, "Am I the only one who thinks wagons rule?");
    let post = extract_post(&normalized, &Platform::Twitter, &[Platform::Twitter]);
    assert_eq!(post.content, "Am I the only one who thinks wagons rule?");
    assert_eq!(post.char_count, Some(41));
}
