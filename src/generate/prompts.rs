// Prompt builders: what to ask the model for on each platform.
//
// Each known platform gets its own audience, tone, and length requirements
// plus its own sampling settings. Every prompt ends by asking for a single
// JSON object, which the model may or may not honor.

use super::traits::GenerationRequest;
use crate::platform::Platform;

/// Requirements block and sampling settings for one platform.
struct PlatformBrief {
    requirements: &'static str,
    max_tokens: u32,
    temperature: f32,
}

fn brief(platform: &Platform) -> PlatformBrief {
    match platform {
        Platform::LinkedIn => PlatformBrief {
            requirements: "\
- AUDIENCE: Industry professionals, engineers, business leaders
- TONE: Professional, analytical, thought-provoking
- FOCUS: Technical insights, industry trends, business implications
- LENGTH: 180-220 words
- HASHTAGS: 4-5 professional ones
- PERSPECTIVE: Industry analyst who just reviewed the source
- INCLUDE: A discussion question for professional engagement
- DO NOT use casual language or emojis",
            max_tokens: 500,
            temperature: 0.7,
        },
        Platform::Instagram => PlatformBrief {
            requirements: "\
- AUDIENCE: Enthusiasts and a younger, visual-first audience
- TONE: Excited, casual, community-driven
- FOCUS: Cool features, standout moments, lifestyle appeal
- LENGTH: 100-130 words maximum
- EMOJIS: 3-5 relevant ones
- HASHTAGS: 7-8 trending ones
- PERSPECTIVE: A passionate fan who just watched this
- INCLUDE: A call to action for engagement",
            max_tokens: 400,
            temperature: 0.8,
        },
        Platform::Twitter => PlatformBrief {
            requirements: "\
- AUDIENCE: Quick scrollers and debate starters
- TONE: Sharp, opinionated, conversation-starting
- FOCUS: One surprising fact, hot take, or debate point
- LENGTH: 200-250 characters maximum, hashtags included
- HASHTAGS: 2-3 only
- INCLUDE: A question or statement that sparks replies
- MUST stay under 250 characters total",
            max_tokens: 250,
            temperature: 0.9,
        },
        Platform::Other(_) => PlatformBrief {
            requirements: "\
- TONE: Match the platform's usual conventions
- LENGTH: Short and engaging
- INCLUDE: A clear hook in the first sentence",
            max_tokens: 400,
            temperature: 0.7,
        },
    }
}

/// The exact JSON shape the model is told to return for `platform`.
fn json_shape(platform: &Platform) -> String {
    let name = platform.name();
    if platform.char_limit().is_some() {
        format!(r#"{{"platform": "{name}", "content": "your post here", "char_count": 123}}"#)
    } else {
        format!(r#"{{"platform": "{name}", "content": "your post here"}}"#)
    }
}

/// Build the request for one platform's post.
pub fn platform_request(platform: &Platform, source_text: &str, instructions: &str) -> GenerationRequest {
    let brief = brief(platform);
    let name = platform.name();
    let prompt = format!(
        "{instructions}\n\n\
         Create a {name} post based on this source material.\n\n\
         SOURCE:\n{source_text}\n\n\
         {upper} REQUIREMENTS:\n{requirements}\n\n\
         CRITICAL: Return ONLY valid JSON in this exact format:\n{shape}",
        instructions = instructions.trim(),
        upper = name.to_uppercase(),
        requirements = brief.requirements,
        shape = json_shape(platform),
    );

    GenerationRequest {
        prompt,
        max_tokens: brief.max_tokens,
        temperature: brief.temperature,
    }
}

/// Build one request asking for every platform at once, as a JSON array.
pub fn combined_request(platforms: &[Platform], source_text: &str, instructions: &str) -> GenerationRequest {
    let list = platforms
        .iter()
        .map(Platform::name)
        .collect::<Vec<_>>()
        .join(", ");

    let sections: String = platforms
        .iter()
        .map(|p| format!("{} REQUIREMENTS:\n{}\n\n", p.name().to_uppercase(), brief(p).requirements))
        .collect();

    let shapes = platforms
        .iter()
        .map(json_shape)
        .collect::<Vec<_>>()
        .join(",\n  ");

    let prompt = format!(
        "{instructions}\n\n\
         Target platforms: {list}\n\n\
         Each platform must get COMPLETELY DIFFERENT content and tone.\n\n\
         SOURCE:\n{source_text}\n\n\
         {sections}\
         CRITICAL: Return ONLY a valid JSON array in this exact format:\n[\n  {shapes}\n]",
        instructions = instructions.trim(),
    );

    // Budget enough room for every post in one reply.
    let max_tokens = platforms.iter().map(|p| brief(p).max_tokens).sum();

    GenerationRequest {
        prompt,
        max_tokens,
        temperature: 0.7,
    }
}
