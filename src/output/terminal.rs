// Colored terminal output for generated posts.
//
// One card per platform: icon and header, a character count for platforms
// with a length limit, then the post body ready to copy.

use colored::Colorize;

use crate::extract::ExtractedPost;

/// Where a post stands against its platform's length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthStatus {
    NoLimit,
    Within { count: usize, limit: usize },
    Over { count: usize, limit: usize },
}

/// Compare a post's character count against its platform's limit.
pub fn length_status(post: &ExtractedPost) -> LengthStatus {
    match (post.platform.char_limit(), post.char_count) {
        (Some(limit), Some(count)) if count > limit => LengthStatus::Over { count, limit },
        (Some(limit), Some(count)) => LengthStatus::Within { count, limit },
        _ => LengthStatus::NoLimit,
    }
}

/// Display every extracted post as a card.
pub fn display_posts(posts: &[ExtractedPost]) {
    println!("\n{}", "=== Generated Content ===".bold());

    for post in posts {
        println!();
        println!(
            "{} {}",
            post.platform.emoji(),
            format!("{} Post", post.platform).green().bold()
        );

        match length_status(post) {
            LengthStatus::Within { count, limit } => {
                println!("  {}", format!("Character count: {count}/{limit}").dimmed());
            }
            LengthStatus::Over { count, limit } => {
                println!("  {}", format!("Character count: {count}/{limit}").yellow().bold());
                println!(
                    "  {} Post exceeds {limit} characters. Consider shortening.",
                    "Warning:".yellow()
                );
            }
            LengthStatus::NoLimit => {}
        }

        println!("  {}", "-".repeat(60).dimmed());
        if post.content.is_empty() {
            println!("  {}", "(no content extracted)".dimmed());
        } else {
            for line in post.content.lines() {
                println!("  {line}");
            }
        }
    }
    println!();
}

/// Display the untouched model output, for checking extraction by eye.
pub fn display_raw_output(raw: &str) {
    println!("{}", "=== Raw Output ===".bold());
    if raw.trim().is_empty() {
        println!("{}", "(empty)".dimmed());
    } else {
        println!("{}", raw.dimmed());
    }
    println!();
}
