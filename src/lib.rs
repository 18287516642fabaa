// Postcraft: platform-specific social posts from source material.
//
// This is the library root. Generation produces raw model output, extraction
// recovers each platform's post from it, output renders the result.

pub mod config;
pub mod extract;
pub mod generate;
pub mod output;
pub mod platform;
pub mod status;
