// Provider status display: which model the generate command would talk to.

use colored::Colorize;

use crate::config::{Config, Provider};

/// Display the resolved provider configuration to the terminal.
pub fn show(config: &Config) {
    println!("Provider: {}", config.provider.label().to_uppercase().bold());
    println!("Model: {}", config.model());
    println!("Endpoint: {}/chat/completions", config.api_base_url());

    match config.provider {
        Provider::OpenAi => {
            if config.openai_api_key.is_empty() {
                println!("API key: {}", "missing".red());
                println!("  Set OPENAI_API_KEY in your .env file");
            } else {
                println!("API key: {}", mask_key(&config.openai_api_key));
            }
        }
        Provider::Ollama => {
            println!("API key: not needed");
            println!(
                "{}",
                "  Set OPENAI_API_KEY to use OpenAI instead of a local Ollama model.".dimmed()
            );
        }
    }
}

/// Show only the last four characters of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}
