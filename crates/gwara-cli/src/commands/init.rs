//! The `gwara init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("gwara.toml");
    if path.exists() {
        println!("gwara.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created gwara.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [provider].base_url at your question service if needed");
    println!("  2. Run: gwara play --amount 5 --level 2");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gwara configuration

default_amount = 5
default_level = 1

[provider]
base_url = "https://frog01-20911.wykr.es/questions/"
timeout_secs = 30
"#;
