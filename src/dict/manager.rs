use crate::checker::dictionary::{Dictionary, EMBEDDED_LANGUAGES};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn list_dictionaries() -> Result<()> {
    let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;
    let languages = Dictionary::installed_languages()?;

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for language in &languages {
        let dict_path = data_dir.join(format!("{}.dict", language));

        if dict_path.exists() {
            let size_kb = fs::metadata(&dict_path)?.len() / 1024;
            println!(
                "  {} {} ({})",
                "✓".green(),
                language.cyan().bold(),
                format!("{}KB", size_kb).dimmed()
            );
        } else if EMBEDDED_LANGUAGES.contains(&language.as_str()) {
            println!(
                "  {} {} ({})",
                "✓".green(),
                language.cyan().bold(),
                "built-in".dimmed()
            );
        }
    }

    println!();
    println!(
        "Data directory: {}",
        data_dir.display().to_string().dimmed()
    );

    Ok(())
}

/// Compile `wordlist` into the `.dict` file for `language` in the data directory.
pub fn build_dictionary(language: &str, wordlist: &Path) -> Result<PathBuf> {
    let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;

    println!(
        "{} dictionary for {}...",
        "Building".cyan().bold(),
        language.yellow()
    );

    let (dict_path, count) = build_into(&data_dir, language, wordlist)?;

    println!("Found {} words", count.to_string().yellow());
    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        dict_path.display().to_string().cyan()
    );

    Ok(dict_path)
}

fn build_into(data_dir: &Path, language: &str, wordlist: &Path) -> Result<(PathBuf, usize)> {
    if language.is_empty() || language.contains(['/', '\\', '.']) {
        anyhow::bail!("Invalid language name '{}'", language);
    }

    let content = fs::read_to_string(wordlist)
        .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;

    let words = parse_wordlist(&content);
    if words.is_empty() {
        anyhow::bail!("Word list {} contains no words", wordlist.display());
    }

    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    let dict_path = data_dir.join(format!("{}.dict", language));
    Dictionary::build_from_words(&words, &dict_path)?;

    debug!(language, words = words.len(), path = %dict_path.display(), "built dictionary");
    Ok((dict_path, words.len()))
}

/// One word per line; blank lines and `#` comments are skipped.
fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
