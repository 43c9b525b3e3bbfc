use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use docspell::checker::speller::{FstSpeller, SpellingEngine};
use docspell::cli::output::{self, OutputFormat};
use docspell::config::{read_word_list, Overrides};
use docspell::model::DocTree;
use docspell::{dict, Config, Spellcheck};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "docspell")]
#[command(version, about = "Spell-check the comments of a documentation tree", long_about = None)]
struct Cli {
    /// Documentation tree (JSON), or - for stdin
    #[arg(value_name = "TREE")]
    tree: Option<PathBuf>,

    /// Language to use for spell checking (e.g., en_US, en_GB)
    #[arg(long, value_name = "LANGUAGE")]
    spell_language: Option<String>,

    /// Add words to the personal word list: a comma-separated list, a file,
    /// or nothing to read words from stdin
    #[arg(long, value_name = "WORDLIST", num_args = 0..=1)]
    spell_add_words: Option<Option<String>>,

    /// Directory the documented sources were read from
    #[arg(long, value_name = "DIR")]
    spell_source_dir: Option<PathBuf>,

    /// Personal word list file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Reject words made of several dictionary words run together
    #[arg(long)]
    no_run_together: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Compile a plain word list into a dictionary
    Build {
        /// Language code (e.g., en_US, en_GB, fr_FR)
        language: String,
        /// Word list file, one word per line
        wordlist: PathBuf,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("docspell=warn".parse()?))
        .try_init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "docspell", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = Config::load(Overrides {
        language: cli.spell_language.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        source_dir: cli.spell_source_dir.clone(),
        no_run_together: cli.no_run_together,
    })?;

    let mut speller = FstSpeller::new(&config)
        .with_context(|| format!("Unable to spell-check in language {}", config.language))?;

    if let Some(source) = &cli.spell_add_words {
        if source.is_none() && is_stdin(cli.tree.as_deref()) {
            anyhow::bail!("Cannot read both the word list and the documentation tree from stdin");
        }

        let words = read_word_list(source.as_deref(), io::stdin())?;
        for word in &words {
            speller.add_to_personal(word);
        }
        speller.save_all_word_lists()?;
        info!(words = words.len(), "added words to personal word list");
    }

    let tree_path = match cli.tree {
        Some(path) => path,
        None if cli.spell_add_words.is_some() => return Ok(()),
        None => anyhow::bail!("No documentation tree specified. Use --help for usage information."),
    };

    let tree = if is_stdin(Some(tree_path.as_path())) {
        DocTree::from_reader(io::stdin().lock())
            .context("Failed to read documentation tree from stdin")?
    } else {
        DocTree::load(&tree_path).with_context(|| {
            format!("Failed to read documentation tree: {}", tree_path.display())
        })?
    };

    debug!(language = speller.language(), source_dir = %config.source_dir().display(), "checking");

    let mut spellcheck = Spellcheck::new(speller, config.source_dir());
    let report = spellcheck.generate(&tree)?;

    let rendered = output::render(&report, cli.format)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn is_stdin(path: Option<&Path>) -> bool {
    path == Some(Path::new("-"))
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries()?;
            }
            DictCommands::Build { language, wordlist } => {
                dict::manager::build_dictionary(&language, &wordlist)?;
            }
        },
    }
    Ok(())
}
