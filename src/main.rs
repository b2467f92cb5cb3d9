use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use wordscan::index::{Comparer, IndexConfig};
use wordscan::utils::progress;
use wordscan::{output, Error, Searcher};

#[derive(Parser)]
#[command(name = "wordscan")]
#[command(about = "Index the words of a directory tree and look them up")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: IndexOptions,
}

#[derive(Args, Clone)]
struct IndexOptions {
    /// Match words regardless of case
    #[arg(short = 'i', long, global = true, conflicts_with = "ascii_ignore_case")]
    ignore_case: bool,

    /// Match words regardless of ASCII case only
    #[arg(long, global = true)]
    ascii_ignore_case: bool,

    /// Skip files larger than this many bytes
    #[arg(long, global = true, default_value_t = IndexConfig::default().max_file_size)]
    max_file_size: u64,

    /// Index files that look binary
    #[arg(long, global = true)]
    include_binary: bool,

    /// Hide the progress spinner
    #[arg(long, global = true)]
    no_progress: bool,
}

impl IndexOptions {
    fn config(&self) -> IndexConfig {
        let comparer = if self.ignore_case {
            Comparer::CaseInsensitive
        } else if self.ascii_ignore_case {
            Comparer::AsciiCaseInsensitive
        } else {
            Comparer::Ordinal
        };

        IndexConfig {
            comparer,
            max_file_size: self.max_file_size,
            skip_binary: !self.include_binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for a path, then for words to look up (default)
    Prompt {
        /// Path to import instead of asking for one
        path: Option<PathBuf>,
    },
    /// Look up words once and exit
    Search {
        /// File or directory to index
        path: PathBuf,

        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,

        /// Print one JSON object per result
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// List the files an import would index
    Files {
        /// File or directory to walk
        path: PathBuf,
    },
    /// Show index statistics
    Stats {
        /// File or directory to index
        path: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = cli.options;

    match cli.command.unwrap_or(Commands::Prompt { path: None }) {
        Commands::Prompt { path } => run_prompt(path, &options),
        Commands::Search {
            path,
            words,
            json,
            no_color,
        } => {
            let searcher = import(&path, &options, !json)?;
            for word in &words {
                let results = searcher.search(word)?;
                if json {
                    output::print_results_json(&results)?;
                } else {
                    output::print_results(&results, !no_color && io::stdout().is_terminal())?;
                }
            }
            Ok(())
        }
        Commands::Files { path } => {
            let collection = wordscan::collect(&path)
                .with_context(|| format!("Failed to walk {}", path.display()))?;
            output::print_files(&collection.files)?;
            Ok(())
        }
        Commands::Stats { path, json } => {
            let searcher = import(&path, &options, !json)?;
            let stats = searcher.stats()?;
            output::print_stats(&path.display().to_string(), &stats, json)?;
            Ok(())
        }
    }
}

/// Import `path` into a fresh searcher, showing a spinner while it runs
fn import(path: &Path, options: &IndexOptions, show_progress: bool) -> Result<Searcher> {
    let mut searcher = Searcher::new(options.config());
    let spinner = progress::spinner("Indexing files...", show_progress && !options.no_progress);

    let report = searcher.import_from(path);
    spinner.finish_and_clear();

    let report = report.with_context(|| format!("Failed to import {}", path.display()))?;
    let skipped = report.warnings().count();
    if skipped > 0 {
        eprintln!("({} paths could not be indexed)", skipped);
    }

    Ok(searcher)
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn run_prompt(path: Option<PathBuf>, options: &IndexOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let path = match path {
        Some(p) => p,
        None => {
            println!("Please enter the path to your file/directory:");
            match read_line(&mut input)? {
                Some(line) => PathBuf::from(line.trim()),
                None => return Ok(()),
            }
        }
    };

    let mut searcher = Searcher::new(options.config());
    let spinner = progress::spinner("Indexing files...", !options.no_progress);
    let report = searcher.import_from(&path);
    spinner.finish_and_clear();

    match report {
        Ok(report) => {
            for warning in report.warnings() {
                eprintln!("skipped {}", warning);
            }
        }
        // An empty import still answers lookups
        Err(e @ Error::NotFound { .. }) => eprintln!("{}", e),
        Err(e) => return Err(e).context("Import failed"),
    }

    let color = io::stdout().is_terminal();
    println!("Importing the following files: ");
    output::print_files(searcher.files())?;

    loop {
        println!("Please enter the word you'd like to search for: ");
        io::stdout().flush()?;

        let word = match read_line(&mut input)? {
            Some(w) if !w.is_empty() => w,
            _ => break,
        };

        let results = searcher.search(&word)?;
        if results.is_empty() {
            println!("{} was not found", word);
        }
        output::print_results(&results, color)?;
    }

    Ok(())
}
