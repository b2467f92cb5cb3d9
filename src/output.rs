//! Output formatting for search results, file lists and index statistics

use crate::index::{IndexStats, SearchResult};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print results as `<word> was found in <file>(<line>:<position>)\t\t<text>`
pub fn print_results(results: &[SearchResult], color: bool) -> io::Result<()> {
    let mut stdout = stdout(color);
    for result in results {
        write_result(&mut stdout, result)?;
    }
    Ok(())
}

/// Write one result line, coloring the word, path and location
pub fn write_result<W: WriteColor>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "{}", result.word)?;
    out.reset()?;
    write!(out, " was found in ")?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(out, "{}", result.file.display())?;
    out.reset()?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "({}:{})", result.line, result.position)?;
    out.reset()?;

    writeln!(out, "\t\t{}", result.line_text.as_deref().unwrap_or(""))
}

/// Print one JSON object per result
pub fn print_results_json(results: &[SearchResult]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for result in results {
        serde_json::to_writer(&mut stdout, result)?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Print collected file paths, one per line
pub fn print_files(files: &[PathBuf]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for path in files {
        writeln!(stdout, "{}", path.display())?;
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsJson<'a> {
    root: &'a str,
    #[serde(flatten)]
    stats: &'a IndexStats,
}

/// Print index statistics, as text or a single JSON object
pub fn print_stats(root: &str, stats: &IndexStats, json: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &StatsJson { root, stats })?;
        writeln!(stdout)?;
        return Ok(());
    }

    writeln!(stdout, "Index Statistics")?;
    writeln!(stdout, "================")?;
    writeln!(stdout)?;
    writeln!(stdout, "Root path:        {}", root)?;
    writeln!(stdout, "Files:            {}", stats.files)?;
    writeln!(stdout, "Distinct words:   {}", stats.distinct_words)?;
    writeln!(stdout, "Occurrences:      {}", stats.occurrences)?;

    if !stats.top_words.is_empty() {
        writeln!(stdout)?;
        writeln!(stdout, "Most frequent words:")?;
        for (word, count) in &stats.top_words {
            writeln!(stdout, "  {:20} {}", word, count)?;
        }
    }

    Ok(())
}
