pub mod cli;
pub mod config;
pub mod filter;
pub mod search;
pub mod series;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[cfg(test)]
mod properties;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::io::Read;
use std::path::Path;

pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use filter::{Filter, FilterError, Operator};
pub use series::{Series, parse_series_file};

/// Read a filter argument: inline JSON, `@path` or `-` for stdin
pub fn read_filter(arg: &str) -> Result<Filter> {
    let raw = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read filter from stdin")?;
        buf
    } else if let Some(path) = arg.strip_prefix('@') {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter file '{path}'"))?
    } else {
        arg.to_string()
    };

    filter::wire::from_json(raw.trim()).with_context(|| format!("Invalid filter: {}", raw.trim()))
}

pub fn format_filter(filter: &Filter, format: OutputFormat, pretty: bool) -> Result<String> {
    let text = match format {
        OutputFormat::Text => filter.to_string(),
        OutputFormat::Json if pretty => serde_json::to_string_pretty(filter)?,
        OutputFormat::Json => serde_json::to_string(filter)?,
    };

    Ok(text)
}

fn format_comparison(left: &Filter, right: &Filter, format: OutputFormat) -> Result<String> {
    let equivalent = left == right;

    let text = match format {
        OutputFormat::Text => {
            let verdict = if equivalent {
                "equivalent".green()
            } else {
                "different".red()
            };
            format!("left:  {left}\nright: {right}\n{verdict}")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "left": left,
            "right": right,
            "equivalent": equivalent,
        }))?,
    };

    Ok(text)
}

fn write_output_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    let content = content.trim_end();
    println!("{content}");

    if let Some(path) = output {
        write_output_file(path, &format!("{content}\n"))?;
    }

    Ok(())
}

pub fn run() -> Result<()> {
    let cli = cli_parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level(&config)),
    )
    .try_init();

    if let Some(path) = &cli.config {
        log::info!("loaded config from {}", path.display());
    }

    let format = cli.effective_format(&config);
    let output = cli.output.as_deref();

    match &cli.command {
        Commands::Optimize { filter } => {
            let filter = read_filter(filter)?;
            let canonical = filter.optimize();
            log::debug!("optimized {filter} into {canonical}");

            emit(&format_filter(&canonical, format, config.output.pretty)?, output)?;
        }
        Commands::Compare { left, right } => {
            if left == "-" && right == "-" {
                anyhow::bail!("Only one filter can be read from stdin; pass the other inline or as '@path'");
            }

            let left = read_filter(left)?.optimize();
            let right = read_filter(right)?.optimize();

            emit(&format_comparison(&left, &right, format)?, output)?;
        }
        Commands::FindSeries {
            series,
            limit,
            filter,
        } => {
            let filter = read_filter(filter)?;
            let all = parse_series_file(series)
                .with_context(|| format!("Failed to load series from '{}'", series.display()))?;
            log::info!("loaded {} series from {}", all.len(), series.display());

            let limit = limit.or(config.find.limit);
            let found = search::find_series(&all, &filter, limit);

            let text = match format {
                OutputFormat::Text => search::format_found_text(&found),
                OutputFormat::Json => search::format_found_json(series, &found),
            }
            .context("Failed to format matching series")?;
            emit(&text, output)?;
        }
    }

    Ok(())
}
