//! oxide-pgsql CLI
//!
//! Formats PostgreSQL statements, normalizes their parameters and dumps the
//! token stream.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use serde_json::json;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_pgsql_core::{
    BuilderOptions, Lexer, LexerOptions, Parentheses, ParameterWalker, Parser, ParserConfig,
    Precedence, SqlBuilder,
};

/// Format PostgreSQL queries and normalize their parameters.
#[derive(ClapParser)]
#[command(name = "oxide-pgsql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Treat backslashes in '...' literals as escapes.
    #[arg(long, global = true)]
    no_standard_strings: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement and print it back formatted.
    Format {
        /// Parse with the operator precedence of servers before 9.5.
        #[arg(long)]
        legacy: bool,

        /// Add the parentheses both precedence rules need.
        #[arg(long)]
        compat: bool,

        /// Put everything on one line.
        #[arg(long, conflicts_with = "wrap")]
        compact: bool,

        /// Wrap lists at this line length (0 disables wrapping).
        #[arg(short, long)]
        wrap: Option<usize>,

        /// JSON file with builder options.
        #[arg(short, long, env = "OXIDE_PGSQL_OPTIONS")]
        options: Option<PathBuf>,

        /// SQL text; read from stdin if omitted.
        sql: Option<String>,
    },

    /// Replace named parameters with positional ones and report their types.
    Params {
        /// Keep `:name` placeholders in the output.
        #[arg(long)]
        keep_named: bool,

        /// SQL text; read from stdin if omitted.
        sql: Option<String>,
    },

    /// Print the tokens of the input.
    Tokens {
        /// SQL text; read from stdin if omitted.
        sql: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let lexer = LexerOptions {
        standard_conforming_strings: !cli.no_standard_strings,
    };

    match cli.command {
        Commands::Format {
            legacy,
            compat,
            compact,
            wrap,
            options,
            sql,
        } => {
            let mut builder_options = match options {
                Some(path) => load_options(&path)?,
                None => BuilderOptions::default(),
            };
            if compact {
                builder_options = BuilderOptions {
                    parentheses: builder_options.parentheses,
                    escape_unicode: builder_options.escape_unicode,
                    ..BuilderOptions::compact()
                };
            }
            if let Some(wrap) = wrap {
                builder_options.wrap = (wrap > 0).then_some(wrap);
            }
            if compat {
                builder_options.parentheses = Parentheses::Compat;
            }
            let config = ParserConfig {
                precedence: if legacy {
                    Precedence::Legacy
                } else {
                    Precedence::Current
                },
                lexer,
            };
            println!("{}", format_sql(&read_sql(sql)?, config, builder_options)?);
        }

        Commands::Params { keep_named, sql } => {
            let config = ParserConfig {
                lexer,
                ..ParserConfig::default()
            };
            let report = normalize_params(&read_sql(sql)?, config, keep_named)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Tokens { sql } => {
            let sql = read_sql(sql)?;
            for token in Lexer::with_options(&sql, lexer).tokenize()?.into_tokens() {
                println!("{token}");
            }
        }
    }

    Ok(())
}

/// Returns the SQL given on the command line, or all of stdin.
fn read_sql(sql: Option<String>) -> anyhow::Result<String> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read SQL from stdin")?;
    Ok(buffer)
}

fn load_options(path: &Path) -> anyhow::Result<BuilderOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("Invalid builder options in {}", path.display()))?;
    debug!(path = %path.display(), "loaded builder options");
    Ok(options)
}

fn format_sql(sql: &str, config: ParserConfig, options: BuilderOptions) -> anyhow::Result<String> {
    let statement = Parser::with_config(config).parse_statement(sql)?;
    Ok(SqlBuilder::with_options(options).build(&statement))
}

/// Runs the parameter pass and collects the rewritten SQL with both maps.
fn normalize_params(
    sql: &str,
    config: ParserConfig,
    keep_named: bool,
) -> anyhow::Result<serde_json::Value> {
    let mut statement = Parser::with_config(config).parse_statement(sql)?;
    let map = ParameterWalker::new()
        .keep_named(keep_named)
        .run(&mut statement)?;

    // indexed by position; a gap left by unused `$n` placeholders stays null
    let builder = SqlBuilder::new();
    let count = map.types.keys().next_back().map_or(0, |last| last + 1);
    let mut types = vec![None; count];
    for (index, type_name) in &map.types {
        types[*index] = type_name.as_ref().map(|t| builder.build_type_name(t));
    }

    Ok(json!({
        "sql": builder.build(&statement),
        "types": types,
        "names": map.names,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compat() {
        let options = BuilderOptions {
            parentheses: Parentheses::Compat,
            ..BuilderOptions::compact()
        };
        let sql = format_sql("SELECT a < b IS NULL", ParserConfig::default(), options).unwrap();
        assert_eq!(sql, "select (a < b) is null");
    }

    #[test]
    fn test_format_legacy() {
        let sql = format_sql(
            "select a = b = c",
            ParserConfig::legacy(),
            BuilderOptions::compact(),
        )
        .unwrap();
        assert_eq!(sql, "select a = (b = c)");
    }

    #[test]
    fn test_format_reports_parse_errors() {
        let err = format_sql("select from from", ParserConfig::default(), BuilderOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("at position"));
    }

    #[test]
    fn test_params_report() {
        let report =
            normalize_params("select :a::int, :b, :a", ParserConfig::default(), false).unwrap();
        assert_eq!(report["sql"], "select $1::pg_catalog.int4, $2, $1");
        assert_eq!(report["types"], json!(["pg_catalog.int4", null]));
        assert_eq!(report["names"]["b"], 1);
    }

    #[test]
    fn test_params_types_follow_position() {
        let sql = (1..=11).map(|n| format!("${n}")).collect::<Vec<_>>().join(", ");
        let report =
            normalize_params(&format!("select {sql}, $12::text"), ParserConfig::default(), false)
                .unwrap();
        let types = report["types"].as_array().unwrap();
        assert_eq!(types.len(), 12);
        assert!(types[1].is_null());
        assert_eq!(types[11], "\"text\"");

        let report =
            normalize_params("select $3::int", ParserConfig::default(), false).unwrap();
        assert_eq!(report["types"], json!([null, null, "pg_catalog.int4"]));
    }

    #[test]
    fn test_params_mixed_styles() {
        assert!(normalize_params("select $1, :a", ParserConfig::default(), false).is_err());
    }
}
