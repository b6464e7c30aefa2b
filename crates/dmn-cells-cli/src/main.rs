//! dmn-cells CLI - inspect and normalize decision table cell entries

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dmn_cells::prelude::*;
use dmn_cells::{
    format_date, format_number, format_string, is_valid_display_format, parse_allowed_values,
    parse_date, parse_number, parse_string, NumberTemplate, ParsedNumber, StringTemplate,
    Template,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dmn-cells")]
#[command(
    author,
    version,
    about = "Inspect how decision table cell entries are parsed and edited"
)]
struct Cli {
    /// Editor options as JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how an entry is parsed and what editor it gets in simple mode
    Inspect {
        /// Column type (date, number, integer, long, double, string)
        #[arg(short = 't', long = "type")]
        data_type: DataType,

        /// Values declared by the column, e.g. '"gold", "silver"'
        #[arg(long)]
        values: Option<String>,

        /// Cell text
        text: String,
    },

    /// Parse an entry and print it back in canonical form
    Normalize {
        /// Column type (date, number, integer, long, double, string)
        #[arg(short = 't', long = "type")]
        data_type: DataType,

        /// Cell text
        text: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = match &cli.config {
        Some(path) => load_options(path)?,
        None => EditorOptions::default(),
    };

    match cli.command {
        Commands::Inspect {
            data_type,
            values,
            text,
        } => inspect(data_type, values.as_deref(), &text, options),
        Commands::Normalize { data_type, text } => normalize(data_type, &text),
    }
}

fn load_options(path: &Path) -> Result<EditorOptions> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::debug!("loading editor options from {}", path.display());
    let options: EditorOptions = serde_json::from_str(&json)
        .with_context(|| format!("Invalid options in '{}'", path.display()))?;
    anyhow::ensure!(
        is_valid_display_format(&options.date_display_format),
        "Invalid date_display_format {:?} in '{}'",
        options.date_display_format,
        path.display()
    );
    Ok(options)
}

fn inspect(
    data_type: DataType,
    values: Option<&str>,
    text: &str,
    options: EditorOptions,
) -> Result<()> {
    println!("Type: {data_type}");
    println!("Text: {text:?}");

    match data_type {
        DataType::Date => match parse_date(text) {
            Some(parsed) => {
                println!("Kind: {}", parsed.kind());
                println!("Date: {}", parsed.date1());
                if let Some(end) = parsed.date2() {
                    println!("End: {end}");
                }
            }
            None => println!("Parsed: no"),
        },
        DataType::Number => match parse_number(text) {
            Some(ParsedNumber::Comparison(comparison)) => {
                println!("Editing: comparison");
                println!(
                    "Operator: {} ({})",
                    comparison.operator.label(),
                    comparison.operator.index()
                );
                println!("Operand: {}", comparison.operand);
            }
            Some(ParsedNumber::Range(range)) => {
                println!("Editing: range");
                println!("Start: {} (inclusive: {})", range.start, range.start_inclusive);
                println!("End: {} (inclusive: {})", range.end, range.end_inclusive);
            }
            None => println!("Editing: not editable"),
        },
        DataType::String => match parse_string(text) {
            Some(parsed) => {
                println!("Kind: {}", parsed.kind);
                println!("Values: {:?}", parsed.values);
            }
            None => println!("Parsed: no (foreign expression)"),
        },
    }

    let mut column = Column::input("cell").with_input_type_ref(data_type.as_str());
    if let Some(values) = values {
        column = column.with_input_values(values);
        if let Some(allowed) = parse_allowed_values(&column) {
            println!("Allowed: {allowed:?}");
        }
    }
    let mut table = DecisionTable::new("inspect");
    table.add_column(column).context("Failed to build table")?;
    table.add_row(Row::body("rule")).context("Failed to build table")?;
    table
        .set_text("rule", "cell", text)
        .context("Failed to build table")?;

    let placeholder = options.date_placeholder.clone();
    let mut cells = ComplexCells::new(TableRegistry::new(table), options);
    cells.activate_simple_mode();
    let key = CellKey::new("rule", "cell");

    if let Some(display) = cells
        .grid()
        .graphics(&key)
        .and_then(|graphics| graphics.date_content.as_ref())
    {
        println!("Display: {}", display.text_with_placeholder(&placeholder));
    }

    let overlay = match cells.overlay(&key).map(|overlay| &overlay.template) {
        None => "none",
        Some(Template::Number(NumberTemplate::Blank))
        | Some(Template::String(StringTemplate::Blank)) => "blank",
        Some(Template::Number(NumberTemplate::Form(_))) => "number form",
        Some(Template::String(StringTemplate::Form(_))) => "string form",
    };
    println!("Overlay: {overlay}");

    Ok(())
}

fn normalize(data_type: DataType, text: &str) -> Result<()> {
    let normalized = match data_type {
        DataType::Date => parse_date(text).map(|parsed| format_date(&parsed)),
        DataType::Number => parse_number(text).map(|parsed| format_number(&parsed)),
        DataType::String => parse_string(text).map(|parsed| format_string(&parsed)),
    };

    match normalized {
        Some(normalized) => println!("{normalized}"),
        None => {
            eprintln!("Warning: not a structured {data_type} entry, left unchanged");
            println!("{text}");
        }
    }

    Ok(())
}
