//! Command line front end: reads pasted address blocks and writes a PDF label sheet.
//!
//! ```sh
//! label-gen preview addresses.txt -o labels.pdf --grid 3x8
//! pbpaste | label-gen generate --rotate --grid 2x5 --out-dir ~/Desktop
//! ```
//!
//! Set `RUST_LOG=label_gen=debug` to follow placement decisions.

use clap::{Args, Parser, Subcommand};
use label_gen::layout::{LayoutConfig, Strategy};
use label_gen::pagesize::PageSize;
use label_gen::{render, FontSpec, LabelError, Mm, OutputMode, RenderedSheet};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Turn pasted name and address blocks into printable PDF label sheets
#[derive(Parser, Debug)]
#[command(name = "label-gen", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a sheet to a file, or to stdout
    Preview {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Where to write the PDF. Defaults to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Render a sheet under a timestamped filename
    Generate {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Directory the PDF is written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Text file of address blocks separated by blank lines. Defaults to stdin.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// JSON layout configuration; the options below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page size (a3, a4, a5, a6, letter, legal)
    #[arg(long, value_name = "SIZE")]
    page_size: Option<PageSize>,

    /// Place labels in a fixed grid instead of flowing columns
    #[arg(long, value_name = "COLSxROWS", value_parser = parse_grid)]
    grid: Option<(usize, usize)>,

    /// Width of flowing columns
    #[arg(long, value_name = "MM", conflicts_with = "grid")]
    column_width: Option<f32>,

    /// Turn each label a quarter turn inside its grid cell
    #[arg(long)]
    rotate: bool,

    /// Print "TO," / "FROM," above each name
    #[arg(long)]
    kind_header: bool,

    /// Don't outline labels
    #[arg(long)]
    no_border: bool,

    /// TrueType / OpenType font to set every label in
    #[arg(long, value_name = "FILE")]
    font_file: Option<PathBuf>,
}

fn parse_grid(value: &str) -> Result<(usize, usize), String> {
    let (columns, rows) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got `{value}`"))?;
    let parse = |n: &str| {
        n.trim()
            .parse::<usize>()
            .map_err(|e| format!("bad grid dimension `{n}`: {e}"))
    };
    Ok((parse(columns)?, parse(rows)?))
}

impl SheetArgs {
    fn config(&self) -> Result<LayoutConfig, LabelError> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::from_json_file(path)?,
            None => LayoutConfig::default(),
        };

        if let Some(size) = self.page_size {
            config = config.with_page_size(size);
        }
        if let Some((columns, rows)) = self.grid {
            config.strategy = Strategy::FixedGrid { columns, rows };
        }
        if let Some(width) = self.column_width {
            config.strategy = Strategy::Flowing {
                column_width: Mm(width).into(),
            };
        }
        config.rotate |= self.rotate;
        config.style.kind_header |= self.kind_header;
        config.style.border &= !self.no_border;
        if let Some(path) = &self.font_file {
            config.style.name_font = FontSpec::File(path.clone());
            config.style.body_font = FontSpec::File(path.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn text(&self) -> Result<String, LabelError> {
        Ok(match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        })
    }

    fn render(&self, mode: OutputMode) -> Result<RenderedSheet, LabelError> {
        let config = self.config()?;
        let text = self.text()?;
        render(&text, &config, mode)
    }
}

fn write_file(path: &Path, sheet: &RenderedSheet) -> Result<(), LabelError> {
    std::fs::write(path, &sheet.bytes)?;
    tracing::info!(
        path = %path.display(),
        labels = sheet.labels,
        pages = sheet.pages,
        "wrote label sheet"
    );
    Ok(())
}

fn run(cli: Cli) -> Result<(), LabelError> {
    match cli.command {
        Command::Preview { sheet, output } => {
            let rendered = sheet.render(OutputMode::Preview)?;
            match output {
                Some(path) => write_file(&path, &rendered)?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&rendered.bytes)?;
                    stdout.flush()?;
                }
            }
        }
        Command::Generate { sheet, out_dir } => {
            let rendered = sheet.render(OutputMode::Generate)?;
            let filename = rendered
                .filename
                .clone()
                .unwrap_or_else(|| "address_labels.pdf".to_string());
            std::fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(filename);
            write_file(&path, &rendered)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
