mod logger;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use zine_impose::{ImpositionOptions, ImpositionStatistics, SheetSize};

#[derive(Parser)]
#[command(name = "zine", about = "Impose PDF pages into a foldable zine", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose a PDF for double-sided printing and folding
    Impose {
        /// Input PDF file (overrides the config file's source)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Output sheet size (overrides the config file's size)
        #[arg(long, value_enum)]
        size: Option<SizeArg>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the page order for a page count
    Order {
        /// Number of source pages
        #[arg(short, long, allow_negative_numbers = true)]
        pages: i64,
    },

    /// Show imposition statistics for a PDF
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    A4,
    Letter,
}

impl From<SizeArg> for SheetSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::A4 => Self::A4,
            SizeArg::Letter => Self::Letter,
        }
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

async fn resolve_options(
    input: Option<PathBuf>,
    size: Option<SizeArg>,
    config: Option<PathBuf>,
) -> Result<ImpositionOptions> {
    let mut options = match config {
        Some(path) => ImpositionOptions::load(&path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ImpositionOptions::default(),
    };

    if let Some(input) = input {
        options.source = input;
    }
    if let Some(size) = size {
        options.sheet_size = size.into();
    }

    options.validate()?;
    Ok(options)
}

fn print_statistics(stats: &ImpositionStatistics) {
    println!("Imposition Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Signature size: {}", stats.signature_size);
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Output sheets (duplex): {}", stats.output_sheets);
    println!("  Rotated pages: {}", stats.rotated_pages);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::StderrLogger::new(log_level(cli.verbose))
        .init()
        .context("installing logger")?;

    match cli.command {
        Commands::Impose {
            input,
            output,
            size,
            config,
            stats_only,
        } => {
            let options = resolve_options(input, size, config).await?;

            let document = zine_impose::load_pdf(&options.source)
                .await
                .with_context(|| format!("reading {}", options.source.display()))?;

            let stats = zine_impose::calculate_statistics(&document)?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            let imposed = zine_impose::impose(&document, options.sheet_size).await?;
            zine_impose::save_pdf(imposed, &output).await?;
            println!("Imposed ({}) → {}", options.sheet_size, output.display());
        }

        Commands::Order { pages } => {
            let count = zine_impose::validate_page_count(pages)?;
            let order = zine_impose::compute_order(count);

            println!(
                "Signature size: {} ({} blank)",
                order.signature_size(),
                order.signature_size() - count
            );
            println!("Print order: {:?}", order.as_slice());

            let label = |idx: usize| {
                if idx < count {
                    (idx + 1).to_string()
                } else {
                    "blank".to_string()
                }
            };
            for (side, pair) in order.chunks(2).enumerate() {
                println!("  Side {}: {}, {}", side + 1, label(pair[0]), label(pair[1]));
            }
        }

        Commands::Stats { input } => {
            let document = zine_impose::load_pdf(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;
            let stats = zine_impose::calculate_statistics(&document)?;
            print_statistics(&stats);
        }
    }

    Ok(())
}
