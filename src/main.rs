use ar_reformat::cli;
use ar_reformat::error::ConvertResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ar-reformat")]
#[command(about = "Convert receivables listings (.xlsx) into debtor import CSV files.")]
#[command(long_about = "AR Reformat - receivables listing to debtor import CSV

INPUT LAYOUT (.xlsx):
  Rows 1-9   title block (ignored)
  Row 10     header: Date | Invoice No. | Customer Name | Amount | Amount Due | Card ID
  Columns    B:G (column A is blank)
  Last row   total, Amount Due only (dropped)

OUTPUT COLUMNS:
  Debtor Reference   Card ID, or Customer Name when Card ID is *None
  Transaction Type   CRD when Amount Due is negative, otherwise INV
  Document Number    Invoice No., leading zeros removed when all digits
  Document Date      Date as YYYY-MM-DD
  Document Balance   Amount Due with 2 decimals

COMMANDS:
  convert    - Convert a listing to CSV
  preview    - Show the converted rows without writing a file
  template   - Write an empty workbook in the accepted layout

EXAMPLES:
  ar-reformat convert aged_receivables.xlsx
  ar-reformat convert aged_receivables.xlsx -o debtors.csv --sheet Aged
  ar-reformat preview aged_receivables.xlsx --limit 20
  ar-reformat template blank.xlsx --sample")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a receivables listing to the debtor import CSV
    Convert {
        /// Path to the Excel listing (.xlsx)
        input: PathBuf,

        /// Output CSV path (default: converted_data.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long, env = "AR_REFORMAT_SHEET")]
        sheet: Option<String>,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the converted rows as a table
    Preview {
        /// Path to the Excel listing (.xlsx)
        input: PathBuf,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long, env = "AR_REFORMAT_SHEET")]
        sheet: Option<String>,

        /// Only show the first N rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write an empty workbook in the accepted layout
    Template {
        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Include two example rows and their total
        #[arg(long)]
        sample: bool,
    },
}

fn main() -> ConvertResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            sheet,
            verbose,
        } => cli::convert(input, output, sheet, verbose),

        Commands::Preview {
            input,
            sheet,
            limit,
        } => cli::preview(input, sheet, limit),

        Commands::Template { output, sample } => cli::template(output, sample),
    }
}
