use crate::error::ConvertResult;
use crate::excel::{ExtractOptions, SheetSelector, TemplateExporter};
use crate::pipeline::{Conversion, Pipeline};
use crate::types::OutputRecord;
use crate::writer;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output name used when none is given (the name the upload form offered)
pub const DEFAULT_OUTPUT: &str = "converted_data.csv";

fn load(input: &Path, sheet: Option<String>) -> ConvertResult<Conversion> {
    let bytes = fs::read(input)?;
    let pipeline = Pipeline::new(ExtractOptions {
        sheet: SheetSelector::from_name(sheet),
    });
    pipeline.run(&bytes)
}

/// Execute the convert command
pub fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    sheet: Option<String>,
    verbose: bool,
) -> ConvertResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("{}", "📄 AR Reformat - Convert".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }

    let conversion = load(&input, sheet)?;

    if verbose {
        println!("   Data rows read:  {}", conversion.rows_read);
        println!("   Rows dropped:    {}", conversion.rows_dropped);
        println!("   Records kept:    {}\n", conversion.records.len());
        println!("{}", "💾 Writing CSV file...".cyan());
    }

    writer::write_csv_file(&output, &conversion.records)?;

    println!("{}", "✅ Conversion Complete!".bold().green());
    println!(
        "   {} records written to {}\n",
        conversion.records.len().to_string().bold(),
        output.display()
    );

    Ok(())
}

/// Execute the preview command
pub fn preview(input: PathBuf, sheet: Option<String>, limit: Option<usize>) -> ConvertResult<()> {
    println!("{}", "🔍 AR Reformat - Preview".bold().green());
    println!("   Input: {}\n", input.display());

    let conversion = load(&input, sheet)?;
    let shown = limit.unwrap_or(conversion.records.len());

    print_records_table(&conversion.records[..shown.min(conversion.records.len())]);

    println!();
    println!(
        "   {} records ({} data rows read, {} dropped)",
        conversion.records.len().to_string().bold(),
        conversion.rows_read,
        conversion.rows_dropped
    );
    if shown < conversion.records.len() {
        println!(
            "{}",
            format!("   Showing first {} records", shown).yellow()
        );
    }

    Ok(())
}

/// Execute the template command
pub fn template(output: PathBuf, sample: bool) -> ConvertResult<()> {
    println!("{}", "📋 AR Reformat - Template".bold().green());
    println!("   Output: {}\n", output.display());

    let exporter = if sample {
        TemplateExporter::new().with_sample_data()
    } else {
        TemplateExporter::new()
    };
    exporter.export(&output)?;

    println!("{}", "✅ Template Written!".bold().green());
    println!("   Rows 1-9:  title block (ignored)");
    println!("   Row 10:    Date | Invoice No. | Customer Name | Amount | Amount Due | Card ID");
    println!("   Columns:   B:G");
    if sample {
        println!("   Sample:    {} example rows and a total row", exporter.row_count());
    }
    println!();

    Ok(())
}

/// Column widths fitted to the longest value in each field
fn column_widths(records: &[OutputRecord]) -> [usize; 5] {
    let mut widths = crate::types::OUTPUT_HEADERS.map(str::len);
    for record in records {
        for (width, field) in widths.iter_mut().zip(record.fields()) {
            *width = (*width).max(field.chars().count());
        }
    }
    widths
}

fn print_records_table(records: &[OutputRecord]) {
    let widths = column_widths(records);
    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);

    println!("{}", "📊 Converted rows:".bold().cyan());
    println!("{}", "─".repeat(total_width));

    let header: Vec<String> = crate::types::OUTPUT_HEADERS
        .iter()
        .zip(widths)
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect();
    println!("{}", header.join("  ").bold());
    println!("{}", "─".repeat(total_width));

    for record in records {
        let cells: Vec<String> = record
            .fields()
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (value, width))| {
                // balance column right-aligned
                if idx == 4 {
                    format!("{:>width$}", value, width = width)
                } else {
                    format!("{:<width$}", value, width = width)
                }
            })
            .collect();

        let line = cells.join("  ");
        if record.transaction_type == crate::types::TransactionType::Credit {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}
