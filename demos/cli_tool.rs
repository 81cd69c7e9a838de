//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using xlsxspec for converting product specification sheets to storefront HTML.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use xlsxspec::{
    output_file_name, BrandPreset, ConversionReport, ConverterBuilder, OutputFormat,
    SheetSelector, XlsxSpecError,
};

/// Parsed command-line options
struct Options {
    input_path: String,
    output_path: String,
    format: OutputFormat,
    manual_width: Option<String>,
    brand: BrandPreset,
    sheet_selector: SheetSelector,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let options = parse_options(&args);

    match convert_sheet(&options) {
        Ok(report) => {
            println!(
                "Conversion completed: {} -> {} ({} rows)",
                options.input_path,
                options.output_path,
                report.rows.len()
            );
            for diagnostic in &report.diagnostics {
                eprintln!("Warning: {}", diagnostic);
            }
            if !report.failures.is_empty() {
                eprintln!("\n{} SKU(s) failed:", report.failures.len());
                for failure in &report.failures {
                    eprintln!("  {}: {}", failure.sku, failure.message);
                }
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input.xlsx> <output.json|output.csv|output-dir> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --format <json|csv>     Output format when writing into a directory (default: csv)");
    eprintln!("  --manual-width <w>      Fixed header column width (e.g. 220px, 25%)");
    eprintln!("  --brand <neutral|sage>  Brand style preset (default: neutral)");
    eprintln!("  --sheet-index <n>       Select sheet by index (0-based)");
    eprintln!("\nExamples:");
    eprintln!("  {} specs.xlsx specs.csv", program);
    eprintln!("  {} specs.xlsx specs.json --brand neutral", program);
    eprintln!("  {} specs.xlsx specs.csv --manual-width 220px --sheet-index 1", program);
    eprintln!("  {} specs.xlsx out/ --format json", program);
}

fn parse_format(value: &str) -> Option<OutputFormat> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Some(OutputFormat::Json),
        "csv" => Some(OutputFormat::Csv),
        _ => None,
    }
}

fn parse_options(args: &[String]) -> Options {
    let input_path = args[1].clone();
    let mut output_path = args[2].clone();

    let mut format_flag = None;
    let mut manual_width = None;
    let mut brand = BrandPreset::neutral();
    let mut sheet_selector = SheetSelector::First;

    let mut i = 3;
    while i < args.len() {
        let Some(value) = args.get(i + 1) else {
            eprintln!("Error: {} requires a value", args[i]);
            process::exit(1);
        };

        match args[i].as_str() {
            "--format" => {
                format_flag = Some(parse_format(value).unwrap_or_else(|| {
                    eprintln!("Error: Unknown format: {}", value);
                    process::exit(1);
                }));
            }
            "--manual-width" => {
                manual_width = Some(value.clone());
            }
            "--brand" => {
                brand = match value.as_str() {
                    "neutral" => BrandPreset::neutral(),
                    "sage" => BrandPreset::sage(),
                    other => {
                        eprintln!("Error: Unknown brand: {}", other);
                        process::exit(1);
                    }
                };
            }
            "--sheet-index" => {
                let index = value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet index: {}", value);
                    process::exit(1);
                });
                sheet_selector = SheetSelector::Index(index);
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 2;
    }

    let format = if Path::new(&output_path).is_dir() {
        // ディレクトリ指定時は入力名と現在時刻からファイル名を作る
        let format = format_flag.unwrap_or(OutputFormat::Csv);
        let name = output_file_name(&input_path, chrono::Local::now().naive_local(), format);
        output_path = Path::new(&output_path).join(name).to_string_lossy().into_owned();
        format
    } else {
        let from_extension = Path::new(&output_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(parse_format);
        match format_flag.or(from_extension) {
            Some(format) => format,
            None => {
                eprintln!("Error: Output file must end in .json or .csv: {}", output_path);
                process::exit(1);
            }
        }
    };

    Options {
        input_path,
        output_path,
        format,
        manual_width,
        brand,
        sheet_selector,
    }
}

fn convert_sheet(options: &Options) -> Result<ConversionReport, XlsxSpecError> {
    let mut builder = ConverterBuilder::new()
        .with_brand(options.brand.clone())
        .with_sheet_selector(options.sheet_selector.clone());

    if let Some(width) = &options.manual_width {
        builder = builder.with_auto_width(false).with_manual_width(width.as_str());
    }

    let converter = builder.build()?;

    // Open input file
    let input = File::open(&options.input_path)?;
    let report = converter.convert(input)?;

    // Write the SKU / Region / HTML table
    let output = File::create(&options.output_path)?;
    let mut writer = io::BufWriter::new(output);
    report.write(options.format, &mut writer)?;
    writer.flush()?;

    Ok(report)
}

fn handle_error(error: XlsxSpecError) {
    match error {
        XlsxSpecError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        XlsxSpecError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        XlsxSpecError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check your sheet selection and brand settings.");
        }
        XlsxSpecError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates input limits (e.g., file size limit).");
        }
        XlsxSpecError::NoValidData(guidance) => {
            eprintln!("{}", guidance);
        }
        other => {
            eprintln!("Error: {}", other);
        }
    }
}
