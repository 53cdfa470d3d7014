//! Analyze command - classify every column of a data file.

use std::path::PathBuf;

use colored::Colorize;
use typesift::{DataType, ParserConfig, TypeSift, TypeSiftConfig};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    delimiter: Option<char>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = TypeSiftConfig {
        parser: ParserConfig {
            delimiter: delimiter.map(|c| c as u8),
            ..ParserConfig::default()
        },
        ..TypeSiftConfig::default()
    };
    let engine = TypeSift::with_config(config);

    if !json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let result = engine.analyze(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} rows, {} columns ({})",
            result.source.row_count.to_string().white().bold(),
            result.source.column_count.to_string().white().bold(),
            result.source.format
        );
        println!();

        for column in &result.columns {
            let type_label = format!("{:?}", column.data_type).to_lowercase();
            let type_colored = match column.data_type {
                DataType::Number => type_label.blue(),
                DataType::Boolean => type_label.magenta(),
                DataType::Date => type_label.yellow(),
                DataType::Unknown => type_label.red(),
                DataType::String => type_label.green(),
            };

            println!(
                "  {:24} {:10} {:14} {:>5.0}%",
                column.header.white().bold(),
                type_colored,
                column.data_format.to_string(),
                column.confidence * 100.0
            );

            if verbose {
                println!("      {}", column.reasoning.main_reason.dimmed());
                for detail in &column.reasoning.details {
                    println!("      {}", detail.dimmed());
                }
                if !column.sample_values.is_empty() {
                    println!(
                        "      {} {}",
                        "samples:".dimmed(),
                        column.sample_values.join(", ").dimmed()
                    );
                }
            }
        }

        let inconclusive = result
            .columns
            .iter()
            .filter(|c| c.data_type == DataType::Unknown)
            .count();
        if inconclusive > 0 {
            println!();
            println!(
                "{} {} column(s) could not be classified",
                "Note:".yellow().bold(),
                inconclusive
            );
        }
    }

    if let Some(output_path) = output {
        result.save(&output_path)?;
        if !json {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                output_path.display().to_string().white()
            );
        }
    }

    Ok(())
}
