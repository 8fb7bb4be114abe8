use clap::Parser;
use onekeeplib::{convert_file, model::ConversionReport, ConvertError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const NOTE: &str =
    "IMPORTANT NOTE: this tool ignores all fields that are not used in KeePass on purpose.";

#[derive(Parser, Debug)]
#[command(
    name = "onekeep",
    version,
    about = "Конвертация экспорта 1Password (TSV) в XML KeePassX"
)]
struct Cli {
    /// Файл 1Password в формате TAB delimited text
    #[arg(value_name = "FILE", value_parser = existing_file)]
    input: PathBuf,

    /// Не печатать примечание и пропущенные записи
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Язык заголовков входного файла (en, nl)
    #[arg(short = 'l', long = "lang", value_name = "LANG", default_value = "en")]
    lang: String,
}

/// Отсутствующий файл отклоняется ещё при разборе аргументов (ошибка usage).
fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("the file {} does not exist", path.display()))
    }
}

fn write_note<W: Write>(out: &mut W, quiet: bool) -> io::Result<()> {
    if !quiet {
        writeln!(out, "{NOTE}")?;
    }
    Ok(())
}

fn write_report<W: Write>(
    out: &mut W,
    report: &ConversionReport,
    quiet: bool,
) -> io::Result<()> {
    if !quiet {
        for skipped in &report.skipped {
            writeln!(out, "{skipped}")?;
        }
    }
    writeln!(out, "Processed {} entries", report.processed)
}

fn error_message(input: &Path, err: &ConvertError) -> String {
    match err {
        ConvertError::MalformedRecord { .. } => {
            format!("Error: file {}, {err}", input.display())
        }
        _ => format!("Error: {err}"),
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<ConversionReport, ConvertError> {
    write_note(out, cli.quiet)?;
    let report = convert_file(&cli.input, &cli.lang)?;
    write_report(out, &report, cli.quiet)?;
    Ok(report)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "arguments parsed");

    match run(&cli, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&cli.input, &e));
            ExitCode::FAILURE
        }
    }
}
