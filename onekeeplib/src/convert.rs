//! Полный проход: TSV -> сопоставление -> фильтр -> XML KeePassX.

use crate::{
    error::{ConvertError, Result},
    formats::{keepassx::KeepassX, onepassword::TsvRecords},
    mapper::resolve_profile,
    model::{ConversionReport, Outcome, SkippedRow},
    profile::Language,
    traits::WriteFormat,
    transform::{raw_title, transform},
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const OUTPUT_SUFFIX: &str = ".xml";

/// `<input>` + `.xml`, рядом с входным файлом.
pub fn output_path(input: &Path) -> PathBuf {
    let mut s = input.as_os_str().to_owned();
    s.push(OUTPUT_SUFFIX);
    PathBuf::from(s)
}

/// Потоковая конвертация. При ошибке разбора уже принятые записи
/// остаются в `output`.
pub fn convert<R, W>(input: R, output: W, language: Language) -> Result<ConversionReport>
where
    R: Read,
    W: Write,
{
    let records = TsvRecords::new(input)?;
    let mapping = resolve_profile(records.headers(), language);

    let mut report = ConversionReport::default();
    let entries = records.filter_map(|rec| {
        let rec = match rec {
            Ok(rec) => rec,
            Err(e) => return Some(Err(e)),
        };
        report.processed += 1;
        match transform(&rec, &mapping) {
            Outcome::Entry(entry) => Some(Ok(entry)),
            Outcome::Skip(reason) => {
                let skipped = SkippedRow {
                    row: report.processed,
                    reason,
                    title: raw_title(&rec, &mapping).to_string(),
                };
                debug!(row = skipped.row, ?reason, "row skipped");
                report.skipped.push(skipped);
                None
            }
        }
    });

    let written = KeepassX::write(output, entries)?;
    report.written = written;
    info!(
        processed = report.processed,
        written = report.written,
        skipped = report.skipped.len(),
        "conversion finished"
    );
    Ok(report)
}

/// Проверки до открытия файлов: сначала путь, затем язык.
/// Выходной файл перезаписывается без предупреждения.
pub fn convert_file(input: &Path, language: &str) -> Result<ConversionReport> {
    if !input.is_file() {
        return Err(ConvertError::InvalidInputPath(input.to_path_buf()));
    }
    let language: Language = language.parse()?;
    let out_path = output_path(input);

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(&out_path)?);
    debug!(input = %input.display(), output = %out_path.display(), %language, "converting");

    let mut report = convert(reader, writer, language)?;
    report.output = Some(out_path);
    Ok(report)
}
