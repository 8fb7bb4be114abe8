use onekeeplib::{convert, Language};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: TSV (en) из stdin -> XML KeePassX в stdout
    let report = convert(std::io::stdin().lock(), std::io::stdout().lock(), Language::En)?;
    eprintln!("processed {}, written {}", report.processed, report.written);
    Ok(())
}
