use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use subaudit_core::ParseResult;
use subaudit_detect::{
    demo_result, write_csv_report, write_json_report, AuditSession, Catalog, DetectionEngine,
    SubscriptionMatcher, TableOptions,
};
use tracing::info;

use crate::render;
use crate::OutputFormat;

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_path(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
            info!("Loaded {} catalog rules from {}", catalog.len(), path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::builtin().clone()),
    }
}

pub async fn cmd_scan(
    catalog: Option<&Path>,
    file: &Path,
    format: OutputFormat,
    export: Option<&Path>,
    delimiter: Option<u8>,
) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let engine = DetectionEngine::new(SubscriptionMatcher::new(catalog))
        .with_table_options(TableOptions { delimiter });
    let session = AuditSession::new(engine);

    let result = session
        .scan_path(file)
        .await
        .with_context(|| format!("Failed to process {}", file.display()))?
        .ok_or_else(|| anyhow!("Scan of {} was superseded", file.display()))?;

    print_result(&result, format)?;

    if let Some(path) = export {
        export_report(&result, path)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

pub fn cmd_demo(format: OutputFormat) -> Result<()> {
    print_result(&demo_result(), format)
}

pub fn cmd_catalog(catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    println!("{}", render::catalog_table(&catalog));
    Ok(())
}

fn print_result(result: &ParseResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render::summary(result));
            if !result.is_empty() {
                println!("{}", render::categories(result));
            }
            println!("{}", render::subscriptions(result));
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_json_report(result, &mut out)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn export_report(result: &ParseResult, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        write_json_report(result, &mut writer)?;
    } else {
        write_csv_report(result, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
