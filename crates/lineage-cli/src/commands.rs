use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::{debug, info};

use lineage_model::{
    FilesystemLocationFile, LoadLocation, LocationFile, LocationSheet,
};
use lineage_report::{render_input_list, render_origin_html, render_origin_text};

use crate::cli::{IdentifyArgs, OpenArgs, RenderArgs, RenderFormatArg};
use crate::manifest::{LineageManifest, resolve_manifest};

#[derive(Serialize)]
struct IdentifyReport {
    load_identifier: String,
    interactive_identifier: String,
    interactive_uri: Option<String>,
    folder: Option<String>,
    size: u64,
    modified: String,
}

pub fn run_identify(args: &IdentifyArgs) -> Result<()> {
    debug!(path = %args.path.display(), "identify location");
    let mut file = FilesystemLocationFile::new(&args.path);
    if let Some(root) = &args.root {
        file = file.with_root_folder(root);
    }
    // Stat up front so a missing file fails with context instead of
    // degrading to the path-only identifier.
    let stat = file
        .stat()
        .with_context(|| format!("stat {}", args.path.display()))?;

    let file: Arc<dyn LocationFile> = Arc::new(file);
    let sheet = args.sheet.as_deref();
    let (load_identifier, interactive_identifier, interactive_uri) = match args.row {
        Some(row) => {
            let block = LocationSheet::new(file.clone(), sheet).block(row);
            (
                block.load_identifier(),
                block.interactive_identifier(),
                block.interactive_uri(true),
            )
        }
        None => (
            file.load_identifier(),
            file.interactive_identifier_at(sheet, None),
            file.interactive_uri_at(sheet, None, true),
        ),
    };

    let report = IdentifyReport {
        load_identifier,
        interactive_identifier,
        interactive_uri,
        folder: file
            .local_folder_path()
            .map(|folder| folder.display().to_string()),
        size: stat.len,
        modified: stat.modified.format("%Y-%m-%dT%H:%M:%S").to_string(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report_table(&report);
    }
    Ok(())
}

fn print_report_table(report: &IdentifyReport) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec!["Load identifier", &report.load_identifier]);
    table.add_row(vec![
        "Interactive identifier",
        &report.interactive_identifier,
    ]);
    table.add_row(vec![
        "URI",
        report.interactive_uri.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec!["Folder", report.folder.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Size", &format!("{} B", report.size)]);
    table.add_row(vec!["Modified", &report.modified]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn run_open(args: &OpenArgs) -> Result<()> {
    let file = FilesystemLocationFile::new(&args.path);
    info!(path = %args.path.display(), "launching interactive viewer");
    file.interactive_open_at(args.sheet.as_deref(), args.row, args.read_only)
        .with_context(|| format!("open {}", args.path.display()))?;
    Ok(())
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let text = fs::read_to_string(&args.manifest)
        .with_context(|| format!("read manifest {}", args.manifest.display()))?;
    let manifest: LineageManifest = serde_json::from_str(&text)
        .with_context(|| format!("parse manifest {}", args.manifest.display()))?;
    let origin = resolve_manifest(&manifest)?;

    let rendered = match args.format {
        RenderFormatArg::Text => render_origin_text(&origin),
        RenderFormatArg::Html => render_origin_html(&origin),
    };
    println!("{rendered}");

    if args.inputs {
        println!();
        println!("{}", render_input_list(&origin));
    }
    Ok(())
}
