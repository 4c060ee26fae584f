use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cex_cli::request::{RequestOverrides, build_request, load_preset};
use cex_engine::{SearchRequest, run_export, run_search};
use cex_model::DateCombine;
use cex_output::ExportArtifact;
use cex_repo::{ContentRepository, InMemoryRepository};

use crate::cli::{DateModeArg, ExportArgs, LanguagesArgs, SearchArgs};
use crate::summary::{RunSummary, print_languages};

pub fn run_export_command(args: &ExportArgs) -> Result<RunSummary> {
    let span = info_span!("export", snapshot = %args.snapshot.display());
    let _guard = span.enter();

    let repo = InMemoryRepository::from_json_file(&args.snapshot)?;
    let preset = match &args.request {
        Some(path) => Some(load_preset(path)?),
        None => None,
    };
    let request = build_request(preset, &overrides_from_args(args));

    let table = run_export(&repo, &request).context("export failed")?;
    let artifact = ExportArtifact::from_table(&table);
    let artifact_path = write_to_out_dir(args.out.as_deref(), &artifact)?;
    info!(path = %artifact_path.display(), "artifact written");

    Ok(RunSummary {
        items_scanned: table.items_scanned,
        rows: table.rows.len(),
        columns: table.header.len(),
        artifact_path,
    })
}

pub fn run_search_command(args: &SearchArgs) -> Result<RunSummary> {
    let span = info_span!("search", snapshot = %args.snapshot.display());
    let _guard = span.enter();

    let repo = InMemoryRepository::from_json_file(&args.snapshot)?;
    let request = SearchRequest {
        start_path: args.start_path.clone(),
        text: args.text.clone(),
        fields: args.fields.clone(),
    };
    let table = run_search(&repo, &request).context("search failed")?;
    let artifact = ExportArtifact::from_table(&table);
    let artifact_path = write_to_out_dir(args.out.as_deref(), &artifact)?;
    info!(path = %artifact_path.display(), "artifact written");

    Ok(RunSummary {
        items_scanned: table.items_scanned,
        rows: table.rows.len(),
        columns: table.header.len(),
        artifact_path,
    })
}

pub fn run_languages_command(args: &LanguagesArgs) -> Result<()> {
    let repo = InMemoryRepository::from_json_file(&args.snapshot)?;
    print_languages(&repo.languages());
    Ok(())
}

fn write_to_out_dir(out: Option<&Path>, artifact: &ExportArtifact) -> Result<PathBuf> {
    let out_dir = out.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    cex_output::write_artifact(&out_dir, artifact)
}

fn overrides_from_args(args: &ExportArgs) -> RequestOverrides {
    RequestOverrides {
        start_path: args.start_path.clone(),
        additional_start_paths: args.add_path.clone(),
        query: args.query.clone(),
        templates: args.templates.clone(),
        expand_inheritance: args.inherit,
        fields: args.fields.clone(),
        all_fields: args.all_fields,
        include_name: args.name,
        include_ids: args.ids,
        include_template: args.template,
        include_linked_ids: args.linked_ids,
        include_raw_html: args.raw_html,
        include_date_created: args.created,
        include_created_by: args.created_by,
        include_date_modified: args.modified,
        include_modified_by: args.modified_by,
        include_never_publish: args.never_publish,
        include_workflow_name: args.workflow,
        include_workflow_state: args.workflow_state,
        include_referrers: args.referrers,
        require_layout: args.require_layout,
        language: args.language.clone(),
        all_languages: args.all_languages,
        created_from: args.created_from,
        created_to: args.created_to,
        modified_from: args.modified_from,
        modified_to: args.modified_to,
        date_mode: args.date_mode.map(|mode| match mode {
            DateModeArg::Or => DateCombine::Or,
            DateModeArg::And => DateCombine::And,
        }),
        file_name: args.file_name.clone(),
    }
}
