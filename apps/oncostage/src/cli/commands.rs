//! # CLI Command Implementations
//!
//! Every command reads from the [`Context`] built once per invocation and
//! prints either text or JSON to stdout. Logs go to stderr.

use super::PathologyArgs;
use crate::config::Config;
use crate::report::{AssessmentReport, CatalogStamp, ReferenceReport, StagingReport, catalog_entries};
use oncostage_core::primitives::MAX_SNAPSHOT_PAYLOAD_SIZE;
use oncostage_core::types::Grade;
use oncostage_core::{
    CaseData, GuidelineCatalog, Locale, OncoError, PathologyData, PostOpTnmData, StagingResult,
    TextCatalog, TnmData, catalog_from_bytes, catalog_to_bytes, classify_clinical,
    classify_pathological, classify_wilms, evaluate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum case file size (1 MB).
const MAX_CASE_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum snapshot file size: header plus the largest accepted payload.
const MAX_SNAPSHOT_FILE_SIZE: u64 = MAX_SNAPSHOT_PAYLOAD_SIZE as u64 + 64;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), OncoError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OncoError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(OncoError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, OncoError> {
    let canonical = path.canonicalize().map_err(|e| {
        OncoError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(OncoError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Canonicalize the parent of an output path and require a directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, OncoError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        OncoError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(OncoError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| OncoError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Settings and catalog shared by every command of one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub locale: Locale,
    pub json_mode: bool,
    pub catalog: GuidelineCatalog,
    pub text: TextCatalog,
}

impl Context {
    /// Merge config with command-line overrides and load the catalog.
    pub fn new(
        config: &Config,
        locale: Option<Locale>,
        json_mode: bool,
    ) -> Result<Self, OncoError> {
        let catalog = match &config.catalog_snapshot {
            Some(path) => load_catalog_snapshot(path)?,
            None => GuidelineCatalog::standard(),
        };
        tracing::debug!(
            "Active catalog: {} v{} ({} options)",
            catalog.name,
            catalog.version,
            catalog.len()
        );

        Ok(Self {
            locale: locale.unwrap_or(config.locale),
            json_mode: json_mode || config.json_mode,
            catalog,
            text: TextCatalog::standard(),
        })
    }
}

/// Read a catalog snapshot written by `export-catalog`.
pub fn load_catalog_snapshot(path: &Path) -> Result<GuidelineCatalog, OncoError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_SNAPSHOT_FILE_SIZE)?;

    let data = std::fs::read(&validated_path)
        .map_err(|e| OncoError::IoError(format!("Read file: {}", e)))?;
    let catalog = catalog_from_bytes(&data)?;

    tracing::info!(
        "Loaded catalog snapshot {:?}: {} v{}",
        validated_path,
        catalog.name,
        catalog.version
    );
    Ok(catalog)
}

/// Read a JSON case record.
pub fn load_case(path: &Path) -> Result<CaseData, OncoError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_CASE_FILE_SIZE)?;

    let content = std::fs::read_to_string(&validated_path)
        .map_err(|e| OncoError::IoError(format!("Read file: {}", e)))?;
    serde_json::from_str(&content).map_err(|e| OncoError::DeserializationError(e.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), OncoError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| OncoError::SerializationError(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

// =============================================================================
// STAGING COMMANDS
// =============================================================================

fn print_staging(ctx: &Context, result: Option<&StagingResult>) -> Result<(), OncoError> {
    let Some(result) = result else {
        tracing::warn!("Staging input incomplete");
        if ctx.json_mode {
            return print_json(&serde_json::json!({ "staging": null }));
        }
        println!("Staging input incomplete: no stage computed.");
        return Ok(());
    };

    let report = StagingReport::new(result, ctx.locale);
    if ctx.json_mode {
        return print_json(&report);
    }

    println!("{} [{}]", report.stage_label, report.severity);
    println!("{}", report.explanation);
    for factor in &report.factors {
        println!("  - {}", factor);
    }
    Ok(())
}

/// Clinical stage group from cT, cN and cM.
pub fn cmd_stage(ctx: &Context, t: &str, n: &str, m: &str) -> Result<(), OncoError> {
    let result = classify_clinical(&TnmData::new(t, n, m));
    print_staging(ctx, result.as_ref())
}

/// Pathology record assembled from command-line flags.
pub fn pathology_from_args(args: &PathologyArgs) -> Result<PathologyData, OncoError> {
    Ok(PathologyData {
        histology: args.histology,
        grade: args.grade.map(Grade::new).transpose()?,
        tumor_size_mm: args.size_mm,
        margin_status: args.margin,
        vascular_invasion: args.vascular_invasion,
        lymph_node_invasion: args.lymphovascular_invasion,
        sarcomatoid_features: args.sarcomatoid,
        necrosis: args.necrosis,
        is_ruptured: args.ruptured,
        is_bilateral: args.bilateral,
        wilms_type: args.wilms_type,
    })
}

/// Post-operative stage, RCC or Wilms.
pub fn cmd_stage_post(
    ctx: &Context,
    pt: &str,
    pn: &str,
    pm: Option<&str>,
    wilms: bool,
    args: &PathologyArgs,
) -> Result<(), OncoError> {
    let mut tnm = PostOpTnmData::new(pt, pn);
    if let Some(pm) = pm {
        tnm = tnm.with_p_m(pm);
    }
    let pathology = pathology_from_args(args)?;

    let result = if wilms {
        classify_wilms(&tnm, Some(&pathology))
    } else {
        classify_pathological(&tnm, Some(&pathology))
    };
    print_staging(ctx, result.as_ref())
}

// =============================================================================
// EVALUATE COMMAND
// =============================================================================

/// Assess one case against the active catalog.
pub fn assess(ctx: &Context, case: &CaseData) -> Result<AssessmentReport, OncoError> {
    let assessment = evaluate(case, &ctx.catalog)?;
    AssessmentReport::new(&assessment, &ctx.catalog, &ctx.text, ctx.locale)
}

pub fn cmd_evaluate(ctx: &Context, file: &Path) -> Result<(), OncoError> {
    let case = load_case(file)?;
    tracing::info!("Evaluating case {:?}", case.id);

    let report = assess(ctx, &case)?;
    if report.staging.is_none() {
        tracing::warn!("Case {:?}: staging input incomplete", case.id);
    }

    if ctx.json_mode {
        print_json(&report)
    } else {
        print!("{}", report.to_text());
        Ok(())
    }
}

// =============================================================================
// CATALOG COMMANDS
// =============================================================================

pub fn cmd_catalog(ctx: &Context) -> Result<(), OncoError> {
    let entries = catalog_entries(&ctx.catalog, &ctx.text, ctx.locale);

    if ctx.json_mode {
        return print_json(&serde_json::json!({
            "name": ctx.catalog.name,
            "version": ctx.catalog.version,
            "effective_year": ctx.catalog.effective_year,
            "options": entries,
        }));
    }

    println!("{} v{} ({})", ctx.catalog.name, ctx.catalog.version, ctx.catalog.effective_year);
    println!("==================");
    for entry in &entries {
        println!("{:<28} {} [{}]", entry.id, entry.name, entry.category);
        for citation in &entry.citations {
            println!("{:<28}   {}", "", citation);
        }
    }
    Ok(())
}

pub fn cmd_references(ctx: &Context) -> Result<(), OncoError> {
    let references: Vec<ReferenceReport> = ctx
        .catalog
        .references()
        .iter()
        .map(|r| ReferenceReport::new(r, ctx.locale))
        .collect();

    if ctx.json_mode {
        return print_json(&references);
    }

    for reference in &references {
        println!("{} {} ({})", reference.title, reference.version, reference.year);
        println!("  {}", reference.url);
    }
    Ok(())
}

pub fn cmd_fingerprint(ctx: &Context) -> Result<(), OncoError> {
    let stamp = CatalogStamp::new(&ctx.catalog)?;

    if ctx.json_mode {
        return print_json(&stamp);
    }

    println!("Catalog:     {} v{}", stamp.name, stamp.version);
    println!("Fingerprint: {}", stamp.fingerprint);
    if let Some(blake3) = &stamp.blake3 {
        println!("BLAKE3:      {}", blake3);
    }
    Ok(())
}

/// Encode the active catalog as a snapshot or pretty JSON.
pub fn export_catalog_bytes(catalog: &GuidelineCatalog, format: &str) -> Result<Vec<u8>, OncoError> {
    match format {
        "snapshot" => catalog_to_bytes(catalog),
        "json" => serde_json::to_vec_pretty(catalog)
            .map_err(|e| OncoError::SerializationError(e.to_string())),
        _ => Err(OncoError::InvalidValue {
            field: "format",
            value: format.to_string(),
        }),
    }
}

pub fn cmd_export_catalog(ctx: &Context, output: &Path, format: &str) -> Result<(), OncoError> {
    let validated_output = validate_output_path(output)?;
    let data = export_catalog_bytes(&ctx.catalog, format)?;

    std::fs::write(&validated_output, &data)
        .map_err(|e| OncoError::IoError(format!("Write file: {}", e)))?;

    tracing::info!("Exported {} bytes to {:?}", data.len(), validated_output);
    if ctx.json_mode {
        return print_json(&serde_json::json!({
            "path": validated_output,
            "bytes": data.len(),
            "format": format,
        }));
    }
    println!("Exported {} bytes to {:?}", data.len(), validated_output);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
