//! Source discovery, lowering and output for one CLI run.
//!
//! Files are independent: each is parsed and lowered on its own, in
//! parallel, and a failure in one file does not stop the others.

use crate::args::CliArgs;
use crate::config::resolve_options;
use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info, warn};
use tsdl_common::{LineMap, LoweringOptions};
use walkdir::WalkDir;

/// A source file and where its output goes, relative to the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path of the source below the input it was found in.
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Output files written (or, with `--check`, files lowered).
    pub lowered: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lower every source named by `args`.
pub fn run(args: &CliArgs) -> Result<RunSummary> {
    let options = resolve_options(args)?;
    let sources = collect_sources(&args.inputs)?;
    debug!(files = sources.len(), "collected sources");
    let (sources, collisions) = split_output_collisions(sources, args.out_dir.as_deref());

    let outcomes: Vec<(PathBuf, Result<PathBuf>)> = sources
        .par_iter()
        .map(|source| {
            let _span = debug_span!("file", path = %source.path.display()).entered();
            let outcome = process_file(source, args, &options);
            (source.path.clone(), outcome)
        })
        .collect();

    let mut summary = RunSummary {
        failures: collisions,
        ..RunSummary::default()
    };
    for (path, outcome) in outcomes {
        match outcome {
            Ok(output) => summary.lowered.push(output),
            Err(err) => summary.failures.push(FileFailure {
                path,
                message: format!("{err:#}"),
            }),
        }
    }
    info!(
        lowered = summary.lowered.len(),
        failed = summary.failures.len(),
        "lowering finished"
    );
    Ok(summary)
}

fn process_file(source: &SourceFile, args: &CliArgs, options: &LoweringOptions) -> Result<PathBuf> {
    let text = fs::read_to_string(&source.path)
        .with_context(|| format!("failed to read {}", source.path.display()))?;
    let lowered = lower_source(&text, options)?;
    let output = output_path(source, args.out_dir.as_deref());
    if args.check {
        return Ok(output);
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(&output, lowered).with_context(|| format!("failed to write {}", output.display()))?;
    debug!(output = %output.display(), "wrote output");
    Ok(output)
}

/// Parse `text` and render its lowered form.
pub fn lower_source(text: &str, options: &LoweringOptions) -> Result<String> {
    let tree = tsdl_parser::parse(text).map_err(|err| {
        let position = LineMap::build(text).position_of(err.offset);
        anyhow::anyhow!(
            "{}:{}: {}",
            position.line + 1,
            position.character + 1,
            err.message
        )
    })?;
    let lowered = tsdl_emitter::lower(&tree, options)?;
    Ok(lowered.full_text())
}

/// Files named directly, plus every `.ts` file below named directories.
///
/// Declaration files (`.d.ts`) hold no code and are skipped during the
/// directory walk. The result is sorted so runs are reproducible.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for input in inputs {
        let metadata =
            fs::metadata(input).with_context(|| format!("cannot read input {}", input.display()))?;
        if metadata.is_file() {
            let relative = input
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| input.clone());
            sources.push(SourceFile {
                path: input.clone(),
                relative,
            });
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", input.display()))?;
            if !entry.file_type().is_file() || !is_lowerable(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(input)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            sources.push(SourceFile {
                path: entry.path().to_path_buf(),
                relative,
            });
        }
    }
    sources.sort_by(|a, b| a.path.cmp(&b.path));
    sources.dedup_by(|a, b| a.path == b.path);
    Ok(sources)
}

/// Separate out sources whose output path another source also maps to.
///
/// Every source in a collision is reported as a failure and none of them is
/// written, so no output silently replaces another.
pub fn split_output_collisions(
    sources: Vec<SourceFile>,
    out_dir: Option<&Path>,
) -> (Vec<SourceFile>, Vec<FileFailure>) {
    let mut claims: FxHashMap<PathBuf, Vec<PathBuf>> = FxHashMap::default();
    for source in &sources {
        claims
            .entry(output_path(source, out_dir))
            .or_default()
            .push(source.path.clone());
    }

    let mut kept = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();
    for source in sources {
        let output = output_path(&source, out_dir);
        let others: Vec<String> = claims
            .get(&output)
            .into_iter()
            .flatten()
            .filter(|path| **path != source.path)
            .map(|path| path.display().to_string())
            .collect();
        if others.is_empty() {
            kept.push(source);
            continue;
        }
        warn!(output = %output.display(), source = %source.path.display(), "output path collision");
        failures.push(FileFailure {
            message: format!(
                "output {} would also be written by {}",
                output.display(),
                others.join(", ")
            ),
            path: source.path,
        });
    }
    (kept, failures)
}

fn is_lowerable(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

/// `name.js` next to the source, or at the same relative path under
/// `out_dir`.
pub fn output_path(source: &SourceFile, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(dir) => dir.join(&source.relative).with_extension("js"),
        None => source.path.with_extension("js"),
    }
}
