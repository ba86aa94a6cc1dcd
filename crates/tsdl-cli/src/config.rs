//! Lowering options for a CLI run.
//!
//! A `--config` file supplies the base options; without one the CLI emits
//! helpers so every output file runs standalone. Flags given on the command
//! line override either.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tsdl_common::{LoweringOptions, NewLineKind};

/// Options from the config file named by `args`, then the flags.
pub fn resolve_options(args: &CliArgs) -> Result<LoweringOptions> {
    let mut options = match &args.config {
        Some(path) => load_config(path)?,
        None => LoweringOptions {
            emit_helpers: true,
            ..LoweringOptions::default()
        },
    };
    if let Some(indent_size) = args.indent_size {
        options.formatting.indent_size = indent_size;
    }
    if args.use_tabs {
        options.formatting.use_tabs = true;
    }
    if let Some(new_line) = args.new_line {
        options.formatting.new_line_character = NewLineKind::from(new_line).as_str().to_string();
    }
    if args.no_emit_helpers {
        options.emit_helpers = false;
    }
    validate(&options)?;
    Ok(options)
}

pub fn load_config(path: &Path) -> Result<LoweringOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    LoweringOptions::from_json(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn validate(options: &LoweringOptions) -> Result<()> {
    let new_line = options.formatting.new_line();
    if NewLineKind::from_sequence(new_line).is_none() {
        anyhow::bail!("unsupported newLineCharacter {new_line:?}; expected \"\\n\" or \"\\r\\n\"");
    }
    if options.formatting.indent_size == 0 {
        anyhow::bail!("indentSize must be at least 1");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["tsdl", "input.ts"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn defaults_emit_helpers() {
        let options = resolve_options(&args(&[])).expect("options");
        assert!(options.emit_helpers);
        assert_eq!(options.formatting.indent_size, 4);
    }

    #[test]
    fn flags_override_defaults() {
        let options = resolve_options(&args(&[
            "--indent-size",
            "2",
            "--use-tabs",
            "--new-line",
            "crlf",
            "--no-emit-helpers",
        ]))
        .expect("options");
        assert_eq!(options.formatting.indent_size, 2);
        assert!(options.formatting.use_tabs);
        assert_eq!(options.formatting.new_line(), "\r\n");
        assert!(!options.emit_helpers);
    }

    #[test]
    fn zero_indent_is_rejected() {
        let error = resolve_options(&args(&["--indent-size", "0"])).expect_err("invalid");
        assert!(error.to_string().contains("indentSize"));
    }
}
