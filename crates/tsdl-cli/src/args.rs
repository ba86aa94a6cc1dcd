use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tsdl_common::NewLineKind;

/// CLI arguments for the tsdl binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsdl",
    version,
    about = "Lower TypeScript-dialect sources to plain JavaScript"
)]
pub struct CliArgs {
    /// Source files, or directories searched for `.ts` files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the emitted files. Defaults to next to each source.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// JSON file with lowering options (`indentSize`, `useTabs`,
    /// `newLineCharacter`, `emitHelpers`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    // ==================== Formatting ====================
    /// Number of columns per indentation level.
    #[arg(long = "indent-size", alias = "indentSize")]
    pub indent_size: Option<usize>,

    /// Indent synthesized code with tabs.
    #[arg(long = "use-tabs", alias = "useTabs")]
    pub use_tabs: bool,

    /// Line terminator for synthesized line breaks.
    #[arg(long = "new-line", alias = "newLine", value_enum, ignore_case = true)]
    pub new_line: Option<NewLine>,

    // ==================== Output ====================
    /// Do not prepend the `__extends` helper to files with derived classes.
    #[arg(long = "no-emit-helpers", alias = "noEmitHelpers")]
    pub no_emit_helpers: bool,

    /// Parse and lower every file but write nothing.
    #[arg(long)]
    pub check: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum NewLine {
    #[value(name = "crlf")]
    Crlf,
    #[value(name = "lf")]
    Lf,
}

impl From<NewLine> for NewLineKind {
    fn from(value: NewLine) -> Self {
        match value {
            NewLine::Crlf => NewLineKind::CarriageReturnLineFeed,
            NewLine::Lf => NewLineKind::LineFeed,
        }
    }
}
