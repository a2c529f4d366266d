use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use astview::config::INDENT_UNIT;
use astview::{PipelineController, TreeFormatter};
use clap::Parser;

#[derive(Parser)]
#[command(name = "astview")]
#[command(about = "Print the syntax tree of a Go source file")]
struct Args {
    /// Go source file; standard input when omitted or `-`
    file: Option<PathBuf>,

    /// Render the built-in starter program instead of reading input
    #[arg(long, conflicts_with = "file")]
    starter: bool,

    /// Spaces per tree level
    #[arg(long, default_value_t = INDENT_UNIT)]
    indent: usize,
}

fn read_source(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(text)
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let controller = PipelineController::with_formatter(TreeFormatter::with_indent(args.indent));
    if !args.starter {
        let text = read_source(args.file.as_ref())?;
        controller.on_text_changed(&text);
    }

    let rendered = controller.current_rendered();
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
