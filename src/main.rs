// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use vcd_json::{parse_vcd_file, to_json};

/// Convert a Value Change Dump into a JSON document.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The VCD file to read
    input: PathBuf,

    /// Where to write the JSON document. Defaults to the input path with a
    /// `.json` extension.
    output: Option<PathBuf>,

    /// Write the JSON on a single line instead of indenting it
    #[arg(long)]
    compact: bool,

    /// Print the scope tree to stdout after parsing
    #[arg(long)]
    print_scopes: bool,
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

fn run(args: &Cli) -> anyhow::Result<PathBuf> {
    let now = Instant::now();
    let document = parse_vcd_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    log::info!("parsed {} in {:.2?}", args.input.display(), now.elapsed());

    if args.print_scopes {
        print!("{}", document.header().scope_tree());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let json = to_json(&document);
    if args.compact {
        serde_json::to_writer(&mut writer, &json)?;
    } else {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        json.serialize(&mut ser)?;
    }
    writer.flush()?;

    Ok(output)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();

    match run(&args) {
        Ok(output) => {
            println!("Successfully wrote to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_json_extension() {
        assert_eq!(
            default_output_path(Path::new("waves/alu4.vcd")),
            PathBuf::from("waves/alu4.json")
        );
        assert_eq!(
            default_output_path(Path::new("dump")),
            PathBuf::from("dump.json")
        );
    }

    #[test]
    fn cli_arguments() {
        let args = Cli::try_parse_from(["vcd_json", "in.vcd", "--compact"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.vcd"));
        assert_eq!(args.output, None);
        assert!(args.compact);
        assert!(!args.print_scopes);

        assert!(Cli::try_parse_from(["vcd_json"]).is_err());
    }
}
