//! Command-line checker for waves files.
//!
//! Usage: `waves-lint <file> [--write <out>] [--compact]`
//!
//! Imports the file, prints every validation issue and every registry
//! reference that points nowhere, then lists registry usage. Exits non-zero
//! when the file cannot be imported or has blocking issues. With `--write`,
//! the normalized document is exported to `<out>`.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use waves_doc::select::{
    affix_ids, behavior_ids, collect_affix_usage, collect_behavior_usage, dangling_affix_refs,
    dangling_behavior_refs,
};
use waves_doc::{ExportOptions, ImportError, WavesDoc, export_string, export_value, has_blocking, import_value, validate};

const USAGE: &str = "usage: waves-lint <file> [--write <out>] [--compact]";

#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    write: Option<PathBuf>,
    compact: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut input = None;
    let mut write = None;
    let mut compact = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--write" => {
                let out = args.next().ok_or("--write needs an output path")?;
                write = Some(PathBuf::from(out));
            }
            "--compact" => compact = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }

    let input = input.ok_or("missing input file")?;
    Ok(Args { input, write, compact })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            eprintln!("{}: {e}", args.input.display());
            ExitCode::FAILURE
        }
    }
}

/// Lints one file. Returns `Ok(false)` when blocking issues were found.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&args.input)?;
    debug!(path = %args.input.display(), bytes = text.len(), "read input");

    let raw: Value = serde_json::from_str(&text).map_err(|e| ImportError::NotJson(e.to_string()))?;

    let doc = match import_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e @ ImportError::Malformed(_)) => {
            // Point at the offending fields when the shape check can.
            for issue in validate(&raw) {
                println!("{issue}");
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let issues = validate(&export_value(&doc)?);
    for issue in &issues {
        println!("{issue}");
    }
    for id in dangling_affix_refs(&doc) {
        println!("warning: affixesRef \"{id}\" has no registry entry");
    }
    for id in dangling_behavior_refs(&doc) {
        println!("warning: behaviorRef \"{id}\" has no registry entry");
    }
    print_usage(&doc);

    if has_blocking(&issues) {
        return Ok(false);
    }

    if let Some(out) = &args.write {
        let options = if args.compact { ExportOptions::compact() } else { ExportOptions::default() };
        let rendered = export_string(&doc, options)?;
        fs::write(out, rendered)?;
        info!(path = %out.display(), "wrote normalized document");
    }

    Ok(true)
}

fn print_usage(doc: &WavesDoc) {
    println!("{} wave(s), {} ship entr(ies)", doc.waves.len(), doc.ship_count());

    let affix_usage = collect_affix_usage(doc);
    for id in affix_ids(doc) {
        println!("  affix {id}: {}", affix_usage.get(id).copied().unwrap_or(0));
    }

    let behavior_usage = collect_behavior_usage(doc);
    for id in behavior_ids(doc) {
        println!("  behavior {id}: {}", behavior_usage.get(id).copied().unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse(&["waves.json", "--write", "out.json", "--compact"]),
            Ok(Args { input: "waves.json".into(), write: Some("out.json".into()), compact: true })
        );
        assert_eq!(
            parse(&["waves.json"]),
            Ok(Args { input: "waves.json".into(), write: None, compact: false })
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
        assert!(parse(&["a.json", "--write"]).is_err());
        assert!(parse(&["a.json", "--pretty"]).is_err());
    }
}
