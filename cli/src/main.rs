use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::{ArgAction, Parser};
use jsonhash::constants::DEFAULT_MAX_DEPTH;
use jsonhash::{Indent, ParseOptions, RenderOptions, Value};
use tracing::debug;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonhash", version, about = "Parse and re-render JSON documents")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Indentation size; 0 renders on a single line.
    #[arg(long, value_name = "number", default_value_t = 0)]
    indent: usize,

    /// Decode backslash escapes in strings instead of keeping them verbatim.
    #[arg(long)]
    decode_escapes: bool,

    /// Maximum nesting depth of arrays and objects.
    #[arg(long, value_name = "number", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Show document statistics.
    #[arg(long)]
    stats: bool,

    /// Log parser activity to stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Stats {
    objects: usize,
    entries: usize,
    arrays: usize,
    items: usize,
    depth: usize,
}

impl Stats {
    fn collect(value: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(value, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.depth = self.depth.max(depth);
        match value {
            Value::Object(table) => {
                self.objects += 1;
                self.entries += table.len();
                for child in table.values() {
                    self.visit(child, depth + 1);
                }
            }
            Value::Array(items) => {
                self.arrays += 1;
                self.items += items.len();
                for child in items {
                    self.visit(child, depth + 1);
                }
            }
            _ => {}
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ParseOptions::new()
        .with_max_depth(args.max_depth)
        .with_decode_escapes(args.decode_escapes);
    let value = read_input(args.input.as_deref(), &options)?;
    let render = RenderOptions::new()
        .with_indent(Indent::spaces(args.indent))
        .with_escape_backslashes(args.decode_escapes);

    match args.output.as_deref() {
        Some(path) if path != "-" => {
            let mut file = BufWriter::new(File::create(path)?);
            jsonhash::to_writer_with_options(&mut file, &value, &render)?;
            let label = args.input.as_deref().unwrap_or("stdin");
            println!("✔ Parsed {label} → {path}");
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            jsonhash::to_writer_with_options(&mut handle, &value, &render)?;
            if args.stats {
                writeln!(handle)?;
            }
        }
    }

    if args.stats {
        print_stats(&Stats::collect(&value));
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn read_input(input: Option<&str>, options: &ParseOptions) -> Result<Value, Box<dyn Error>> {
    let value = match input {
        None | Some("-") => {
            debug!("reading stdin");
            jsonhash::from_reader_with_options(io::stdin().lock(), options)?
        }
        Some(path) => {
            debug!(path, "reading file");
            jsonhash::from_reader_with_options(File::open(path)?, options)?
        }
    };
    Ok(value)
}

fn print_stats(stats: &Stats) {
    println!();
    println!(
        "ℹ Objects: {} ({} entries), arrays: {} ({} items)",
        stats.objects, stats.entries, stats.arrays, stats.items
    );
    println!("ℹ Max depth: {}", stats.depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_count_nested_containers() {
        let value = jsonhash::parse(r#"{"a": [1, {"b": []}], "c": {}}"#).unwrap();
        assert_eq!(
            Stats::collect(&value),
            Stats {
                objects: 3,
                entries: 3,
                arrays: 2,
                items: 2,
                depth: 3,
            }
        );
    }

    #[test]
    fn stats_for_scalar_document() {
        assert_eq!(Stats::collect(&Value::NULL), Stats::default());
    }
}
