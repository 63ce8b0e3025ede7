use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use tracing::{debug, info, Level};

use keytree::{Ordered, Sorted, Storage};
use keytree_utils::{
    dump,
    json::{self, JsonTree},
};
use smol_str::SmolStr;

pub type Result<T> = anyhow::Result<T>;

#[derive(StructOpt)]
#[structopt(about = "CLI to inspect and edit JSON documents as flat key trees")]
struct Opts {
    #[structopt(short, parse(from_occurrences = set_log_level), global = true)]
    #[allow(dead_code)] // log level is set in [`set_log_level`]
    /// Increase verbosity
    verbosity: u64,
    #[structopt(long, global = true)]
    /// Enumerate paths in sorted order instead of document order
    sorted: bool,
    #[structopt(subcommand)]
    cmd: Command,
}

fn set_log_level(verbosity: u64) -> u64 {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    verbosity
}

#[derive(StructOpt)]
enum Command {
    /// List every path of the document, one per line
    Keys {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
    },
    /// List every path of the document together with its value, tab separated
    Flat {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
    },
    /// Print the value or subtree at a path
    Get {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
        /// Path segments
        path: Vec<String>,
    },
    /// Write a value at a path and print the resulting document.
    /// Values that are not valid JSON are stored as strings.
    Set {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
        /// The value to write
        value: String,
        /// Path segments
        path: Vec<String>,
    },
    /// Delete the value or subtree at a path and print the resulting document
    Delete {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
        /// Path segments
        path: Vec<String>,
    },
    /// Render the document as dot. Can be piped directly:
    /// `keytree-cli graph doc.json | dot -Tpng > output.png`.
    /// Nodes are depicted as rectangles, leaves as ellipses.
    Graph {
        #[structopt(parse(from_os_str))]
        /// JSON document, `-` for stdin
        input: PathBuf,
    },
}

fn load<S: Storage<SmolStr>>(input: &Path) -> Result<JsonTree<S>> {
    let tree = if input.as_os_str() == "-" {
        json::from_reader(std::io::stdin().lock())?
    } else {
        json::from_reader(BufReader::new(File::open(input)?))?
    };
    info!(paths = tree.len(), "loaded {}", input.display());
    Ok(tree)
}

fn run<S: Storage<SmolStr>>(cmd: Command) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cmd {
        Command::Keys { input } => {
            let tree = load::<S>(&input)?;
            for path in tree.keys() {
                writeln!(out, "{}", path)?;
            }
        }
        Command::Flat { input } => {
            let tree = load::<S>(&input)?;
            dump::write_flat(&tree, &mut out)?;
        }
        Command::Get { input, path } => {
            let tree = load::<S>(&input)?;
            let slot = tree.get(json::path(&path))?;
            writeln!(out, "{}", serde_json::to_string_pretty(slot)?)?;
        }
        Command::Set { input, value, path } => {
            let mut tree = load::<S>(&input)?;
            let previous = tree.insert_nested(json::path(&path), json::parse_value(&value))?;
            debug!(replaced = previous.is_some(), "set {:?}", path);
            writeln!(out, "{}", json::to_string_pretty(&tree)?)?;
        }
        Command::Delete { input, path } => {
            let mut tree = load::<S>(&input)?;
            tree.remove(json::path(&path))?;
            writeln!(out, "{}", json::to_string_pretty(&tree)?)?;
        }
        Command::Graph { input } => {
            let tree = load::<S>(&input)?;
            dump::graph(&tree, &mut out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::from_args();
    if opts.sorted {
        run::<Sorted>(opts.cmd)
    } else {
        run::<Ordered>(opts.cmd)
    }
}
