use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use zxml::{Config, Document, EndTagMode, Node};

#[derive(Debug, Parser)]
#[command(
    name = "zxml",
    version,
    about = "Parse a markup document and query its element tree"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Select the node at a '/'-separated tag path, e.g. library/book/title
    #[arg(short, long, conflicts_with = "tag")]
    path: Option<String>,
    /// Select the first element with this tag, searching depth-first
    #[arg(short, long)]
    tag: Option<String>,
    /// Match tags by substring instead of exact name
    #[arg(long)]
    contains: bool,
    /// Print this attribute of the selected node
    #[arg(short, long)]
    attr: Option<String>,
    /// Print the selected subtree as JSON
    #[arg(long, conflicts_with = "attr")]
    json: bool,
    /// Reject end tags that do not match the open element
    #[arg(long)]
    strict: bool,
    /// Accept input that ends with elements still open
    #[arg(long)]
    allow_unclosed: bool,
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, value_name = "N")]
    max_depth: Option<u16>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default().with_allow_unclosed(self.allow_unclosed);
        if self.strict {
            config = config.with_end_tags(EndTagMode::Strict);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        config
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let doc = read_document(&args)?;
    let node = select(&doc, &args)?;

    let mut rendered = if let Some(key) = &args.attr {
        match node.attr(key) {
            Some(value) => value.to_string(),
            None => bail!("<{}> has no attribute {key:?}", node.tag()),
        }
    } else if args.json {
        serde_json::to_string_pretty(&node).context("failed to serialize node")?
    } else if let Some(text) = node.text() {
        text.to_string()
    } else {
        outline(node)
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    write_output(&args.output, rendered.as_bytes())
}

fn read_document(args: &Args) -> Result<Document> {
    let config = args.config();
    match &args.input {
        Some(path) => zxml::parse_file_with_config(path, config)
            .with_context(|| format!("failed to parse {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            zxml::parse_text_with_config(&buffer, config).context("failed to parse stdin")
        }
    }
}

fn select<'a>(doc: &'a Document, args: &Args) -> Result<Node<'a>> {
    let exact = !args.contains;
    if let Some(path) = &args.path {
        debug!(path = %path, exact, "selecting by path");
        return doc
            .find_by_path(path, exact)
            .with_context(|| format!("no element at path {path:?}"));
    }
    if let Some(tag) = &args.tag {
        debug!(tag = %tag, exact, "selecting by tag");
        return doc
            .find_tag(tag, exact)
            .with_context(|| format!("no element matching tag {tag:?}"));
    }
    Ok(doc.root())
}

/// Indented outline of a subtree, one element per line
fn outline(node: Node<'_>) -> String {
    let mut out = String::new();
    let mut stack = vec![(node, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let _ = write!(out, "{:indent$}{}", "", node.tag(), indent = depth * 2);
        for attr in node.attributes() {
            let _ = write!(out, " {}={:?}", attr.key(), attr.value());
        }
        if let Some(text) = node.text() {
            let _ = write!(out, ": {text}");
        }
        out.push('\n');
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    out
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
