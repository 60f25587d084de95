mod fetch;
mod logging;
mod scanner;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use name_pair_types::{
    DEFAULT_PROXY, ExportFormat, FetchFailure, Match, PairList, count_by_pass, extract_tagged,
    html_to_text,
};
use tracing::{debug, error, info, warn};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "name_pair_extract",
    about = "Extract Han / translated-name pairs from web novel pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a page through the CORS proxy and extract name pairs
    Fetch {
        /// Page URL, e.g. "https://truyenfull.vn/..."
        url: String,
        #[command(flatten)]
        proxy: ProxyArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Extract name pairs from a local file, a directory of pages, or stdin
    Extract {
        /// File or directory; "-" reads stdin
        #[arg(default_value = "-")]
        path: PathBuf,
        /// Strip HTML markup from .txt files and stdin too
        #[arg(long)]
        html: bool,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Replace the translated name at INDEX in a JSON export, in place
    Edit {
        /// JSON file written by `--format json`
        file: PathBuf,
        /// Zero-based position in the list
        index: usize,
        /// New translated name
        name: String,
        /// Format printed after the edit
        #[arg(long, short, default_value = "json", value_parser = parse_format)]
        format: ExportFormat,
    },
}

#[derive(Args)]
struct ProxyArgs {
    /// Proxy prefix; the percent-encoded page URL is appended to it
    #[arg(long, env = "NAME_PAIRS_PROXY", default_value = DEFAULT_PROXY)]
    proxy: String,
    /// Give up on the proxy after this many seconds
    #[arg(long, env = "NAME_PAIRS_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Args)]
struct ExportArgs {
    /// Output format: txt, csv or json
    #[arg(long, short, default_value = "txt", value_parser = parse_format)]
    format: ExportFormat,
    /// Also write output/ten-nhan-vat.<ext>
    #[arg(long)]
    save: bool,
    /// Drop repeated (han, name) pairs, keeping the first one
    #[arg(long)]
    dedup: bool,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_extension(s).ok_or_else(|| format!("unknown format {s:?} (txt, csv, json)"))
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { url, proxy, export } => run_fetch(&url, &proxy, &export),
        Command::Extract { path, html, export } => run_extract(&path, html, &export),
        Command::Edit {
            file,
            index,
            name,
            format,
        } => run_edit(&file, index, &name, format),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Print the export to stdout and, with `save`, write it under `output/`.
fn write_export(pairs: &PairList, format: ExportFormat, save: bool) -> Result<()> {
    let rendered = format.render(pairs).context("cannot render export")?;
    if save {
        fs::create_dir_all(OUTPUT_DIR).with_context(|| format!("cannot create {OUTPUT_DIR}/"))?;
        let path = Path::new(OUTPUT_DIR).join(format.file_name());
        fs::write(&path, &rendered).with_context(|| format!("cannot write {}", path.display()))?;
        info!(path = %path.display(), bytes = rendered.len(), "saved export");
    }
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Log per-pass hit counts, then export.
fn emit(matches: Vec<Match>, export: &ExportArgs) -> Result<()> {
    for (pass, count) in count_by_pass(&matches) {
        info!(pass = pass.as_str(), count, "pass matches");
    }

    let mut pairs: PairList = matches.into_iter().map(|m| m.pair).collect();
    if pairs.is_empty() {
        warn!("no name pairs found");
    } else {
        info!(total = pairs.len(), "extraction finished");
    }

    if export.dedup {
        let before = pairs.len();
        pairs = pairs.deduplicated();
        info!(removed = before - pairs.len(), "dropped duplicate pairs");
    }

    write_export(&pairs, export.format, export.save)
}

/// Wrap a fetch failure so the fixed user message comes first.
fn fetch_error(failure: FetchFailure) -> anyhow::Error {
    error!(kind = failure.kind(), %failure, "fetch failed");
    let message = failure.user_message();
    anyhow::Error::new(failure).context(message)
}

// ═══════════════════════════════════════════════════════════════════════
//  FETCH MODE: proxy → page text → pairs
// ═══════════════════════════════════════════════════════════════════════

fn run_fetch(url: &str, proxy: &ProxyArgs, export: &ExportArgs) -> Result<()> {
    let fetcher = fetch::ProxyFetcher::new(
        proxy.proxy.clone(),
        Duration::from_secs(proxy.timeout_secs),
    )
    .map_err(fetch_error)?;

    // One request per run; a current-thread runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    info!(url, proxy = %proxy.proxy, "fetching page");
    let text = runtime
        .block_on(fetcher.fetch_text(url))
        .map_err(fetch_error)?;
    debug!(chars = text.chars().count(), "page text ready");

    emit(extract_tagged(&text), export)
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: local pages or stdin → pairs
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(path: &Path, force_html: bool, export: &ExportArgs) -> Result<()> {
    let mut matches = Vec::new();

    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("cannot read stdin")?;
        let text = if force_html {
            html_to_text(&input)
        } else {
            input
        };
        matches.extend(extract_tagged(&text));
        return emit(matches, export);
    }

    if !path.exists() {
        bail!("{} does not exist", path.display());
    }

    let sources = scanner::scan_sources(path);
    info!(count = sources.len(), root = %path.display(), "found input pages");

    // Each page is extracted on its own; results keep file order.
    for src in &sources {
        let text = src
            .read_text(force_html)
            .with_context(|| format!("cannot read {}", src.path.display()))?;
        let found = extract_tagged(&text);
        debug!(file = %src.path.display(), pairs = found.len(), "extracted");
        matches.extend(found);
    }

    emit(matches, export)
}

// ═══════════════════════════════════════════════════════════════════════
//  EDIT MODE: rename one entry of a JSON export
// ═══════════════════════════════════════════════════════════════════════

fn run_edit(file: &Path, index: usize, name: &str, format: ExportFormat) -> Result<()> {
    let json =
        fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))?;
    let mut pairs = PairList::from_json(&json)
        .with_context(|| format!("{} is not a name-pair export", file.display()))?;

    pairs.set_name(index, name)?;

    let updated = name_pair_types::to_json(&pairs)?;
    fs::write(file, &updated).with_context(|| format!("cannot write {}", file.display()))?;
    info!(index, file = %file.display(), "name updated");

    write_export(&pairs, format, false)
}
