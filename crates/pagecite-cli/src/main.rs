//! pagecite CLI: Page position citations for document search results

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagecite_core::{
    CONFIG_FILE, Citation, Config, HighlightDetails, RawGeometry, RelativeRect, SearchRequest,
    SearchResponse, classify_position, export, format_results, page, prompt,
};

#[derive(Parser)]
#[command(name = "pagecite")]
#[command(about = "Page position citations for document search results", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a bounding box into a position label
    Classify {
        #[arg(allow_negative_numbers = true)]
        x0: String,
        #[arg(allow_negative_numbers = true)]
        y0: String,
        #[arg(allow_negative_numbers = true)]
        x1: String,
        #[arg(allow_negative_numbers = true)]
        y1: String,

        /// Page width (defaults to US Letter)
        #[arg(long, allow_negative_numbers = true)]
        width: Option<String>,

        /// Page height (defaults to US Letter)
        #[arg(long, allow_negative_numbers = true)]
        height: Option<String>,

        /// Also print the highlight rectangle as percentages
        #[arg(long)]
        overlay: bool,
    },

    /// Print the request body for a hosted search call
    Request {
        /// Search query
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Restrict to a single document
        #[arg(long)]
        doc: Option<String>,
    },

    /// Show citations for a saved search response
    Results {
        /// Search response JSON file
        file: PathBuf,

        /// Query that produced the response (for the header)
        #[arg(long)]
        query: Option<String>,

        /// Maximum number of results to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Export citations from a saved search response to CSV
    Export {
        /// Search response JSON file
        file: PathBuf,

        /// Query that produced the response
        #[arg(long)]
        query: String,

        /// Output path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print the completion request for answer synthesis
    Prompt {
        /// Search response JSON file
        file: PathBuf,

        /// Question to answer
        #[arg(long)]
        question: String,

        /// Completion model (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// List a page's chunks in reading order
    Page {
        /// Search response JSON file
        file: PathBuf,

        /// Document name
        #[arg(long)]
        doc: String,

        /// Page number
        #[arg(long)]
        page: i64,
    },

    /// Summarize the documents in a saved search response
    Docs {
        /// Search response JSON file
        file: PathBuf,
    },

    /// Print highlight details for one chunk
    Highlight {
        /// Search response JSON file
        file: PathBuf,

        /// Chunk ID to highlight
        #[arg(long)]
        chunk: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Classify {
            x0,
            y0,
            x1,
            y1,
            width,
            height,
            overlay,
        } => cmd_classify([x0, y0, x1, y1], width, height, overlay)?,
        Commands::Request { query, limit, doc } => {
            let query = query.join(" ");
            cmd_request(&config, &query, limit, doc)?;
        }
        Commands::Results { file, query, limit } => {
            cmd_results(&config, &file, query.as_deref(), limit)?
        }
        Commands::Export {
            file,
            query,
            output,
        } => cmd_export(&file, &query, output)?,
        Commands::Prompt {
            file,
            question,
            model,
        } => cmd_prompt(&config, &file, &question, model)?,
        Commands::Page { file, doc, page } => cmd_page(&file, &doc, page)?,
        Commands::Docs { file } => cmd_docs(&file)?,
        Commands::Highlight { file, chunk } => cmd_highlight(&file, &chunk)?,
    }

    Ok(())
}

fn load_response(file: &Path) -> Result<SearchResponse> {
    let body = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    SearchResponse::from_json(&body)
        .with_context(|| format!("Failed to parse search response in {}", file.display()))
}

fn load_citations(file: &Path) -> Result<Vec<Citation>> {
    Ok(format_results(&load_response(file)?.results))
}

fn cmd_classify(
    coords: [String; 4],
    width: Option<String>,
    height: Option<String>,
    overlay: bool,
) -> Result<()> {
    let [x0, y0, x1, y1] = coords;
    let label = classify_position(
        x0.as_str(),
        y0.as_str(),
        x1.as_str(),
        y1.as_str(),
        width.as_deref(),
        height.as_deref(),
    );
    println!("{}", label);

    if overlay {
        let raw = RawGeometry {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
            page_width: width.into(),
            page_height: height.into(),
        };
        let (bbox, dims) = raw
            .resolve()
            .context("Cannot compute overlay for non-numeric input")?;
        let rect = RelativeRect::from_geometry(&bbox, &dims).formatted();
        println!("{}", serde_json::to_string_pretty(&rect)?);
    }

    Ok(())
}

fn cmd_request(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    doc: Option<String>,
) -> Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Query must not be empty");
    }

    let mut request =
        SearchRequest::new(query, limit.unwrap_or(config.default_search_results), config);
    if let Some(doc) = doc {
        request = request.with_doc_filter(doc);
    }

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn cmd_results(
    config: &Config,
    file: &Path,
    query: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let mut citations = load_citations(file)?;
    if let Some(limit) = limit {
        citations.truncate(limit);
    }

    if citations.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    if let Some(query) = query {
        println!("Results for: {}\n", query);
    }

    for (i, citation) in citations.iter().enumerate() {
        print_card(i + 1, citation, config.card_excerpt_chars);
    }

    Ok(())
}

/// Print a result card: header, location, excerpt and bounding box.
fn print_card(index: usize, citation: &Citation, excerpt_chars: usize) {
    println!(
        "\x1b[1;36m[{}]\x1b[0m \x1b[1m{}\x1b[0m  {}",
        index,
        citation.doc_name,
        citation.location(),
    );
    for line in citation.excerpt(excerpt_chars).lines() {
        println!("  │ {}", line);
    }
    println!(
        "  \x1b[2mchunk {}  bbox {}\x1b[0m",
        citation.chunk_id,
        citation.bbox_display()
    );
    println!();
}

fn cmd_export(file: &Path, query: &str, output: Option<PathBuf>) -> Result<()> {
    let citations = load_citations(file)?;
    let output = output.unwrap_or_else(|| PathBuf::from(export::export_file_name(query)));

    if output.as_os_str() == "-" {
        let stdout = std::io::stdout();
        export::write_csv(stdout.lock(), query, &citations)?;
    } else {
        let out = std::fs::File::create(&output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        export::write_csv(out, query, &citations)?;
        eprintln!("✓ Exported {} results to {}", citations.len(), output.display());
    }

    Ok(())
}

fn cmd_prompt(config: &Config, file: &Path, question: &str, model: Option<String>) -> Result<()> {
    let citations = load_citations(file)?;
    if citations.is_empty() {
        anyhow::bail!("No usable results in {}", file.display());
    }

    let built = prompt::build_synthesis_prompt(question, &citations, config.citation_excerpt_chars);
    let request =
        prompt::CompletionRequest::new(model.unwrap_or_else(|| config.llm_model.clone()), &built);

    let output = serde_json::json!({
        "request": request,
        "citations": built.citations,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_page(file: &Path, doc: &str, page_num: i64) -> Result<()> {
    let response = load_response(file)?;
    let chunks = page::page_content(&response.results, doc, page_num);

    if chunks.is_empty() {
        println!("No chunks found for {} page {}.", doc, page_num);
        return Ok(());
    }

    println!("{} - Page {}\n", doc, page_num);

    let mut stdout = std::io::stdout().lock();
    for chunk in &chunks {
        writeln!(
            stdout,
            "\x1b[33m{:>13}\x1b[0m  {}",
            chunk.position.as_str(),
            pagecite_core::citation::truncate_chars(&chunk.text, 50)
        )?;
    }

    Ok(())
}

fn cmd_docs(file: &Path) -> Result<()> {
    let response = load_response(file)?;
    let docs = page::summarize_documents(&response.results);

    if docs.is_empty() {
        println!("No documents found.");
        return Ok(());
    }

    println!("{:<40} {:>6} {:>7}", "Document", "Pages", "Chunks");
    for doc in &docs {
        println!(
            "{:<40} {:>6} {:>7}",
            doc.doc_name, doc.total_pages, doc.total_chunks
        );
    }

    Ok(())
}

fn cmd_highlight(file: &Path, chunk_id: &str) -> Result<()> {
    let response = load_response(file)?;
    let hit = response
        .results
        .iter()
        .find(|hit| hit.chunk_id_string() == chunk_id)
        .with_context(|| format!("No chunk with ID {}", chunk_id))?;

    let details = HighlightDetails::from_hit(hit)?;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}
