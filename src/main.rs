use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod compose;
mod graph;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "compose-graph")]
#[command(about = "Render docker-compose files as a Graphviz dot graph", long_about = None)]
struct Cli {
    /// Compose files; each one becomes a cluster in the graph.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Also draw bind and tmpfs mounts.
    #[arg(long)]
    host_mounts: bool,

    /// Log level for diagnostics on stderr (RUST_LOG takes precedence).
    #[arg(long, env = "COMPOSE_GRAPH_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let classifier = graph::Classifier::new()?;

    let mut groups = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let doc = compose::parse_file(path)
            .with_context(|| format!("could not parse '{}'", path.display()))?;

        // Cluster label is the file name; fall back to the path as given.
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        info!(file = %path.display(), services = doc.services.len(), "loaded compose file");
        groups.push(graph::NodeGroup::new(label, &doc, &classifier));
    }

    let opts = render::RenderOptions {
        host_mounts: cli.host_mounts,
    };
    let dot = render::render_dot(&groups, &opts)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(dot.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
