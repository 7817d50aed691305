use anyhow::Context;
use bolt_tables::{bolt, config::DriverConfig, tabular};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// bolt-tables - flatten Bolt graph results into node and edge tables
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a graph dump (JSON or YAML) into node and edge tables
    Convert {
        /// Graph dump to read
        #[arg(long, short)]
        input: PathBuf,

        /// Where to write the nodes table (stdout when omitted)
        #[arg(long)]
        nodes_out: Option<PathBuf>,

        /// Where to write the edges table (stdout when omitted)
        #[arg(long)]
        edges_out: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Use the underscore-prefixed identifier column names
        #[arg(long)]
        legacy_columns: bool,
    },

    /// Build a Bolt driver from configuration to check that it resolves
    Connect {
        /// YAML driver config; BOLT_* environment variables when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Convert {
            input,
            nodes_out,
            edges_out,
            format,
            legacy_columns,
        } => convert(&input, nodes_out.as_deref(), edges_out.as_deref(), format, legacy_columns),
        Command::Connect { config } => connect(config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn convert(
    input: &Path,
    nodes_out: Option<&Path>,
    edges_out: Option<&Path>,
    format: OutputFormat,
    legacy_columns: bool,
) -> anyhow::Result<()> {
    let graph = bolt::Graph::from_path(input)
        .with_context(|| format!("Failed to load graph dump {}", input.display()))?;

    let columns = if legacy_columns {
        tabular::IdColumns::legacy()
    } else {
        tabular::IdColumns::default()
    };
    // `Graph` accessors cannot fail
    let nodes = match tabular::nodes_to_table_with(&graph, &columns) {
        Ok(table) => table,
        Err(never) => match never {},
    };
    let edges = match tabular::edges_to_table_with(&graph, &columns) {
        Ok(table) => table,
        Err(never) => match never {},
    };

    write_table(&nodes, nodes_out, format).context("Failed to write nodes table")?;
    if nodes_out.is_none() && edges_out.is_none() {
        println!();
    }
    write_table(&edges, edges_out, format).context("Failed to write edges table")?;

    log::info!(
        "Wrote {} nodes and {} edges from {}",
        nodes.len(),
        edges.len(),
        input.display()
    );
    Ok(())
}

fn write_table(
    table: &tabular::Table,
    path: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Csv => table.write_csv(writer)?,
        OutputFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &table.to_json_records()?)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

async fn connect(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => DriverConfig::from_yaml_file(path)?,
        None => DriverConfig::from_env()?,
    };
    let uri = config.uri.clone();

    match bolt::resolve_default_driver(Some(config.into())).await {
        Ok(Some(_driver)) => {
            println!("Bolt driver ready for {}", uri);
            Ok(())
        }
        Ok(None) => anyhow::bail!("No driver was requested"),
        Err(e) => Err(e.into()),
    }
}
