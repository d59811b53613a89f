//! Custom Graphs Main Entry Point
//!
//! Lists the custom graphs a user may see, renders a graph through the
//! configured rendering backend, or prints the standard periods.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use custom_graphs::i18n::Untranslated;
use custom_graphs::{
    list_standard_periods, CustomGraphsError, Dependencies, RenderRequest, VisibleGraphsQuery,
};
use custom_graphs_repository::RequiredPrivileges;
use custom_graphs_shared::{GraphId, UserId};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "custom-graphs", about = "List and render permission-filtered custom graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the graphs a user may see as JSON
    List {
        /// User to list graphs for
        #[arg(long, short = 'u')]
        user: String,

        /// Only print graph names
        #[arg(long)]
        names_only: bool,

        /// Leave out graphs of the "All" group
        #[arg(long)]
        no_all_group: bool,

        /// Required privileges, e.g. "IR" or "AR,IR"
        #[arg(long, default_value = "IR")]
        privileges: RequiredPrivileges,
    },
    /// Render a graph to stdout or a file
    Render {
        /// Graph to render
        #[arg(long, short = 'g')]
        graph: GraphId,

        /// Use the dimensions, period and stacking stored with the graph
        #[arg(long, conflicts_with_all = ["height", "width", "period", "stacked"])]
        stored: bool,

        #[arg(long, default_value_t = 210)]
        height: u32,

        #[arg(long, default_value_t = 550)]
        width: u32,

        /// Lookback window in seconds
        #[arg(long, default_value_t = 86_400)]
        period: i64,

        #[arg(long)]
        stacked: bool,

        /// End of the window (RFC 3339); defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the standard lookback periods as JSON
    Periods,
}

/// Initialize tracing/logging on stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("custom_graphs=info,custom_graphs_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CustomGraphsError> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

async fn run(command: Command) -> Result<(), CustomGraphsError> {
    match command {
        Command::Periods => print_json(&list_standard_periods(&Untranslated)),
        Command::List {
            user,
            names_only,
            no_all_group,
            privileges,
        } => {
            let deps = Dependencies::from_env().await?;
            let query = VisibleGraphsQuery::new(UserId::from(user))
                .names_only(names_only)
                .include_all_group(!no_all_group)
                .privileges(privileges);

            let visible = deps.filter.list_visible_graphs(&query).await?;
            info!(user_id = %query.user_id, visible = visible.len(), "Listed visible graphs");
            print_json(&visible)
        }
        Command::Render {
            graph,
            stored,
            height,
            width,
            period,
            stacked,
            date,
            output,
        } => {
            let deps = Dependencies::from_env().await?;
            let mut out: Box<dyn Write + Send> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout()),
            };

            if stored {
                let rendered = deps.renderer.render_stored(graph, date).await?;
                out.write_all(rendered.as_bytes())?;
                out.flush()?;
            } else {
                let request = RenderRequest {
                    graph_id: graph,
                    height,
                    width,
                    period_seconds: period,
                    stacked,
                    start_date: date,
                };
                deps.renderer.print_graph(&request, &mut out).await?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CustomGraphsError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match run(cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "custom-graphs failed");
            Err(e)
        }
    }
}
