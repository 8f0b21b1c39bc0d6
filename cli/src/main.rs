use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ward_client::{
    fetch_recent_patients, PatientFetcher, ReqwestTransport, RosterController, TokioTimer,
};
use ward_core::config::ENV_BASE_URL;
use ward_core::{
    Endpoints, PatientView, QueryState, RosterBody, SortField, SortOrder, ViewState, WardConfig,
};

#[derive(Parser, Debug)]
#[command(name = "ward", about = "Query the ward patient backend from the terminal.")]
struct Args {
    /// Backend origin, e.g. http://localhost:8000.
    #[arg(long, env = ENV_BASE_URL)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search one patient by name or episode id and print the detail page.
    Patient {
        query: String,
        /// Print escaped HTML instead of plain text.
        #[arg(long, conflicts_with = "json")]
        html: bool,
        #[arg(long)]
        json: bool,
    },
    /// List one page of the patient roster.
    Roster {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, value_parser = parse_sort_field, default_value = "admission_date")]
        sort_by: SortField,
        #[arg(long, value_parser = parse_sort_order, default_value = "desc")]
        sort_order: SortOrder,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List the most recently admitted patients.
    Recent,
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    SortField::parse(raw).ok_or_else(|| format!("unknown sort field `{raw}`"))
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    SortOrder::parse(raw).ok_or_else(|| format!("unknown sort order `{raw}`"))
}

const DEFAULT_LOG_FILTER: &str = "ward=info,ward_client=info";

/// `RUST_LOG` when set and non-blank, otherwise info for this binary and the client.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut config = WardConfig::from_env().context("invalid WARD_* environment")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if config.base_url.is_empty() {
        bail!("no backend configured; pass --base-url or set {ENV_BASE_URL}");
    }
    info!(base_url = %config.base_url, "using backend");

    let transport = ReqwestTransport::default();
    let endpoints = Endpoints::new(&config.base_url);

    match args.command {
        Command::Patient { query, html, json } => {
            let fetcher = PatientFetcher::new(transport, endpoints.clone());
            let record = match fetcher.fetch_patient(&query).await {
                ViewState::Loaded(record) => record,
                ViewState::Error(message) => bail!(message),
                ViewState::Loading => bail!("request was superseded"),
            };
            let view = PatientView::from_record(&record, &endpoints);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if html {
                println!("{}", view.to_html());
            } else {
                println!("{}", view.to_text());
            }
        }
        Command::Roster {
            page,
            sort_by,
            sort_order,
            search,
        } => {
            let controller = RosterController::new(transport, TokioTimer, &config);
            let state = QueryState::new(config.page_limit)
                .with_sort_by(sort_by)
                .with_sort_order(sort_order)
                .with_search(&search)
                .with_page(page);
            let view = controller.issue_query(state).await;
            match view.body {
                RosterBody::Rows(rows) => {
                    for row in rows {
                        println!(
                            "{}\t{}\t{}\t{}\t{}\t{}",
                            row.id, row.name, row.room, row.bed, row.admission_date, row.last_diary
                        );
                    }
                }
                RosterBody::Empty => println!("{}", ward_core::roster::NO_MATCHES),
                RosterBody::Error(message) => bail!(message),
                RosterBody::Loading => bail!("request was superseded"),
            }
            eprintln!("{}", view.pager.label());
        }
        Command::Recent => {
            let rows = fetch_recent_patients(&transport, &endpoints)
                .await
                .context("could not load recent patients")?;
            for row in rows {
                println!("{}\t{}\t{}\t{}", row.id, row.name, row.room, row.bed);
            }
        }
    }

    Ok(())
}
