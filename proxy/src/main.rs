use anyhow::Context;
use bridge::handlers::BridgeState;
use bridge::routes::routes;
use clap::Parser;
use generator::fleet::FleetConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use trackcore::SnapshotStore;
use workflow::config::ProxyConfig;
use workflow::refresher::run_refresh_loop;
use workflow::source::FeedSource;
use workflow::transcript::resolve_transcript;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Caching proxy for the live flight tracker")]
struct Args {
    /// Load the proxy config from YAML; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    bind: Option<String>,
    #[arg(long, env = "PORT")]
    port: Option<u16>,
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lon: Option<f64>,
    /// Search radius around the origin in kilometers
    #[arg(long)]
    radius: Option<f64>,
    #[arg(long)]
    refresh_ms: Option<u64>,
    /// Serve a synthetic fleet instead of polling upstream
    #[arg(long, default_value_t = false)]
    mock: bool,
    #[arg(long)]
    mock_count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// JSON transcript served at /api/transcript
    #[arg(long)]
    transcript: Option<PathBuf>,
    /// Audio file backing /api/transcribe
    #[arg(long)]
    audio: Option<PathBuf>,
}

fn resolve_config(args: Args) -> anyhow::Result<ProxyConfig> {
    let mut config = match &args.config {
        Some(path) => ProxyConfig::load(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(lat) = args.lat {
        config.latitude = lat;
    }
    if let Some(lon) = args.lon {
        config.longitude = lon;
    }
    if let Some(radius) = args.radius {
        config.radius_km = radius;
    }
    if let Some(refresh_ms) = args.refresh_ms {
        config.refresh_interval_ms = refresh_ms;
    }
    if args.mock || args.mock_count.is_some() || args.seed.is_some() {
        let fleet = config.mock.get_or_insert_with(FleetConfig::default);
        if let Some(count) = args.mock_count {
            fleet.count = count;
        }
        if let Some(seed) = args.seed {
            fleet.seed = seed;
        }
    }
    if args.transcript.is_some() {
        config.transcript_path = args.transcript;
    }
    if args.audio.is_some() {
        config.audio_path = args.audio;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = resolve_config(Args::parse())?;

    let addr = config.socket_addr()?;
    let transcript = resolve_transcript(config.transcript_path.as_deref())?;
    let source = Arc::new(FeedSource::from_config(&config)?);
    let store = Arc::new(SnapshotStore::new());
    let interval = config.refresh_interval();

    log::info!(
        "serving {} on http://{} (refresh every {:?})",
        source.describe(),
        addr,
        interval
    );

    let state = BridgeState {
        store: store.clone(),
        source: source.clone(),
        config: Arc::new(config),
        transcript: Arc::new(transcript),
    };

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating proxy runtime")?;

    runtime.block_on(async move {
        let refresher = tokio::spawn(run_refresh_loop(store, source, interval));
        let (_, server) = warp::serve(routes(state))
            .try_bind_with_graceful_shutdown(addr, async {
                if let Err(err) = signal::ctrl_c().await {
                    log::error!("failed to listen for Ctrl+C: {}", err);
                }
            })
            .with_context(|| format!("binding {}", addr))?;
        server.await;
        refresher.abort();
        log::info!("proxy stopped");
        Ok::<(), anyhow::Error>(())
    })
}
