//! stratusd — the Stratus emulation daemon.
//!
//! Single binary that assembles the emulated provider services behind one
//! listener:
//! - Container-service backend (clusters and services)
//! - Application auto scaling control plane
//! - Target-dispatch HTTP API
//!
//! # Usage
//!
//! ```text
//! stratusd serve --port 4566 --region us-east-1 --seed-cluster default
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "stratusd", about = "Stratus emulation daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the emulated services behind one HTTP listener.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "4566")]
        port: u16,

        /// Region the emulated scope belongs to.
        #[arg(long, default_value = "us-east-1")]
        region: String,

        /// Cluster names to seed into the container service at startup.
        #[arg(long = "seed-cluster")]
        seed_clusters: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stratusd=debug,stratus=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            region,
            seed_clusters,
        } => serve(port, &region, &seed_clusters).await,
    }
}

async fn serve(port: u16, region: &str, seed_clusters: &[String]) -> anyhow::Result<()> {
    info!(region, "stratus daemon starting");

    // ── Assemble the emulated services ─────────────────────────────

    let ecs = stratus_ecs::EcsBackend::new();
    for cluster in seed_clusters {
        ecs.create_cluster(cluster);
        info!(cluster, "seeded cluster");
    }

    let registry = stratus_autoscaling::TargetRegistry::open_in_memory()?;
    let resolver = Arc::new(stratus_autoscaling::EcsResolver::new(ecs.clone()));
    let scaling = Arc::new(stratus_autoscaling::ScalingService::new(
        region, registry, resolver,
    ));
    info!("scaling service initialized");

    let state = stratus_api::ApiState {
        region: region.to_string(),
        scaling,
        ecs,
    };
    let router = stratus_api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
