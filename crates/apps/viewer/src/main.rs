use std::env;
use std::sync::Arc;

use compose::{Endpoints, HeadlessSurface, HttpFetch, SourceResolver, VisibilityController};
use layers::{LayerDescriptor, LayerRegistry};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Headless walkthrough of the overlay controller against a live backend:
/// attach the demo registry, reveal the raster overlay (which drives a
/// bounds fit), reveal the road network, then report every layer's state.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base = env::var("OVERLAY_API_BASE").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let endpoints = Endpoints::with_base(&base);
    info!("using backend at {base}");

    let registry = match LayerRegistry::with_default_styles([
        LayerDescriptor::raster("dem", "suanmokkh.tif"),
        LayerDescriptor::vector("roads", "roads"),
        LayerDescriptor::vector("stations", "stations"),
    ]) {
        Ok(registry) => registry,
        Err(err) => {
            error!("invalid layer registry: {err}");
            return;
        }
    };

    let resolver = SourceResolver::new(endpoints.tile_endpoint.clone());
    let fetch = Arc::new(HttpFetch::new(endpoints));
    let mut controller =
        VisibilityController::new(registry, resolver, fetch, HeadlessSurface::ready());

    info!("attaching registry layers");
    controller.surface_ready().await;

    controller.toggle(&"dem".into(), true).await;
    controller.toggle(&"roads".into(), true).await;

    for (id, state) in controller.states() {
        let shown = controller
            .surface()
            .layer(id)
            .map(|layer| layer.shown())
            .unwrap_or(false);
        info!("layer {id}: {state:?}, shown={shown}");
    }
    info!(
        "camera transitions requested: {}",
        controller.surface().camera_moves().len()
    );
}
