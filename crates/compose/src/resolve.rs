use layers::{LayerDescriptor, LayerKind};

use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::geojson::FeatureCollection;

/// Renderable source data for one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSource {
    RasterTiles { template: String },
    Vector(FeatureCollection),
}

/// Turns descriptors into renderable sources.
///
/// Raster resolution is pure string construction with no failure mode.
/// Vector resolution issues exactly one fetch and propagates its failure to
/// the caller, which owns the per-layer bulkhead.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    tile_endpoint: String,
}

impl SourceResolver {
    pub fn new(tile_endpoint: impl Into<String>) -> Self {
        let tile_endpoint = tile_endpoint.into();
        Self {
            tile_endpoint: tile_endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// The template the surface's tile loader expands per tile.
    pub fn tile_template(&self, resource_path: &str) -> String {
        format!(
            "{}/{{z}}/{{x}}/{{y}}?filename={resource_path}",
            self.tile_endpoint
        )
    }

    pub async fn resolve<F: Fetch>(
        &self,
        fetch: &F,
        descriptor: &LayerDescriptor,
    ) -> Result<ResolvedSource, FetchError> {
        match descriptor.kind {
            LayerKind::Raster => Ok(ResolvedSource::RasterTiles {
                template: self.tile_template(&descriptor.resource_path),
            }),
            LayerKind::Vector => {
                let collection = fetch.feature_collection(&descriptor.resource_path).await?;
                Ok(ResolvedSource::Vector(collection))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use layers::LayerDescriptor;
    use pretty_assertions::assert_eq;

    use crate::error::FetchError;
    use crate::fetch::doubles::StaticFetch;
    use crate::geojson::FeatureCollection;

    use super::{ResolvedSource, SourceResolver};

    #[tokio::test]
    async fn raster_resolution_is_pure_template_building() {
        let resolver = SourceResolver::new("http://localhost:8000/api/tiles/");
        let fetch = StaticFetch::new();

        let source = resolver
            .resolve(&fetch, &LayerDescriptor::raster("dem", "suanmokkh.tif"))
            .await
            .expect("raster never fails");
        assert_eq!(
            source,
            ResolvedSource::RasterTiles {
                template: "http://localhost:8000/api/tiles/{z}/{x}/{y}?filename=suanmokkh.tif"
                    .to_string()
            }
        );
    }

    #[tokio::test]
    async fn vector_resolution_fetches_the_collection() {
        let resolver = SourceResolver::new("http://localhost:8000/api/tiles");
        let fetch =
            StaticFetch::new().with_collection("roads", FeatureCollection::empty());

        let source = resolver
            .resolve(&fetch, &LayerDescriptor::vector("roads", "roads"))
            .await
            .expect("resolve");
        assert!(matches!(source, ResolvedSource::Vector(fc) if fc.is_empty()));
    }

    #[tokio::test]
    async fn vector_resolution_surfaces_fetch_errors() {
        let resolver = SourceResolver::new("http://localhost:8000/api/tiles");
        let fetch = StaticFetch::new().with_failure("roads");

        let err = resolver
            .resolve(&fetch, &LayerDescriptor::vector("roads", "roads"))
            .await
            .expect_err("must fail");
        assert_eq!(err, FetchError::Status(500));
    }
}
