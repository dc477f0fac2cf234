use std::collections::BTreeMap;

use foundation::bounds::LngLatBounds;
use layers::{LayerId, VectorStyle};
use tracing::info;

use crate::fitter::FitOptions;
use crate::geojson::FeatureCollection;

/// Rendering-surface collaborator boundary.
///
/// The live engine implements this over its camera/tile/paint machinery; the
/// controller only needs attachment, display-state property updates and
/// camera transitions. The real surface treats a duplicate source/layer id
/// as fatal, which is why the binder checks `has_layer` first.
pub trait Surface {
    fn is_ready(&self) -> bool;

    fn has_layer(&self, id: &LayerId) -> bool;

    fn add_raster_layer(&mut self, id: &LayerId, tile_template: &str, shown: bool);

    fn add_vector_layer(
        &mut self,
        id: &LayerId,
        collection: &FeatureCollection,
        style: &VectorStyle,
        shown: bool,
    );

    /// Display-state property update for an already-attached layer.
    fn set_layer_visible(&mut self, id: &LayerId, shown: bool);

    /// Request a camera transition to `bounds`.
    fn ease_to(&mut self, bounds: LngLatBounds, fit: FitOptions);
}

/// What a headless surface remembers about one attached layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceLayer {
    Raster { tile_template: String, shown: bool },
    Vector {
        feature_count: usize,
        style: VectorStyle,
        shown: bool,
    },
}

impl SurfaceLayer {
    pub fn shown(&self) -> bool {
        match self {
            SurfaceLayer::Raster { shown, .. } => *shown,
            SurfaceLayer::Vector { shown, .. } => *shown,
        }
    }

    fn set_shown(&mut self, value: bool) {
        match self {
            SurfaceLayer::Raster { shown, .. } => *shown = value,
            SurfaceLayer::Vector { shown, .. } => *shown = value,
        }
    }
}

/// Camera transition recorded by the headless surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMove {
    pub bounds: LngLatBounds,
    pub fit: FitOptions,
}

/// Surface that records attachments instead of painting.
///
/// Serves the demo viewer and the controller tests, in the spirit of the
/// engine's command-collecting renderer.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    ready: bool,
    layers: BTreeMap<LayerId, SurfaceLayer>,
    camera_moves: Vec<CameraMove>,
}

impl HeadlessSurface {
    /// A surface that has not yet signaled ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that is ready from the start.
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn layer(&self, id: &LayerId) -> Option<&SurfaceLayer> {
        self.layers.get(id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn camera_moves(&self) -> &[CameraMove] {
        &self.camera_moves
    }
}

impl Surface for HeadlessSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn has_layer(&self, id: &LayerId) -> bool {
        self.layers.contains_key(id)
    }

    fn add_raster_layer(&mut self, id: &LayerId, tile_template: &str, shown: bool) {
        info!("add raster layer {id} <- {tile_template}");
        self.layers.insert(
            id.clone(),
            SurfaceLayer::Raster {
                tile_template: tile_template.to_string(),
                shown,
            },
        );
    }

    fn add_vector_layer(
        &mut self,
        id: &LayerId,
        collection: &FeatureCollection,
        style: &VectorStyle,
        shown: bool,
    ) {
        info!("add vector layer {id} ({} features)", collection.len());
        self.layers.insert(
            id.clone(),
            SurfaceLayer::Vector {
                feature_count: collection.len(),
                style: *style,
                shown,
            },
        );
    }

    fn set_layer_visible(&mut self, id: &LayerId, shown: bool) {
        if let Some(layer) = self.layers.get_mut(id) {
            layer.set_shown(shown);
        }
    }

    fn ease_to(&mut self, bounds: LngLatBounds, fit: FitOptions) {
        info!("ease to {:?} over {}ms", bounds.to_array(), fit.duration_ms);
        self.camera_moves.push(CameraMove { bounds, fit });
    }
}
