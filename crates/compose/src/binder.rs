use layers::{LayerEntry, LayerId};
use tracing::info;

use crate::error::AttachError;
use crate::resolve::ResolvedSource;
use crate::surface::Surface;

/// Registers resolved sources with the rendering surface, exactly once per
/// layer id.
///
/// The surface treats duplicate ids as fatal, so `attach` reports
/// `DuplicateAttachment` instead of re-registering, and it refuses to run
/// before the surface signals ready rather than dropping the request.
#[derive(Debug)]
pub struct MapBinder<S> {
    surface: S,
}

impl<S: Surface> MapBinder<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Attach `source` under the entry's id with the given initial display
    /// state.
    pub fn attach(
        &mut self,
        entry: &LayerEntry,
        source: &ResolvedSource,
        shown: bool,
    ) -> Result<(), AttachError> {
        if !self.surface.is_ready() {
            return Err(AttachError::SurfaceNotReady);
        }
        let id = &entry.descriptor.id;
        if self.surface.has_layer(id) {
            return Err(AttachError::DuplicateAttachment(id.clone()));
        }

        match source {
            ResolvedSource::RasterTiles { template } => {
                self.surface.add_raster_layer(id, template, shown);
            }
            ResolvedSource::Vector(collection) => {
                self.surface
                    .add_vector_layer(id, collection, &entry.style, shown);
            }
        }
        info!("layer {id} bound to surface");
        Ok(())
    }

    /// Display-state property update; never re-attaches.
    pub fn set_visible(&mut self, id: &LayerId, shown: bool) {
        self.surface.set_layer_visible(id, shown);
    }
}

#[cfg(test)]
mod tests {
    use layers::{LayerDescriptor, LayerEntry, VectorStyle, palette_color};
    use pretty_assertions::assert_eq;

    use crate::error::AttachError;
    use crate::geojson::FeatureCollection;
    use crate::resolve::ResolvedSource;
    use crate::surface::{HeadlessSurface, SurfaceLayer};

    use super::MapBinder;

    fn roads_entry() -> LayerEntry {
        LayerEntry {
            descriptor: LayerDescriptor::vector("roads", "roads"),
            style: VectorStyle::line(palette_color("roads")),
        }
    }

    #[test]
    fn attach_is_guarded_against_duplicates() {
        let mut binder = MapBinder::new(HeadlessSurface::ready());
        let entry = roads_entry();
        let source = ResolvedSource::Vector(FeatureCollection::empty());

        binder.attach(&entry, &source, false).expect("first attach");
        let err = binder
            .attach(&entry, &source, true)
            .expect_err("second attach must be rejected");
        assert_eq!(err, AttachError::DuplicateAttachment("roads".into()));
        assert_eq!(binder.surface().layer_count(), 1);
    }

    #[test]
    fn attach_requires_a_ready_surface() {
        let mut binder = MapBinder::new(HeadlessSurface::new());
        let err = binder
            .attach(
                &roads_entry(),
                &ResolvedSource::Vector(FeatureCollection::empty()),
                false,
            )
            .expect_err("surface not ready");
        assert_eq!(err, AttachError::SurfaceNotReady);
        assert_eq!(binder.surface().layer_count(), 0);
    }

    #[test]
    fn initial_display_state_follows_shown() {
        let mut binder = MapBinder::new(HeadlessSurface::ready());
        let entry = LayerEntry {
            descriptor: LayerDescriptor::raster("dem", "dem.tif"),
            style: VectorStyle::outline(palette_color("dem")),
        };
        binder
            .attach(
                &entry,
                &ResolvedSource::RasterTiles {
                    template: "http://t/{z}/{x}/{y}?filename=dem.tif".to_string(),
                },
                false,
            )
            .expect("attach");

        let layer = binder.surface().layer(&"dem".into()).expect("layer");
        assert!(matches!(layer, SurfaceLayer::Raster { shown: false, .. }));

        binder.set_visible(&"dem".into(), true);
        assert!(binder.surface().layer(&"dem".into()).expect("layer").shown());
    }
}
