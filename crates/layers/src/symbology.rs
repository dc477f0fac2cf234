use crate::descriptor::{LayerDescriptor, LayerKind};

/// RGBA color, linear components in 0..1.
pub type Color = [f32; 4];

pub const DEFAULT_VECTOR_COLOR: Color = [0.55, 0.55, 0.95, 1.0];

/// Name → color lookup for vector overlays.
///
/// This is the single place a new layer name picks up a color; attachment
/// logic never branches on names.
pub fn palette_color(name: &str) -> Color {
    match name {
        "roads" => [0.95, 0.60, 0.10, 1.0],
        "stations" => [1.0, 0.25, 0.25, 0.95],
        "parcels" => [0.10, 0.90, 0.75, 0.30],
        "waterways" => [0.20, 0.55, 0.95, 0.90],
        _ => DEFAULT_VECTOR_COLOR,
    }
}

/// Paint configuration for one vector overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VectorStyle {
    /// Circle markers with a fixed radius and stroke.
    Points {
        radius: f32,
        stroke_width: f32,
        color: Color,
    },
    /// Stroked line rendering.
    Line { color: Color, width: f32 },
    /// Outline-only rendering for areas and anything unclassified.
    Outline { color: Color },
}

impl VectorStyle {
    pub const POINT_RADIUS: f32 = 5.0;
    pub const POINT_STROKE_WIDTH: f32 = 1.5;
    pub const LINE_WIDTH: f32 = 3.0;

    pub fn points(color: Color) -> Self {
        VectorStyle::Points {
            radius: Self::POINT_RADIUS,
            stroke_width: Self::POINT_STROKE_WIDTH,
            color,
        }
    }

    pub fn line(color: Color) -> Self {
        VectorStyle::Line {
            color,
            width: Self::LINE_WIDTH,
        }
    }

    pub fn outline(color: Color) -> Self {
        VectorStyle::Outline { color }
    }
}

/// Layer names that receive dedicated point / line treatment under the
/// default dispatch; every other vector layer renders as an outline.
pub const POINT_LAYER_NAME: &str = "stations";
pub const LINE_LAYER_NAME: &str = "roads";

/// Default style dispatch: layer kind first, then name.
///
/// Registries resolve this once at construction time; callers that want a
/// different mapping inject their own styles instead of patching here.
pub fn default_style(descriptor: &LayerDescriptor) -> VectorStyle {
    match descriptor.kind {
        // Raster layers carry no vector paint; the outline is inert.
        LayerKind::Raster => VectorStyle::outline(DEFAULT_VECTOR_COLOR),
        LayerKind::Vector => match descriptor.id.as_str() {
            POINT_LAYER_NAME => VectorStyle::points(palette_color(POINT_LAYER_NAME)),
            LINE_LAYER_NAME => VectorStyle::line(palette_color(LINE_LAYER_NAME)),
            name => VectorStyle::outline(palette_color(name)),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::descriptor::LayerDescriptor;

    use super::{DEFAULT_VECTOR_COLOR, VectorStyle, default_style, palette_color};

    #[test]
    fn palette_falls_back_to_default() {
        assert_ne!(palette_color("roads"), DEFAULT_VECTOR_COLOR);
        assert_eq!(palette_color("unmapped-layer"), DEFAULT_VECTOR_COLOR);
    }

    #[test]
    fn dispatch_is_kind_then_name() {
        let points = default_style(&LayerDescriptor::vector("stations", "stations"));
        assert!(matches!(points, VectorStyle::Points { .. }));

        let line = default_style(&LayerDescriptor::vector("roads", "roads"));
        assert_eq!(
            line,
            VectorStyle::Line {
                color: palette_color("roads"),
                width: VectorStyle::LINE_WIDTH
            }
        );

        let other = default_style(&LayerDescriptor::vector("parcels", "parcels"));
        assert_eq!(other, VectorStyle::outline(palette_color("parcels")));

        // A raster layer named like the point layer still gets no marker paint.
        let raster = default_style(&LayerDescriptor::raster("stations", "stations.tif"));
        assert!(matches!(raster, VectorStyle::Outline { .. }));
    }
}
