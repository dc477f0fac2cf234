use tracing::debug;

use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::surface::Surface;

/// Camera-fit parameters for reveal transitions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitOptions {
    pub padding: f64,
    pub max_zoom: f64,
    pub duration_ms: u64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 20.0,
            max_zoom: 18.0,
            duration_ms: 1000,
        }
    }
}

/// Drives the camera to a named resource's bounding box.
///
/// Bounds are fetched fresh on every call, never cached. Absent or
/// malformed bounds are a logged no-op; fetch failures propagate so the
/// caller can apply its bulkhead.
#[derive(Debug, Copy, Clone, Default)]
pub struct ViewportFitter {
    options: FitOptions,
}

impl ViewportFitter {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub async fn fit_to<F: Fetch, S: Surface>(
        &self,
        fetch: &F,
        surface: &mut S,
        resource: &str,
    ) -> Result<(), FetchError> {
        let Some(bounds) = fetch.bounds(resource).await? else {
            debug!("no usable bounds for {resource}; skipping fit");
            return Ok(());
        };
        surface.ease_to(bounds, self.options);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::FetchError;
    use crate::fetch::doubles::StaticFetch;
    use crate::surface::HeadlessSurface;

    use super::{FitOptions, ViewportFitter};

    #[tokio::test]
    async fn fits_to_fetched_bounds() {
        let fetch = StaticFetch::new().with_bounds("dem.tif", [99.0, 13.0, 101.0, 15.0]);
        let mut surface = HeadlessSurface::ready();

        ViewportFitter::default()
            .fit_to(&fetch, &mut surface, "dem.tif")
            .await
            .expect("fit");

        let moves = surface.camera_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].bounds.to_array(), [99.0, 13.0, 101.0, 15.0]);
        assert_eq!(
            moves[0].fit,
            FitOptions {
                padding: 20.0,
                max_zoom: 18.0,
                duration_ms: 1000
            }
        );
    }

    #[tokio::test]
    async fn absent_bounds_are_a_no_op() {
        let fetch = StaticFetch::new();
        let mut surface = HeadlessSurface::ready();

        ViewportFitter::default()
            .fit_to(&fetch, &mut surface, "dem.tif")
            .await
            .expect("absent bounds are not an error");
        assert!(surface.camera_moves().is_empty());
    }

    #[tokio::test]
    async fn fetch_failures_propagate_to_the_caller() {
        let fetch = StaticFetch::new().with_failure("dem.tif");
        let mut surface = HeadlessSurface::ready();

        let err = ViewportFitter::default()
            .fit_to(&fetch, &mut surface, "dem.tif")
            .await
            .expect_err("must fail");
        assert_eq!(err, FetchError::Status(500));
        assert!(surface.camera_moves().is_empty());
    }
}
