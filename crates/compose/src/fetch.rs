use foundation::bounds::LngLatBounds;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::geojson::FeatureCollection;

/// Base URLs for the three collaborator-owned backend routes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    /// Expanded per tile as `<tileEndpoint>/{z}/{x}/{y}?filename=<name>`.
    pub tile_endpoint: String,
    /// `<geojsonEndpoint>/<name>` serves a feature collection.
    pub geojson_endpoint: String,
    /// `<boundsEndpoint>/<name>` serves `{ "bounds": [..] }` or an error.
    pub bounds_endpoint: String,
}

impl Endpoints {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            tile_endpoint: format!("{base}/api/tiles"),
            geojson_endpoint: format!("{base}/api/data/geojson"),
            bounds_endpoint: format!("{base}/api/data/tif"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base("http://localhost:8000")
    }
}

/// Data-fetch collaborator boundary.
///
/// Both calls suspend the caller at the network boundary; nothing is cached
/// here. Bounds documents that arrive but do not decode into usable bounds
/// are `Ok(None)` by contract, while network and status failures are errors.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn feature_collection(&self, name: &str) -> Result<FeatureCollection, FetchError>;

    async fn bounds(&self, name: &str) -> Result<Option<LngLatBounds>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct BoundsDoc {
    bounds: [f64; 4],
}

/// Malformed payloads become `None`; only transport/status problems are
/// errors, and those are raised before this runs.
fn decode_bounds_doc(name: &str, text: &str) -> Option<LngLatBounds> {
    let doc: BoundsDoc = match serde_json::from_str(text) {
        Ok(doc) => doc,
        Err(err) => {
            debug!("bounds document for {name} not decodable: {err}");
            return None;
        }
    };
    let bounds = LngLatBounds::from_array(doc.bounds);
    if bounds.is_none() {
        debug!("bounds for {name} out of range: {:?}", doc.bounds);
    }
    bounds
}

/// HTTP implementation of [`Fetch`] over the configured endpoints.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpFetch {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl Fetch for HttpFetch {
    async fn feature_collection(&self, name: &str) -> Result<FeatureCollection, FetchError> {
        let url = format!(
            "{}/{name}",
            self.endpoints.geojson_endpoint.trim_end_matches('/')
        );
        let text = self.get_text(&url).await?;
        FeatureCollection::from_json_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn bounds(&self, name: &str) -> Result<Option<LngLatBounds>, FetchError> {
        let url = format!(
            "{}/{name}",
            self.endpoints.bounds_endpoint.trim_end_matches('/')
        );
        let text = self.get_text(&url).await?;
        Ok(decode_bounds_doc(name, &text))
    }
}

#[cfg(test)]
pub(crate) mod doubles {
    use std::collections::{BTreeMap, BTreeSet};

    use foundation::bounds::LngLatBounds;

    use crate::error::FetchError;
    use crate::geojson::FeatureCollection;

    use super::Fetch;

    /// Canned-response fetcher. Per-name poll delays let tests drive
    /// concurrent resolutions to complete in arbitrary orders.
    #[derive(Debug, Default)]
    pub struct StaticFetch {
        collections: BTreeMap<String, FeatureCollection>,
        bounds: BTreeMap<String, [f64; 4]>,
        failing: BTreeSet<String>,
        delays: BTreeMap<String, u32>,
    }

    impl StaticFetch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_collection(mut self, name: &str, fc: FeatureCollection) -> Self {
            self.collections.insert(name.to_string(), fc);
            self
        }

        pub fn with_bounds(mut self, name: &str, bounds: [f64; 4]) -> Self {
            self.bounds.insert(name.to_string(), bounds);
            self
        }

        pub fn with_failure(mut self, name: &str) -> Self {
            self.failing.insert(name.to_string());
            self
        }

        pub fn with_delay(mut self, name: &str, polls: u32) -> Self {
            self.delays.insert(name.to_string(), polls);
            self
        }

        async fn settle(&self, name: &str) -> Result<(), FetchError> {
            for _ in 0..self.delays.get(name).copied().unwrap_or(0) {
                tokio::task::yield_now().await;
            }
            if self.failing.contains(name) {
                return Err(FetchError::Status(500));
            }
            Ok(())
        }
    }

    impl Fetch for StaticFetch {
        async fn feature_collection(&self, name: &str) -> Result<FeatureCollection, FetchError> {
            self.settle(name).await?;
            self.collections
                .get(name)
                .cloned()
                .ok_or(FetchError::Status(404))
        }

        async fn bounds(&self, name: &str) -> Result<Option<LngLatBounds>, FetchError> {
            self.settle(name).await?;
            Ok(self
                .bounds
                .get(name)
                .copied()
                .and_then(LngLatBounds::from_array))
        }
    }
}
