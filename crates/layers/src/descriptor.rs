use serde::{Deserialize, Serialize};

/// Stable identity of one overlay layer.
///
/// String-keyed so registries can be seeded from declarative documents, and
/// ordered so state tables iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        LayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        LayerId(id.to_string())
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        LayerId(id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Raster,
    Vector,
}

/// Declarative record for one overlay layer.
///
/// Descriptors are owned by the registry/controller; toggling only ever
/// flips `visible`, nothing destroys a descriptor mid-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub resource_path: String,
    pub kind: LayerKind,
    #[serde(default)]
    pub visible: bool,
}

impl LayerDescriptor {
    pub fn raster(id: impl Into<LayerId>, resource_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_path: resource_path.into(),
            kind: LayerKind::Raster,
            visible: false,
        }
    }

    pub fn vector(id: impl Into<LayerId>, resource_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_path: resource_path.into(),
            kind: LayerKind::Vector,
            visible: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.visible = true;
        self
    }
}
