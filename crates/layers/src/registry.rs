use crate::descriptor::{LayerDescriptor, LayerId};
use crate::symbology::{self, VectorStyle};

/// One registry row: a descriptor plus the paint resolved for it at
/// construction time. Raster rows carry an inert style.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub descriptor: LayerDescriptor,
    pub style: VectorStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateId(LayerId),
    Seed(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateId(id) => write!(f, "duplicate layer id: {id}"),
            RegistryError::Seed(reason) => write!(f, "registry seed document invalid: {reason}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Declarative list of overlay layers that seeds the visibility controller.
///
/// Ids are unique by construction; insertion order is preserved and is the
/// order attachments are issued in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRegistry {
    entries: Vec<LayerEntry>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor with an explicitly injected style.
    pub fn push(
        &mut self,
        descriptor: LayerDescriptor,
        style: VectorStyle,
    ) -> Result<(), RegistryError> {
        if self.get(&descriptor.id).is_some() {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        self.entries.push(LayerEntry { descriptor, style });
        Ok(())
    }

    /// Seed a registry using the default kind-then-name style dispatch.
    pub fn with_default_styles(
        descriptors: impl IntoIterator<Item = LayerDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            let style = symbology::default_style(&descriptor);
            registry.push(descriptor, style)?;
        }
        Ok(registry)
    }

    /// Seed from a JSON array of descriptors, e.g. a checked-in layer list.
    pub fn from_json_str(payload: &str) -> Result<Self, RegistryError> {
        let descriptors: Vec<LayerDescriptor> =
            serde_json::from_str(payload).map_err(|e| RegistryError::Seed(e.to_string()))?;
        Self::with_default_styles(descriptors)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LayerEntry> {
        self.entries
    }

    pub fn get(&self, id: &LayerId) -> Option<&LayerEntry> {
        self.entries.iter().find(|e| e.descriptor.id == *id)
    }
}
