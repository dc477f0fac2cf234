use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use layers::{LayerDescriptor, LayerEntry, LayerId, LayerKind, LayerRegistry};
use tracing::{error, info, warn};

use crate::binder::MapBinder;
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::fitter::ViewportFitter;
use crate::resolve::{ResolvedSource, SourceResolver};
use crate::surface::Surface;

/// Lifecycle of one descriptor's attachment.
///
/// At most one attempt is ever issued per id; `Failed` is terminal for the
/// session. `visible=true` while not yet `Attached` is a legal transient
/// state, the layer is simply still loading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttachmentState {
    NotRequested,
    Pending,
    Attached,
    Failed,
}

/// Per-descriptor slot. Each slot is written only by the single task that
/// owns its resolution result, serialized through the controller.
#[derive(Debug)]
struct LayerSlot {
    entry: LayerEntry,
    state: AttachmentState,
    /// Visibility requested by toggles that landed before attachment
    /// completed; consumed exactly once when the layer lands.
    requested_visible: Option<bool>,
}

/// In-flight source resolutions: one message per descriptor, consumed by the
/// controller in completion order.
pub struct InflightResolutions {
    inner: FuturesUnordered<LocalBoxFuture<'static, (LayerId, Result<ResolvedSource, FetchError>)>>,
}

impl InflightResolutions {
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub async fn next_result(&mut self) -> Option<(LayerId, Result<ResolvedSource, FetchError>)> {
        self.inner.next().await
    }
}

/// Owns the authoritative descriptor list and mediates every visibility
/// change.
///
/// Attachment of the whole registry is issued concurrently at surface-ready
/// time; completion order across descriptors is unspecified and each
/// descriptor fails independently of its siblings.
pub struct VisibilityController<F, S> {
    resolver: SourceResolver,
    fetch: Arc<F>,
    binder: MapBinder<S>,
    fitter: ViewportFitter,
    slots: Vec<LayerSlot>,
}

impl<F, S> VisibilityController<F, S>
where
    F: Fetch + 'static,
    S: Surface,
{
    pub fn new(
        registry: LayerRegistry,
        resolver: SourceResolver,
        fetch: Arc<F>,
        surface: S,
    ) -> Self {
        let slots = registry
            .into_entries()
            .into_iter()
            .map(|entry| LayerSlot {
                entry,
                state: AttachmentState::NotRequested,
                requested_visible: None,
            })
            .collect();
        Self {
            resolver,
            fetch,
            binder: MapBinder::new(surface),
            fitter: ViewportFitter::default(),
            slots,
        }
    }

    pub fn with_fitter(mut self, fitter: ViewportFitter) -> Self {
        self.fitter = fitter;
        self
    }

    pub fn surface(&self) -> &S {
        self.binder.surface()
    }

    pub fn attachment_state(&self, id: &LayerId) -> Option<AttachmentState> {
        self.slot_index(id).map(|i| self.slots[i].state)
    }

    pub fn descriptor(&self, id: &LayerId) -> Option<&LayerDescriptor> {
        self.slot_index(id).map(|i| &self.slots[i].entry.descriptor)
    }

    pub fn states(&self) -> impl Iterator<Item = (&LayerId, AttachmentState)> {
        self.slots.iter().map(|s| (&s.entry.descriptor.id, s.state))
    }

    /// True once no descriptor is still waiting on a resolution.
    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(|s| {
            matches!(s.state, AttachmentState::Attached | AttachmentState::Failed)
        })
    }

    /// Surface-ready lifecycle hook: resolve and attach the whole registry.
    pub async fn surface_ready(&mut self) {
        let inflight = self.start_attachments();
        self.finish_attachments(inflight).await;
    }

    /// Issue a resolution for every descriptor that has never been
    /// requested. Completion order across descriptors is unspecified.
    pub fn start_attachments(&mut self) -> InflightResolutions {
        let inner = self
            .slots
            .iter_mut()
            .filter(|slot| slot.state == AttachmentState::NotRequested)
            .map(|slot| {
                slot.state = AttachmentState::Pending;
                let resolver = self.resolver.clone();
                let fetch = Arc::clone(&self.fetch);
                let descriptor = slot.entry.descriptor.clone();
                async move {
                    let outcome = resolver.resolve(fetch.as_ref(), &descriptor).await;
                    (descriptor.id, outcome)
                }
                .boxed_local()
            })
            .collect();
        InflightResolutions { inner }
    }

    /// Consume resolution results as they complete, attaching or failing
    /// each descriptor independently. Toggles may run between completions;
    /// their requested visibility is applied when the layer lands.
    pub async fn finish_attachments(&mut self, mut inflight: InflightResolutions) {
        while let Some((id, outcome)) = inflight.next_result().await {
            self.apply_resolution(&id, outcome).await;
        }
    }

    /// UI entry point: one checkbox change.
    pub async fn toggle(&mut self, id: &LayerId, checked: bool) {
        let Some(index) = self.slot_index(id) else {
            warn!("toggle for unknown layer {id}");
            return;
        };

        if self.slots[index].state != AttachmentState::Attached {
            // Remember the request; the attachment path applies the most
            // recent one when the layer lands. Failed layers stay inert.
            let slot = &mut self.slots[index];
            slot.requested_visible = Some(checked);
            warn!(
                "layer {id} is not ready ({:?}); visibility request recorded",
                slot.state
            );
            return;
        }

        let fit_resource = {
            let slot = &mut self.slots[index];
            slot.entry.descriptor.visible = checked;
            (checked && slot.entry.descriptor.kind == LayerKind::Raster)
                .then(|| slot.entry.descriptor.resource_path.clone())
        };

        self.binder.set_visible(id, checked);
        if let Some(resource) = fit_resource {
            self.fit_raster(&resource).await;
        }
    }

    async fn apply_resolution(
        &mut self,
        id: &LayerId,
        outcome: Result<ResolvedSource, FetchError>,
    ) {
        let Some(index) = self.slot_index(id) else {
            error!("resolution finished for unknown layer {id}");
            return;
        };
        if self.slots[index].state != AttachmentState::Pending {
            error!(
                "resolution finished for layer {id} in state {:?}",
                self.slots[index].state
            );
            return;
        }

        let source = match outcome {
            Ok(source) => source,
            Err(err) => {
                self.slots[index].state = AttachmentState::Failed;
                warn!("layer {id} failed to resolve: {err}");
                return;
            }
        };

        let deferred = self.slots[index].requested_visible.take();
        let shown = deferred.unwrap_or(self.slots[index].entry.descriptor.visible);

        match self.binder.attach(&self.slots[index].entry, &source, shown) {
            Ok(()) => {
                let slot = &mut self.slots[index];
                slot.entry.descriptor.visible = shown;
                slot.state = AttachmentState::Attached;
                info!(
                    "layer {id} attached ({})",
                    if shown { "shown" } else { "hidden" }
                );
            }
            Err(err) => {
                self.slots[index].state = AttachmentState::Failed;
                error!("layer {id} attachment invariant violated: {err}");
                return;
            }
        }

        // A raster reveal queued while pending fits now, exactly once.
        let fit_resource = {
            let slot = &self.slots[index];
            (deferred == Some(true) && slot.entry.descriptor.kind == LayerKind::Raster)
                .then(|| slot.entry.descriptor.resource_path.clone())
        };
        if let Some(resource) = fit_resource {
            self.fit_raster(&resource).await;
        }
    }

    async fn fit_raster(&mut self, resource: &str) {
        let fetch = Arc::clone(&self.fetch);
        if let Err(err) = self
            .fitter
            .fit_to(fetch.as_ref(), self.binder.surface_mut(), resource)
            .await
        {
            warn!("viewport fit for {resource} failed: {err}");
        }
    }

    fn slot_index(&self, id: &LayerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.entry.descriptor.id == *id)
    }
}
