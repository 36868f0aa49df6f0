use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use visualfabric_core::FabricError;
use visualfabric_core::catalog::CatalogService;
use visualfabric_core::config::ServiceConfig;
use visualfabric_core::error::{CATALOG_UNAVAILABLE_MESSAGE, GENERATION_FAILED_MESSAGE};
use visualfabric_core::fabric::{DataUriRenderer, FabricFile, PreviewRenderer, UploadedFabric};
use visualfabric_core::mockup::MockupService;
use visualfabric_core::session::{GenerationRejected, Stage, WorkflowSession};

use super::catalog_state::{CatalogState, OutfitSelector};
use super::event::{WorkflowEvent, WorkflowUpdate};
use crate::catalog_loader::CatalogLoader;
use crate::notification::Notification;

const NOTIFICATION_CAPACITY: usize = 32;

/// Everything that lives exactly as long as one dialog opening.
struct OpenDialog {
    epoch: u64,
    session: WorkflowSession,
    catalog: CatalogState,
    /// Bumped on every accepted file and on reset; previews must match it.
    intake_token: u64,
    /// Bumped on every submission; generation results must match it.
    generation_ticket: u64,
}

/// Single owner of the mockup dialog's session.
///
/// Async steps (catalog fetch, preview render, generation) run as spawned
/// tasks and report back over a channel. Only [`process_next`] and
/// [`settle`] apply those completions, so every session mutation happens on
/// the caller's task. Completions that no longer match the current dialog
/// epoch, intake token or generation ticket are discarded.
///
/// [`process_next`]: MockupWorkflowController::process_next
/// [`settle`]: MockupWorkflowController::settle
pub struct MockupWorkflowController {
    catalog_loader: CatalogLoader,
    mockups: Arc<dyn MockupService>,
    previews: Arc<dyn PreviewRenderer>,
    generation_timeout: Duration,
    dialog: Option<OpenDialog>,
    next_epoch: u64,
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<WorkflowEvent>,
    events_rx: mpsc::UnboundedReceiver<WorkflowEvent>,
    notifications: broadcast::Sender<Notification>,
}

impl MockupWorkflowController {
    /// Creates a controller with the dialog closed.
    ///
    /// Timeouts come from `config`; previews default to inline data URIs.
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        mockups: Arc<dyn MockupService>,
        config: &ServiceConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        Self {
            catalog_loader: CatalogLoader::new(catalog, config.catalog_timeout()),
            mockups,
            previews: Arc::new(DataUriRenderer),
            generation_timeout: config.generation_timeout(),
            dialog: None,
            next_epoch: 0,
            in_flight: 0,
            events_tx,
            events_rx,
            notifications,
        }
    }

    pub fn with_preview_renderer(mut self, previews: Arc<dyn PreviewRenderer>) -> Self {
        self.previews = previews;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    // ============================================================================
    // Observation
    // ============================================================================

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Current stage; `Closed` when no dialog is open.
    pub fn stage(&self) -> Stage {
        self.dialog
            .as_ref()
            .map(|dialog| dialog.session.stage())
            .unwrap_or(Stage::Closed)
    }

    pub fn session(&self) -> Option<&WorkflowSession> {
        self.dialog.as_ref().map(|dialog| &dialog.session)
    }

    pub fn catalog_state(&self) -> Option<&CatalogState> {
        self.dialog.as_ref().map(|dialog| &dialog.catalog)
    }

    /// What to draw for the outfit selector.
    pub fn outfit_selector(&self) -> OutfitSelector<'_> {
        match &self.dialog {
            Some(dialog) => OutfitSelector::from(&dialog.catalog),
            None => OutfitSelector::Options(&[]),
        }
    }

    /// Subscribes to transient notifications (toasts).
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Number of spawned steps whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ============================================================================
    // User actions
    // ============================================================================

    /// Opens the dialog with a fresh session and starts the catalog fetch.
    ///
    /// Returns false if the dialog is already open.
    pub fn open(&mut self) -> bool {
        if self.dialog.is_some() {
            return false;
        }

        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let session = WorkflowSession::new();
        tracing::info!("[Workflow] Session {} opened", session.id());

        self.dialog = Some(OpenDialog {
            epoch,
            session,
            catalog: CatalogState::Loading,
            intake_token: 0,
            generation_ticket: 0,
        });

        let loader = self.catalog_loader.clone();
        self.spawn_step(
            async move {
                let result = loader.load().await;
                WorkflowEvent::CatalogLoaded { epoch, result }
            },
            move |err| WorkflowEvent::CatalogLoaded {
                epoch,
                result: Err(err),
            },
        );
        true
    }

    /// Dismisses the dialog and discards its session.
    ///
    /// Idempotent: returns false when nothing was open. Steps still in flight
    /// settle later and are discarded.
    pub fn close(&mut self) -> bool {
        match self.dialog.take() {
            Some(dialog) => {
                tracing::info!(
                    "[Workflow] Session {} closed in stage {:?}",
                    dialog.session.id(),
                    dialog.session.stage()
                );
                true
            }
            None => false,
        }
    }

    /// Takes in a picked file as the session's fabric.
    ///
    /// Non-image files are ignored, as the picker's own filter would. The raw
    /// bytes are recorded immediately; the preview follows asynchronously and
    /// only the most recently accepted file's preview is kept.
    pub fn accept_file(&mut self, file: FabricFile) -> bool {
        let Some(dialog) = self.dialog.as_mut() else {
            tracing::debug!("[Workflow] Ignoring file {}: dialog closed", file.name);
            return false;
        };

        if !file.is_image() {
            tracing::debug!(
                "[Workflow] Ignoring file {}: {} is not an image type",
                file.name,
                file.mime_type
            );
            return false;
        }

        let fabric = UploadedFabric::from(file);
        if fabric.exceeds_soft_limit() {
            tracing::warn!(
                "[Workflow] Fabric {} is {} bytes, above the advertised limit",
                fabric.display_name,
                fabric.size()
            );
        }

        let name = fabric.display_name.clone();
        let mime_type = fabric.mime_type.clone();
        let bytes = fabric.raw_bytes.clone();

        if !dialog.session.accept_fabric(fabric) {
            tracing::debug!(
                "[Workflow] Ignoring file {}: session is {:?}",
                name,
                dialog.session.stage()
            );
            return false;
        }

        dialog.intake_token += 1;
        let epoch = dialog.epoch;
        let token = dialog.intake_token;
        tracing::info!(
            "[Workflow] Session {} accepted fabric {} ({} bytes)",
            dialog.session.id(),
            name,
            bytes.len()
        );

        self.notify(Notification::success(format!("File selected: {}", name)));

        let previews = self.previews.clone();
        self.spawn_step(
            async move {
                let result = previews.render(&mime_type, &bytes).await;
                WorkflowEvent::PreviewRendered {
                    epoch,
                    token,
                    result,
                }
            },
            move |err| WorkflowEvent::PreviewRendered {
                epoch,
                token,
                result: Err(err),
            },
        );
        true
    }

    /// Selects an outfit from the loaded catalog.
    ///
    /// Refused while the catalog is loading or failed, for ids the catalog
    /// does not contain, and outside `Idle`.
    pub fn select_outfit(&mut self, outfit_id: &str) -> bool {
        let Some(dialog) = self.dialog.as_mut() else {
            return false;
        };

        if dialog.catalog.find(outfit_id).is_none() {
            tracing::debug!(
                "[Workflow] Outfit '{}' is not in the loaded catalog",
                outfit_id
            );
            return false;
        }

        dialog.session.select_outfit(outfit_id)
    }

    /// Submits the current fabric and outfit for generation.
    ///
    /// A no-op (returning the reason) unless the session is `Idle` with both
    /// a fabric and an outfit. While a request is in flight every further
    /// call is rejected, never queued.
    pub fn request_generation(&mut self) -> Result<(), GenerationRejected> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Err(GenerationRejected::DialogClosed);
        };

        let request = match dialog.session.begin_generation() {
            Ok(request) => request,
            Err(rejection) => {
                tracing::debug!(
                    "[Workflow] Session {}: generation rejected ({:?})",
                    dialog.session.id(),
                    rejection
                );
                if rejection.is_user_facing() {
                    self.notify(Notification::error(rejection.to_string()));
                }
                return Err(rejection);
            }
        };

        dialog.generation_ticket += 1;
        let epoch = dialog.epoch;
        let ticket = dialog.generation_ticket;
        tracing::info!(
            "[Workflow] Session {}: Idle -> Generating (prompt_id: {})",
            dialog.session.id(),
            request.prompt_id
        );

        let mockups = self.mockups.clone();
        let timeout = self.generation_timeout;
        self.spawn_step(
            async move {
                let result = match tokio::time::timeout(timeout, mockups.generate(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(FabricError::Timeout {
                        operation: "generate_mockup".to_string(),
                        seconds: timeout.as_secs(),
                    }),
                };
                WorkflowEvent::GenerationSettled {
                    epoch,
                    ticket,
                    result,
                }
            },
            move |err| WorkflowEvent::GenerationSettled {
                epoch,
                ticket,
                result: Err(err),
            },
        );
        Ok(())
    }

    /// Returns from the result view to an empty `Idle` session.
    pub fn reset(&mut self) -> bool {
        let Some(dialog) = self.dialog.as_mut() else {
            return false;
        };

        if !dialog.session.reset() {
            return false;
        }

        // a preview still rendering belongs to the cleared fabric
        dialog.intake_token += 1;
        tracing::info!("[Workflow] Session {}: Result -> Idle", dialog.session.id());
        true
    }

    // ============================================================================
    // Completion handling
    // ============================================================================

    /// Waits for the next spawned step to finish and applies it.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn process_next(&mut self) -> Option<WorkflowUpdate> {
        if self.in_flight == 0 {
            return None;
        }

        let event = self.events_rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(event))
    }

    /// Applies completions until nothing is in flight.
    pub async fn settle(&mut self) -> Vec<WorkflowUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.process_next().await {
            updates.push(update);
        }
        updates
    }

    fn apply(&mut self, event: WorkflowEvent) -> WorkflowUpdate {
        let Self {
            dialog,
            notifications,
            ..
        } = self;

        let epoch = match &event {
            WorkflowEvent::CatalogLoaded { epoch, .. }
            | WorkflowEvent::PreviewRendered { epoch, .. }
            | WorkflowEvent::GenerationSettled { epoch, .. } => *epoch,
        };

        let Some(dialog) = dialog.as_mut().filter(|dialog| dialog.epoch == epoch) else {
            tracing::debug!("[Workflow] Discarding completion from a closed dialog");
            return WorkflowUpdate::Discarded;
        };

        match event {
            WorkflowEvent::CatalogLoaded { result, .. } => match result {
                Ok(options) => {
                    let count = options.len();
                    tracing::info!(
                        "[Workflow] Session {}: catalog ready ({} options)",
                        dialog.session.id(),
                        count
                    );
                    dialog.catalog = CatalogState::Ready(options);
                    WorkflowUpdate::CatalogReady { options: count }
                }
                Err(err) => {
                    tracing::warn!(
                        "[Workflow] Session {}: catalog load failed: {}",
                        dialog.session.id(),
                        err
                    );
                    dialog.catalog = CatalogState::Failed;
                    dialog.session.report_error(CATALOG_UNAVAILABLE_MESSAGE);
                    let _ = notifications.send(Notification::error(CATALOG_UNAVAILABLE_MESSAGE));
                    WorkflowUpdate::CatalogFailed
                }
            },

            WorkflowEvent::PreviewRendered { token, result, .. } => {
                if token != dialog.intake_token {
                    tracing::debug!(
                        "[Workflow] Session {}: discarding preview for a replaced file",
                        dialog.session.id()
                    );
                    return WorkflowUpdate::Discarded;
                }
                match result {
                    Ok(preview) => {
                        if dialog.session.attach_preview(preview) {
                            WorkflowUpdate::PreviewReady
                        } else {
                            WorkflowUpdate::Discarded
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            "[Workflow] Session {}: preview render failed: {}",
                            dialog.session.id(),
                            err
                        );
                        WorkflowUpdate::PreviewFailed
                    }
                }
            }

            WorkflowEvent::GenerationSettled { ticket, result, .. } => {
                if ticket != dialog.generation_ticket || !dialog.session.is_generating() {
                    tracing::debug!(
                        "[Workflow] Session {}: discarding stale generation result",
                        dialog.session.id()
                    );
                    return WorkflowUpdate::Discarded;
                }
                match result {
                    Ok(image) => {
                        tracing::info!(
                            "[Workflow] Session {}: Generating -> Result ({} bytes)",
                            dialog.session.id(),
                            image.len()
                        );
                        dialog.session.complete_generation(image);
                        let _ = notifications
                            .send(Notification::success("Mockup generated successfully!"));
                        WorkflowUpdate::MockupReady
                    }
                    Err(err) => {
                        tracing::warn!(
                            "[Workflow] Session {}: Generating -> Idle, generation failed: {}",
                            dialog.session.id(),
                            err
                        );
                        dialog.session.fail_generation(GENERATION_FAILED_MESSAGE);
                        let _ = notifications.send(Notification::error(GENERATION_FAILED_MESSAGE));
                        WorkflowUpdate::GenerationFailed
                    }
                }
            }
        }
    }

    /// Runs `step` on its own task and routes its event back.
    ///
    /// A step that panics still settles: `on_abort` turns the join error into
    /// the failure event for that step, so `in_flight` always drains.
    fn spawn_step<F, A>(&mut self, step: F, on_abort: A)
    where
        F: Future<Output = WorkflowEvent> + Send + 'static,
        A: FnOnce(FabricError) -> WorkflowEvent + Send + 'static,
    {
        self.in_flight += 1;
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(step).await {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!("[Workflow] Async step aborted: {}", err);
                    on_abort(FabricError::internal(format!("Async step aborted: {}", err)))
                }
            };
            // the receiver lives as long as the controller
            let _ = events_tx.send(event);
        });
    }

    fn notify(&self, notification: Notification) {
        // no subscribers is fine
        let _ = self.notifications.send(notification);
    }
}
