#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::broadcast;
    use visualfabric_core::catalog::{CatalogService, OutfitOption};
    use visualfabric_core::config::ServiceConfig;
    use visualfabric_core::error::{CATALOG_UNAVAILABLE_MESSAGE, GENERATION_FAILED_MESSAGE};
    use visualfabric_core::fabric::{FabricFile, PreviewRenderer, data_uri};
    use visualfabric_core::mockup::{MockupImage, MockupRequest, MockupService};
    use visualfabric_core::session::{GenerationRejected, IdleCondition, Stage};
    use visualfabric_core::{FabricError, Result};

    use crate::notification::{Notification, NotificationLevel};
    use crate::workflow::{MockupWorkflowController, OutfitSelector, WorkflowUpdate};

    // Mock CatalogService for testing
    struct MockCatalog {
        status: Option<u16>,
        options: Vec<OutfitOption>,
        calls: AtomicUsize,
    }

    impl MockCatalog {
        fn with_options(options: Vec<OutfitOption>) -> Arc<Self> {
            Arc::new(Self {
                status: None,
                options,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                status: Some(status),
                options: Vec::new(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogService for MockCatalog {
        async fn list_outfits(&self) -> Result<Vec<OutfitOption>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(FabricError::Catalog {
                    status: Some(status),
                    message: "Internal Server Error".to_string(),
                }),
                None => Ok(self.options.clone()),
            }
        }
    }

    enum MockupBehavior {
        Succeed(&'static [u8]),
        Fail(u16),
        Hang,
        Panic,
    }

    // Mock MockupService for testing
    struct MockMockups {
        behavior: MockupBehavior,
        delay: Duration,
        calls: AtomicUsize,
        last_request: std::sync::Mutex<Option<MockupRequest>>,
    }

    impl MockMockups {
        fn new(behavior: MockupBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                delay: Duration::from_millis(20),
                calls: AtomicUsize::new(0),
                last_request: std::sync::Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> Option<MockupRequest> {
            self.last_request.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MockupService for MockMockups {
        async fn generate(&self, request: MockupRequest) -> Result<MockupImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            tokio::time::sleep(self.delay).await;
            match self.behavior {
                MockupBehavior::Succeed(bytes) => Ok(MockupImage::new("image/png", bytes.to_vec())),
                MockupBehavior::Fail(status) => Err(FabricError::Generation {
                    status: Some(status),
                    message: "Traceback: model crashed".to_string(),
                }),
                MockupBehavior::Hang => std::future::pending().await,
                MockupBehavior::Panic => panic!("mockup adapter bug"),
            }
        }
    }

    struct PanickingCatalog;

    #[async_trait]
    impl CatalogService for PanickingCatalog {
        async fn list_outfits(&self) -> Result<Vec<OutfitOption>> {
            panic!("catalog adapter bug")
        }
    }

    // Renders files whose bytes equal `slow_bytes` later than everything else
    struct DelayedRenderer {
        slow_bytes: &'static [u8],
    }

    #[async_trait]
    impl PreviewRenderer for DelayedRenderer {
        async fn render(&self, mime_type: &str, bytes: &[u8]) -> Result<String> {
            let delay = if bytes == self.slow_bytes { 50 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(data_uri(mime_type, bytes))
        }
    }

    fn saree_catalog() -> Arc<MockCatalog> {
        MockCatalog::with_options(vec![
            OutfitOption::new("a", "Saree"),
            OutfitOption::new("b", "Sherwani"),
        ])
    }

    fn controller(
        catalog: Arc<MockCatalog>,
        mockups: Arc<MockMockups>,
    ) -> MockupWorkflowController {
        MockupWorkflowController::new(catalog, mockups, &ServiceConfig::default())
    }

    fn png(name: &str, bytes: &[u8]) -> FabricFile {
        FabricFile::new(name, "image/png", bytes.to_vec())
    }

    fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
        let mut received = Vec::new();
        while let Ok(notification) = rx.try_recv() {
            received.push(notification);
        }
        received
    }

    /// Opens the dialog, loads the catalog, picks fabric.png and outfit "a".
    async fn ready_controller(mockups: Arc<MockMockups>) -> MockupWorkflowController {
        let mut controller = controller(saree_catalog(), mockups);
        assert!(controller.open());
        controller.settle().await;
        assert!(controller.accept_file(png("fabric.png", b"FABRIC")));
        controller.settle().await;
        assert!(controller.select_outfit("a"));
        controller
    }

    #[tokio::test]
    async fn test_closed_until_opened() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));

        assert_eq!(controller.stage(), Stage::Closed);
        assert!(controller.session().is_none());
        assert!(!controller.accept_file(png("fabric.png", b"FABRIC")));
        assert!(!controller.select_outfit("a"));
        assert_eq!(
            controller.request_generation(),
            Err(GenerationRejected::DialogClosed)
        );
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_open_loads_catalog_once_per_opening() {
        let catalog = saree_catalog();
        let mut controller = controller(catalog.clone(), MockMockups::new(MockupBehavior::Hang));

        assert!(controller.open());
        assert!(!controller.open());
        controller.settle().await;
        assert_eq!(catalog.calls(), 1);

        assert!(controller.close());
        assert!(controller.open());
        controller.settle().await;
        assert_eq!(catalog.calls(), 2);
    }

    #[tokio::test]
    async fn test_selector_is_placeholder_while_loading() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));
        controller.open();

        assert_eq!(controller.outfit_selector(), OutfitSelector::Placeholder);
        assert!(!controller.outfit_selector().is_interactive());
        assert!(!controller.select_outfit("a"));

        let updates = controller.settle().await;
        assert_eq!(updates, vec![WorkflowUpdate::CatalogReady { options: 2 }]);
        assert!(controller.outfit_selector().is_interactive());
    }

    #[tokio::test]
    async fn test_catalog_round_trip_exposes_label_bound_to_id() {
        let catalog = MockCatalog::with_options(vec![OutfitOption::new("a", "Saree")]);
        let mut controller = controller(catalog, MockMockups::new(MockupBehavior::Hang));
        controller.open();
        controller.settle().await;

        let options = controller.outfit_selector().options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Saree");
        assert_eq!(options[0].id, "a");

        assert!(controller.select_outfit("a"));
        assert_eq!(controller.session().unwrap().selected_outfit_id(), Some("a"));
    }

    #[tokio::test]
    async fn test_catalog_failure_leaves_idle_with_error() {
        let mut controller = controller(
            MockCatalog::failing(500),
            MockMockups::new(MockupBehavior::Hang),
        );
        let mut rx = controller.subscribe();
        controller.open();

        let updates = controller.settle().await;
        assert_eq!(updates, vec![WorkflowUpdate::CatalogFailed]);

        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.error_message(), Some(CATALOG_UNAVAILABLE_MESSAGE));
        assert_eq!(session.idle_condition(), Some(IdleCondition::ErrorShown));
        assert!(controller.outfit_selector().options().is_empty());
        assert!(!controller.outfit_selector().is_interactive());
        assert!(!controller.select_outfit("a"));

        assert_eq!(
            drain(&mut rx),
            vec![Notification::error(CATALOG_UNAVAILABLE_MESSAGE)]
        );
    }

    #[tokio::test]
    async fn test_generation_success_reaches_result() {
        let mockups = MockMockups::new(MockupBehavior::Succeed(b"IMG"));
        let mut controller = ready_controller(mockups.clone()).await;
        let mut rx = controller.subscribe();

        assert_eq!(controller.stage(), Stage::Idle);
        assert_eq!(controller.request_generation(), Ok(()));
        assert_eq!(controller.stage(), Stage::Generating);

        let updates = controller.settle().await;
        assert_eq!(updates, vec![WorkflowUpdate::MockupReady]);
        assert_eq!(controller.stage(), Stage::Result);

        let session = controller.session().unwrap();
        let image = session.result_image().unwrap();
        assert_eq!(&*image.bytes, b"IMG");
        assert_eq!(image.data_uri(), "data:image/png;base64,SU1H");
        assert!(session.error_message().is_none());
        assert!(session.invariants_hold());

        let request = mockups.last_request().unwrap();
        assert_eq!(request.prompt_id, "a");
        assert_eq!(request.file_name, "fabric.png");
        assert_eq!(&*request.bytes, b"FABRIC");

        let notifications = drain(&mut rx);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
    }

    #[tokio::test]
    async fn test_generation_failure_returns_to_idle() {
        let mockups = MockMockups::new(MockupBehavior::Fail(500));
        let mut controller = ready_controller(mockups.clone()).await;
        let mut rx = controller.subscribe();

        controller.request_generation().unwrap();
        assert_eq!(controller.stage(), Stage::Generating);

        let updates = controller.settle().await;
        assert_eq!(updates, vec![WorkflowUpdate::GenerationFailed]);

        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));
        assert!(session.result_image().is_none());
        assert!(session.invariants_hold());

        // the raw error never reaches the user
        let notifications = drain(&mut rx);
        assert_eq!(notifications, vec![Notification::error(GENERATION_FAILED_MESSAGE)]);

        // retry is available immediately
        assert_eq!(controller.request_generation(), Ok(()));
        assert!(controller.session().unwrap().error_message().is_none());
        controller.settle().await;
        assert_eq!(mockups.calls(), 2);
    }

    #[tokio::test]
    async fn test_reset_from_result_clears_everything() {
        let mut controller =
            ready_controller(MockMockups::new(MockupBehavior::Succeed(b"IMG"))).await;
        controller.request_generation().unwrap();
        controller.settle().await;
        assert_eq!(controller.stage(), Stage::Result);

        assert!(controller.reset());

        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert!(session.fabric().is_none());
        assert!(session.selected_outfit_id().is_none());
        assert!(session.result_image().is_none());
        assert!(session.error_message().is_none());
        assert_eq!(session.idle_condition(), Some(IdleCondition::Empty));

        // catalog survives a reset within the same opening
        assert!(controller.select_outfit("b"));
    }

    #[tokio::test]
    async fn test_reset_outside_result_is_noop() {
        let mut controller = ready_controller(MockMockups::new(MockupBehavior::Hang)).await;
        assert!(!controller.reset());
        assert!(controller.session().unwrap().fabric().is_some());
    }

    #[tokio::test]
    async fn test_repeated_requests_while_generating_submit_once() {
        let mockups = MockMockups::new(MockupBehavior::Succeed(b"IMG"));
        let mut controller = ready_controller(mockups.clone()).await;

        assert_eq!(controller.request_generation(), Ok(()));
        for _ in 0..5 {
            assert_eq!(
                controller.request_generation(),
                Err(GenerationRejected::AlreadyGenerating)
            );
            assert_eq!(controller.stage(), Stage::Generating);
        }
        assert_eq!(controller.in_flight(), 1);

        controller.settle().await;
        assert_eq!(mockups.calls(), 1);
        assert_eq!(controller.stage(), Stage::Result);

        // the result view does not accept another submission either
        assert_eq!(
            controller.request_generation(),
            Err(GenerationRejected::NotIdle)
        );
        controller.settle().await;
        assert_eq!(mockups.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_inputs_never_touch_the_network() {
        let mockups = MockMockups::new(MockupBehavior::Succeed(b"IMG"));
        let mut controller = controller(saree_catalog(), mockups.clone());
        let mut rx = controller.subscribe();
        controller.open();
        controller.settle().await;

        assert_eq!(
            controller.request_generation(),
            Err(GenerationRejected::MissingFabric)
        );
        assert_eq!(controller.stage(), Stage::Idle);

        controller.accept_file(png("fabric.png", b"FABRIC"));
        controller.settle().await;
        drain(&mut rx);

        assert_eq!(
            controller.request_generation(),
            Err(GenerationRejected::MissingOutfit)
        );
        assert_eq!(controller.stage(), Stage::Idle);
        assert_eq!(controller.in_flight(), 0);
        assert_eq!(mockups.calls(), 0);

        assert_eq!(
            drain(&mut rx),
            vec![Notification::error("Please select an outfit option")]
        );
    }

    #[tokio::test]
    async fn test_accept_file_records_bytes_before_preview() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));
        let mut rx = controller.subscribe();
        controller.open();

        assert!(controller.accept_file(png("fabric.png", b"FABRIC")));
        let fabric = controller.session().unwrap().fabric().unwrap();
        assert_eq!(&*fabric.raw_bytes, b"FABRIC");
        assert_eq!(fabric.display_name, "fabric.png");
        assert!(fabric.preview_data_uri.is_none());

        controller.settle().await;
        let fabric = controller.session().unwrap().fabric().unwrap();
        assert_eq!(
            fabric.preview_data_uri.as_deref(),
            Some(data_uri("image/png", b"FABRIC").as_str())
        );

        assert_eq!(
            drain(&mut rx),
            vec![Notification::success("File selected: fabric.png")]
        );
    }

    #[tokio::test]
    async fn test_non_image_files_are_ignored() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));
        controller.open();

        let pdf = FabricFile::new("swatch.pdf", "application/pdf", b"%PDF".to_vec());
        assert!(!controller.accept_file(pdf));
        assert!(controller.session().unwrap().fabric().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_file_preview_wins_when_older_decode_finishes_last() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang))
            .with_preview_renderer(Arc::new(DelayedRenderer { slow_bytes: b"FIRST" }));
        controller.open();
        controller.settle().await;

        controller.accept_file(png("first.png", b"FIRST"));
        controller.accept_file(png("second.png", b"SECOND"));

        let updates = controller.settle().await;
        assert_eq!(
            updates,
            vec![WorkflowUpdate::PreviewReady, WorkflowUpdate::Discarded]
        );

        let fabric = controller.session().unwrap().fabric().unwrap();
        assert_eq!(fabric.display_name, "second.png");
        assert_eq!(
            fabric.preview_data_uri.as_deref(),
            Some(data_uri("image/png", b"SECOND").as_str())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_file_preview_wins_when_older_decode_finishes_first() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang))
            .with_preview_renderer(Arc::new(DelayedRenderer { slow_bytes: b"SECOND" }));
        controller.open();
        controller.settle().await;

        controller.accept_file(png("first.png", b"FIRST"));
        controller.accept_file(png("second.png", b"SECOND"));

        let updates = controller.settle().await;
        assert_eq!(
            updates,
            vec![WorkflowUpdate::Discarded, WorkflowUpdate::PreviewReady]
        );

        let fabric = controller.session().unwrap().fabric().unwrap();
        assert_eq!(
            fabric.preview_data_uri.as_deref(),
            Some(data_uri("image/png", b"SECOND").as_str())
        );
    }

    #[tokio::test]
    async fn test_file_intake_closed_on_result_view() {
        let mut controller =
            ready_controller(MockMockups::new(MockupBehavior::Succeed(b"IMG"))).await;
        controller.request_generation().unwrap();
        controller.settle().await;

        assert!(!controller.accept_file(png("other.png", b"OTHER")));
        assert!(!controller.select_outfit("b"));
        let session = controller.session().unwrap();
        assert_eq!(session.fabric().unwrap().display_name, "fabric.png");
        assert_eq!(session.selected_outfit_id(), Some("a"));
    }

    #[tokio::test]
    async fn test_unknown_outfit_is_refused() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));
        controller.open();
        controller.settle().await;

        assert!(!controller.select_outfit("zzz"));
        assert!(controller.session().unwrap().selected_outfit_id().is_none());
    }

    #[tokio::test]
    async fn test_close_twice_matches_close_once() {
        let mut controller = ready_controller(MockMockups::new(MockupBehavior::Hang)).await;

        assert!(controller.close());
        assert_eq!(controller.stage(), Stage::Closed);
        assert!(controller.session().is_none());

        assert!(!controller.close());
        assert_eq!(controller.stage(), Stage::Closed);
        assert!(controller.session().is_none());
    }

    #[tokio::test]
    async fn test_generation_settling_after_close_is_discarded() {
        let mockups = MockMockups::new(MockupBehavior::Succeed(b"IMG"));
        let mut controller = ready_controller(mockups.clone()).await;
        let mut rx = controller.subscribe();

        controller.request_generation().unwrap();
        controller.close();
        controller.open();

        let updates = controller.settle().await;
        assert!(updates.contains(&WorkflowUpdate::Discarded));
        assert!(updates.contains(&WorkflowUpdate::CatalogReady { options: 2 }));

        // the new session is untouched by the old request
        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert!(session.result_image().is_none());
        assert!(session.fabric().is_none());
        assert!(
            drain(&mut rx)
                .iter()
                .all(|n| n.message != "Mockup generated successfully!")
        );
    }

    #[tokio::test]
    async fn test_catalog_from_previous_opening_is_discarded() {
        let mut controller = controller(saree_catalog(), MockMockups::new(MockupBehavior::Hang));
        controller.open();
        controller.close();

        let updates = controller.settle().await;
        assert_eq!(updates, vec![WorkflowUpdate::Discarded]);
        assert_eq!(controller.stage(), Stage::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_landing_after_reset_is_discarded() {
        let mockups = MockMockups::new(MockupBehavior::Succeed(b"IMG"));
        let mut controller = controller(saree_catalog(), mockups)
            .with_preview_renderer(Arc::new(DelayedRenderer { slow_bytes: b"FABRIC" }));
        controller.open();
        controller.settle().await;

        // preview takes 50ms, generation 20ms
        controller.accept_file(png("fabric.png", b"FABRIC"));
        controller.select_outfit("a");
        controller.request_generation().unwrap();

        assert_eq!(
            controller.process_next().await,
            Some(WorkflowUpdate::MockupReady)
        );
        assert!(controller.reset());

        assert_eq!(
            controller.process_next().await,
            Some(WorkflowUpdate::Discarded)
        );
        let session = controller.session().unwrap();
        assert!(session.fabric().is_none());
        assert_eq!(session.idle_condition(), Some(IdleCondition::Empty));
        assert_eq!(controller.process_next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timeout_is_a_failure() {
        let mockups = MockMockups::new(MockupBehavior::Hang);
        let mut controller = ready_controller(mockups.clone())
            .await
            .with_generation_timeout(Duration::from_secs(5));

        controller.request_generation().unwrap();
        let updates = controller.settle().await;

        assert_eq!(updates, vec![WorkflowUpdate::GenerationFailed]);
        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(mockups.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_generation_settles_as_failure() {
        let mockups = MockMockups::new(MockupBehavior::Panic);
        let mut controller = ready_controller(mockups.clone())
            .await
            .with_generation_timeout(Duration::from_millis(100));
        let mut rx = controller.subscribe();

        controller.request_generation().unwrap();
        let updates = controller.settle().await;

        assert_eq!(updates, vec![WorkflowUpdate::GenerationFailed]);
        assert_eq!(controller.in_flight(), 0);
        let session = controller.session().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));
        assert!(session.invariants_hold());
        assert_eq!(
            drain(&mut rx),
            vec![Notification::error(GENERATION_FAILED_MESSAGE)]
        );

        // the session is usable again
        assert_eq!(controller.request_generation(), Ok(()));
        controller.settle().await;
        assert_eq!(mockups.calls(), 2);
    }

    #[tokio::test]
    async fn test_panicking_catalog_settles_as_failure() {
        let mut controller = MockupWorkflowController::new(
            Arc::new(PanickingCatalog),
            MockMockups::new(MockupBehavior::Hang),
            &ServiceConfig::default(),
        );
        controller.open();

        let updates = controller.settle().await;

        assert_eq!(updates, vec![WorkflowUpdate::CatalogFailed]);
        assert_eq!(controller.in_flight(), 0);
        let session = controller.session().unwrap();
        assert_eq!(session.error_message(), Some(CATALOG_UNAVAILABLE_MESSAGE));
        assert!(!controller.outfit_selector().is_interactive());
    }
}
