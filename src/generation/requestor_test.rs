use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::generation::config::DEFAULT_GENERATION_TIMEOUT_SECS;
use crate::generation::placeholder::PlaceholderGenerator;
use crate::generation::types::FailureKind;

// =========================================================================
// Mock backends
// =========================================================================

/// Counts calls and answers with a fixed result.
struct CountingGenerator {
    calls: AtomicUsize,
    result: Result<Artwork, GenerationError>,
}

impl CountingGenerator {
    fn ok(artwork_ref: &str) -> Self {
        Self { calls: AtomicUsize::new(0), result: Ok(Artwork { artwork_ref: artwork_ref.into() }) }
    }

    fn failing(err: GenerationError) -> Self {
        Self { calls: AtomicUsize::new(0), result: Err(err) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ArtworkGenerator for CountingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Artwork, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn requestor(backend: Arc<dyn ArtworkGenerator>) -> GenerationRequestor {
    GenerationRequestor::new(
        Arc::new(RegionCatalog::garment()),
        backend,
        Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
    )
}

// =========================================================================
// Preconditions
// =========================================================================

#[tokio::test]
async fn unknown_region_fails_without_backend_call() {
    let backend = Arc::new(CountingGenerator::ok("a"));
    let req = requestor(backend.clone());
    let err = req.generate("collar", "logo").await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidRequest(msg) if msg.contains("collar")));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn blank_prompt_fails_without_backend_call() {
    let backend = Arc::new(CountingGenerator::ok("a"));
    let req = requestor(backend.clone());
    for prompt in ["", "   ", "\t\n"] {
        let err = req.generate("chest", prompt).await.unwrap_err();
        assert_eq!(err, GenerationError::InvalidRequest("prompt is empty".into()));
    }
    assert_eq!(backend.calls(), 0);
}

// =========================================================================
// Outcomes
// =========================================================================

#[tokio::test]
async fn success_returns_backend_artwork() {
    let backend = Arc::new(CountingGenerator::ok("https://img.test/1.png"));
    let req = requestor(backend.clone());
    let artwork = req.generate("chest", "logo").await.unwrap();
    assert_eq!(artwork.artwork_ref, "https://img.test/1.png");
    assert_eq!(backend.calls(), 1);
    assert_eq!(req.backend_name(), "counting");
}

#[tokio::test]
async fn service_error_passes_through() {
    let backend = Arc::new(CountingGenerator::failing(GenerationError::Service { status: 500, body: "boom".into() }));
    let req = requestor(backend);
    let err = req.generate("back", "wave").await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::ServiceError));
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out() {
    let backend = Arc::new(PlaceholderGenerator::new(Duration::from_secs(10), "late"));
    let req = GenerationRequestor::new(Arc::new(RegionCatalog::garment()), backend, Duration::from_secs(1));
    let err = req.generate("chest", "logo").await.unwrap_err();
    assert_eq!(err, GenerationError::Timeout { after_ms: 1000 });
    assert_eq!(err.failure_kind(), Some(FailureKind::Timeout));
}

#[tokio::test(start_paused = true)]
async fn default_placeholder_fits_default_timeout() {
    let req = requestor(Arc::new(PlaceholderGenerator::default()));
    assert_eq!(req.timeout(), Duration::from_secs(30));
    let artwork = req.generate("pocket", "fox").await.unwrap();
    assert_eq!(artwork.artwork_ref, "https://placehold.co/200x200");
}

#[tokio::test]
async fn generate_for_ticket_uses_ticket_fields() {
    struct EchoGenerator;

    #[async_trait::async_trait]
    impl ArtworkGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<Artwork, GenerationError> {
            Ok(Artwork { artwork_ref: format!("{}|{}|{}", request.request_id, request.region_id, request.prompt) })
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    let req = requestor(Arc::new(EchoGenerator));
    let ticket = GenerationTicket { request_id: Uuid::new_v4(), region_id: "leftSleeve".into(), prompt: "stripes".into() };
    let artwork = req.generate_for(&ticket).await.unwrap();
    assert_eq!(artwork.artwork_ref, format!("{}|leftSleeve|stripes", ticket.request_id));
}
