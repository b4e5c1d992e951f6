//! Mock text and image drivers for testing.

use async_trait::async_trait;
use fabulist_core::{
    GenerateRequest, GenerateResponse, ImageData, ImageRequest, ImageResponse,
};
use fabulist_error::{FabulistError, FabulistResult, ServiceError, ServiceErrorKind};
use fabulist_interface::{ImageDriver, TextDriver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior configuration for mock text responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ServiceErrorKind),
    /// Fail N times with the given error, then succeed
    FailThenSucceed {
        fail_count: usize,
        error: ServiceErrorKind,
        success_text: String,
    },
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ServiceErrorKind),
}

/// Mock text driver.
///
/// Records every request so tests can inspect the context the engine
/// built. Each call sleeps briefly to simulate latency, which gives
/// concurrently polled operations a chance to interleave.
#[derive(Debug, Clone)]
pub struct MockTextClient {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    latency: Duration,
}

impl MockTextClient {
    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::from_millis(1),
        }
    }

    /// Create a mock that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock that always fails with the given error.
    pub fn new_error(error: ServiceErrorKind) -> Self {
        Self::with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock that fails N times, then succeeds.
    pub fn new_fail_then_succeed(
        fail_count: usize,
        error: ServiceErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::with_behavior(MockBehavior::FailThenSucceed {
            fail_count,
            error,
            success_text: success_text.into(),
        })
    }

    /// Create a mock with a sequence of responses.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::with_behavior(MockBehavior::Sequence(responses))
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn next_response(&self) -> FabulistResult<GenerateResponse> {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        let reply = match &self.behavior {
            MockBehavior::Success(text) => MockResponse::Success(text.clone()),
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current < *fail_count {
                    MockResponse::Error(error.clone())
                } else {
                    MockResponse::Success(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => match responses.get(current) {
                Some(reply) => reply.clone(),
                None => MockResponse::Error(ServiceErrorKind::Application(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current + 1,
                    responses.len()
                ))),
            },
        };

        match reply {
            MockResponse::Success(text) => Ok(GenerateResponse { text }),
            MockResponse::Error(kind) => Err(FabulistError::from(ServiceError::new(kind))),
        }
    }
}

#[async_trait]
impl TextDriver for MockTextClient {
    async fn generate(&self, req: &GenerateRequest) -> FabulistResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        tokio::time::sleep(self.latency).await;
        self.next_response()
    }

    fn provider_name(&self) -> &'static str {
        "mock-text"
    }

    fn model_name(&self) -> &str {
        "mock-gemini"
    }
}

/// Behavior configuration for the mock image driver.
#[derive(Debug, Clone)]
pub enum ImageBehavior {
    /// Return a one-byte PNG whose byte is the call number
    Image,
    /// Succeed without an image payload
    Empty,
    /// Always fail
    Error(ServiceErrorKind),
}

/// Mock image driver.
#[derive(Debug, Clone)]
pub struct MockImageClient {
    behavior: ImageBehavior,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageClient {
    /// Create a mock with the given behavior.
    pub fn new(behavior: ImageBehavior) -> Self {
        Self {
            behavior,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times generate_image() was called.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for MockImageClient {
    async fn generate_image(&self, req: &ImageRequest) -> FabulistResult<ImageResponse> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(req.prompt.clone());
            prompts.len()
        };
        tokio::time::sleep(Duration::from_millis(1)).await;

        match &self.behavior {
            ImageBehavior::Image => Ok(ImageResponse {
                image: Some(ImageData::new("image/png", vec![call as u8])),
            }),
            ImageBehavior::Empty => Ok(ImageResponse { image: None }),
            ImageBehavior::Error(kind) => Err(ServiceError::new(kind.clone()).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-image"
    }

    fn model_name(&self) -> &str {
        "mock-imagen"
    }
}
