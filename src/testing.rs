//! Test doubles shared by the unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    error::{Result, StudioError},
    gemini::ImageGenerator,
    models::{GenerationRequest, ImageData},
};

/// Answers call `i` with a one-byte PNG `[i]`.
#[derive(Default)]
pub struct FakeGenerator {
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    completed: Mutex<Vec<usize>>,
    reverse_delays: Option<usize>,
    fail_on: Option<usize>,
    no_image: bool,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `i` of `n` sleeps `(n - i) * 15ms` before answering.
    pub fn with_reverse_delays(mut self, n: usize) -> Self {
        self.reverse_delays = Some(n);
        self
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn without_images(mut self) -> Self {
        self.no_image = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn completion_order(&self) -> Vec<usize> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, _api_key: &str, request: &GenerationRequest) -> Result<ImageData> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(n) = self.reverse_delays {
            let delay = n.saturating_sub(call) as u64 * 15;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.completed.lock().unwrap().push(call);

        if self.fail_on == Some(call) {
            return Err(StudioError::Api {
                status: Some(500),
                message: format!("call {} exploded", call),
            });
        }
        if self.no_image {
            return Err(StudioError::NoImageData);
        }
        Ok(ImageData::png(vec![call as u8]))
    }
}
