//! Fan-out of photoshoot shots and single-shot regeneration.

use futures::future::try_join_all;
use rand::Rng;

use crate::{
    error::{Result, ValidationError},
    gemini::ImageGenerator,
    logger::timer,
    models::{GenerationRequest, ImageData},
    prompt::regeneration_prompt,
    request::{build_request, build_shot},
};

/// Everything needed to run one photoshoot batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotPlan {
    pub prompt: String,
    pub base: ImageData,
    pub props: Option<ImageData>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationPlan {
    pub index: usize,
    pub previous_prompt: String,
    pub extra: String,
    pub base: ImageData,
    pub props: Option<ImageData>,
}

impl RegenerationPlan {
    pub fn request(&self) -> GenerationRequest {
        build_request(
            Some(&self.base),
            self.props.as_ref(),
            regeneration_prompt(&self.previous_prompt, &self.extra),
        )
    }
}

pub(crate) fn ensure_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(ValidationError::MissingApiKey.into());
    }
    Ok(())
}

/// Issues `plan.count` shots at once and waits for all of them.
///
/// Results follow issue order whatever order the calls finish in. The first
/// failure fails the whole batch.
pub async fn generate_batch<G, R>(
    generator: &G,
    api_key: &str,
    plan: &ShotPlan,
    rng: &mut R,
) -> Result<Vec<ImageData>>
where
    G: ImageGenerator + ?Sized,
    R: Rng + ?Sized,
{
    ensure_api_key(api_key)?;
    if plan.count == 0 {
        log::info!("Photoshoot requested with zero photos, nothing to do");
        return Ok(Vec::new());
    }

    let requests: Vec<GenerationRequest> = (0..plan.count)
        .map(|_| build_shot(&plan.prompt, &plan.base, plan.props.as_ref(), &mut *rng))
        .collect();

    log::info!("Starting photoshoot of {} shot(s)", requests.len());
    let _timer = timer("photoshoot batch");

    let images = try_join_all(
        requests
            .iter()
            .map(|request| generator.generate(api_key, request)),
    )
    .await?;

    log::info!("Photoshoot finished with {} image(s)", images.len());
    Ok(images)
}

pub async fn regenerate<G>(generator: &G, api_key: &str, plan: &RegenerationPlan) -> Result<ImageData>
where
    G: ImageGenerator + ?Sized,
{
    ensure_api_key(api_key)?;
    log::info!("Regenerating shot #{}", plan.index + 1);
    let _timer = timer("regeneration");
    generator.generate(api_key, &plan.request()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudioError;
    use crate::models::Part;
    use crate::request::POSES;
    use crate::testing::FakeGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan(count: usize) -> ShotPlan {
        ShotPlan {
            prompt: "session".into(),
            base: ImageData::png(vec![0xba, 0x5e]),
            props: Some(ImageData::new("image/jpeg", vec![0x77])),
            count,
        }
    }

    #[tokio::test]
    async fn zero_photos_issue_no_calls() {
        let generator = FakeGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let images = generate_batch(&generator, "key", &plan(0), &mut rng).await.unwrap();
        assert!(images.is_empty());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn results_keep_issue_order_when_calls_finish_out_of_order() {
        // Earlier calls sleep longer, so call 2 resolves before call 1.
        let generator = FakeGenerator::new().with_reverse_delays(3);
        let mut rng = StdRng::seed_from_u64(2);
        let images = generate_batch(&generator, "key", &plan(3), &mut rng).await.unwrap();

        assert_eq!(generator.calls(), 3);
        let order: Vec<u8> = images.iter().map(|image| image.bytes[0]).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(generator.completion_order(), vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn every_shot_carries_base_props_and_a_pose() {
        let generator = FakeGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);
        generate_batch(&generator, "key", &plan(4), &mut rng).await.unwrap();

        for request in generator.requests() {
            assert_eq!(request.parts[0], Part::InlineData(ImageData::png(vec![0xba, 0x5e])));
            assert_eq!(
                request.parts[1],
                Part::InlineData(ImageData::new("image/jpeg", vec![0x77]))
            );
            let text = request.prompt().unwrap();
            assert!(POSES
                .iter()
                .any(|pose| text == format!("session, {}.", pose)));
        }
    }

    #[tokio::test]
    async fn one_failure_fails_the_batch() {
        let generator = FakeGenerator::new().failing_on(1);
        let mut rng = StdRng::seed_from_u64(4);
        let err = generate_batch(&generator, "key", &plan(3), &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Api { .. }));
    }

    #[tokio::test]
    async fn blank_key_is_rejected_before_any_call() {
        let generator = FakeGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);
        let err = generate_batch(&generator, "  ", &plan(2), &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StudioError::Validation(ValidationError::MissingApiKey)
        ));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn regeneration_sends_base_props_and_combined_prompt() {
        let generator = FakeGenerator::new();
        let plan = RegenerationPlan {
            index: 1,
            previous_prompt: "model, studio".into(),
            extra: "wearing a hat".into(),
            base: ImageData::png(vec![1]),
            props: Some(ImageData::png(vec![2])),
        };
        regenerate(&generator, "key", &plan).await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].parts.len(), 3);
        assert_eq!(requests[0].prompt(), Some("model, studio, wearing a hat."));
    }
}
