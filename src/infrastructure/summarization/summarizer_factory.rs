use std::sync::Arc;

use crate::application::ports::{Summarizer, SummarizerError};
use crate::presentation::config::ModelSettings;

use super::HuggingFaceSummarizer;

pub struct SummarizerFactory;

impl SummarizerFactory {
    pub fn create(settings: &ModelSettings) -> Result<Arc<dyn Summarizer>, SummarizerError> {
        tracing::info!(
            model = %settings.summarizer_model,
            base_url = %settings.summarizer_base_url,
            "Using Hugging Face summarizer"
        );
        let summarizer = HuggingFaceSummarizer::new(
            &settings.summarizer_base_url,
            &settings.summarizer_model,
            settings.summarizer_api_key.clone(),
            &settings.summarizer_method,
            settings.request_timeout(),
        )?;
        Ok(Arc::new(summarizer))
    }
}
