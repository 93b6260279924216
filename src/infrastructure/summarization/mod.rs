mod huggingface_summarizer;
mod summarizer_factory;

pub use huggingface_summarizer::HuggingFaceSummarizer;
pub use summarizer_factory::SummarizerFactory;
