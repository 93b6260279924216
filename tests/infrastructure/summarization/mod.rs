mod huggingface_summarizer_test;
