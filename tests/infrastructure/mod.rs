mod audio;
mod storage;
mod summarization;
