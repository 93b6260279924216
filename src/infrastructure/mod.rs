pub mod audio;
pub mod download;
pub mod language;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod summarization;
