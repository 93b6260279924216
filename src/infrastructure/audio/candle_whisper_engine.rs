use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{
    RawTranscription, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
};

use super::audio_decoder::decode_file_to_pcm;
use super::voice_activity::VoiceActivityFilter;

const MAX_DECODE_TOKENS: usize = 224;

/// Language tokens considered during detection.
const CANDIDATE_LANGUAGES: &[&str] = &[
    "en", "te", "hi", "ta", "kn", "ml", "mr", "bn", "gu", "pa", "ur", "ne", "si", "es", "fr",
    "de", "ar", "zh", "ja", "ru",
];

/// In-process Whisper inference on candle.
pub struct CandleWhisperEngine {
    inner: Arc<Inner>,
}

struct Inner {
    model_name: String,
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

struct SpecialTokens {
    sot: u32,
    transcribe: u32,
    no_timestamps: u32,
    eot: u32,
}

#[derive(Clone)]
struct Beam {
    tokens: Vec<u32>,
    log_prob: f32,
    finished: bool,
}

impl Beam {
    fn score(&self, prefix_len: usize) -> f32 {
        let generated = (self.tokens.len() - prefix_len).max(1);
        self.log_prob / generated as f32
    }
}

/// Maps a size selector such as `small` to its Hub repository.
pub fn whisper_repo_id(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("openai/whisper-{}", model)
    }
}

impl CandleWhisperEngine {
    pub fn new(model: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;
        let model_id = whisper_repo_id(model);

        tracing::info!(
            device = ?device,
            model = %model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.clone(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;
        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let whisper = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = %model_id, "Candle Whisper engine loaded");

        Ok(Self {
            inner: Arc::new(Inner {
                model_name: model.to_string(),
                model: Mutex::new(whisper),
                tokenizer,
                config,
                device,
                mel_filters,
            }),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        let inner = self.inner.clone();
        let path: PathBuf = audio_path.to_path_buf();
        let options = options.clone();

        tokio::task::spawn_blocking(move || inner.run(&path, &options))
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("worker: {}", e)))?
    }

    fn model_name(&self) -> &str {
        &self.inner.model_name
    }
}

impl Inner {
    fn run(
        &self,
        path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        let mut pcm = decode_file_to_pcm(path)?;
        if options.vad_filter {
            pcm = VoiceActivityFilter::default().retain_speech(&pcm);
            if pcm.is_empty() {
                tracing::debug!("No speech detected by voice activity filter");
                return Ok(RawTranscription::default());
            }
        }

        let specials = SpecialTokens {
            sot: token_id(&self.tokenizer, m::SOT_TOKEN)?,
            transcribe: token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?,
            no_timestamps: token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
            eot: token_id(&self.tokenizer, m::EOT_TOKEN)?,
        };

        let mels = pcm
            .chunks(m::N_SAMPLES)
            .map(|chunk| self.mel_tensor(chunk))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = self.model.blocking_lock();

        let (language, probability) = match &options.language {
            Some(code) => (code.clone(), None),
            None => {
                let first = mels.first().ok_or_else(|| {
                    TranscriptionError::DecodingFailed("no audio samples".to_string())
                })?;
                let (code, p) = detect_language(&mut model, &self.tokenizer, first, specials.sot)?;
                (code, Some(p))
            }
        };
        let language_token = token_id(&self.tokenizer, &format!("<|{}|>", language))?;

        let mut segments = Vec::new();
        for (i, mel) in mels.iter().enumerate() {
            tracing::debug!(segment = i, language = %language, "Decoding audio segment");
            let prefix = vec![
                specials.sot,
                language_token,
                specials.transcribe,
                specials.no_timestamps,
            ];
            let text = self.beam_search(&mut model, mel, prefix, specials.eot, options.beam_size)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        tracing::info!(
            segments = segments.len(),
            language = %language,
            "Candle Whisper transcription completed"
        );

        Ok(RawTranscription {
            segments,
            detected_language: Some(language),
            language_probability: probability,
        })
    }

    fn mel_tensor(&self, chunk: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut samples = chunk.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e)))
    }

    fn beam_search(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
        prefix: Vec<u32>,
        eot: u32,
        beam_size: usize,
    ) -> Result<String, TranscriptionError> {
        let beam_size = beam_size.max(1);
        let prefix_len = prefix.len();
        let audio_features = model.encoder.forward(mel, true).map_err(failed("encoder"))?;

        let mut beams = vec![Beam {
            tokens: prefix,
            log_prob: 0.0,
            finished: false,
        }];

        for _ in 0..MAX_DECODE_TOKENS {
            if beams.iter().all(|b| b.finished) {
                break;
            }

            let mut candidates = Vec::with_capacity(beams.len() * beam_size);
            for beam in &beams {
                if beam.finished {
                    candidates.push(beam.clone());
                    continue;
                }
                let log_probs = next_token_log_probs(model, &self.device, &beam.tokens, &audio_features)?;
                for (token, lp) in top_k(&log_probs, beam_size) {
                    let mut tokens = beam.tokens.clone();
                    let finished = token == eot;
                    if !finished {
                        tokens.push(token);
                    }
                    candidates.push(Beam {
                        tokens,
                        log_prob: beam.log_prob + lp,
                        finished,
                    });
                }
            }

            candidates.sort_by(|a, b| b.score(prefix_len).total_cmp(&a.score(prefix_len)));
            candidates.truncate(beam_size);
            beams = candidates;
        }

        model.reset_kv_cache();

        let best = beams
            .into_iter()
            .max_by(|a, b| a.score(prefix_len).total_cmp(&b.score(prefix_len)))
            .ok_or_else(|| TranscriptionError::TranscriptionFailed("no beams".to_string()))?;

        let text = self
            .tokenizer
            .decode(&best.tokens[prefix_len..], true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;

        Ok(text.trim().to_string())
    }
}

fn next_token_log_probs(
    model: &mut m::model::Whisper,
    device: &Device,
    tokens: &[u32],
    audio_features: &Tensor,
) -> Result<Vec<f32>, TranscriptionError> {
    let token_tensor = Tensor::new(tokens, device)
        .and_then(|t| t.unsqueeze(0))
        .map_err(failed("tokens"))?;

    // Beams diverge, so the decoder cache is rebuilt for every hypothesis.
    let output = model
        .decoder
        .forward(&token_tensor, audio_features, true)
        .map_err(failed("decoder"))?;
    let logits = model
        .decoder
        .final_linear(&output.squeeze(0).map_err(failed("squeeze"))?)
        .map_err(failed("linear"))?;

    let seq_len = logits.dim(0).map_err(failed("logits"))?;
    let last = logits.get(seq_len - 1).map_err(failed("logits"))?;

    candle_nn::ops::log_softmax(&last, 0)
        .and_then(|t| t.to_vec1::<f32>())
        .map_err(failed("log_softmax"))
}

fn detect_language(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    mel: &Tensor,
    sot: u32,
) -> Result<(String, f32), TranscriptionError> {
    let candidates: Vec<(&str, u32)> = CANDIDATE_LANGUAGES
        .iter()
        .filter_map(|code| {
            tokenizer
                .token_to_id(&format!("<|{}|>", code))
                .map(|id| (*code, id))
        })
        .collect();
    if candidates.is_empty() {
        return Err(TranscriptionError::TranscriptionFailed(
            "tokenizer has no language tokens".to_string(),
        ));
    }

    let audio_features = model.encoder.forward(mel, true).map_err(failed("encoder"))?;
    let device = audio_features.device().clone();
    let log_probs = next_token_log_probs(model, &device, &[sot], &audio_features)?;
    model.reset_kv_cache();

    let logits: Vec<f32> = candidates
        .iter()
        .map(|(_, id)| log_probs.get(*id as usize).copied().unwrap_or(f32::NEG_INFINITY))
        .collect();
    let probs = softmax(&logits);

    let (best, p) = probs
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, p)| (candidates[i].0, *p))
        .ok_or_else(|| TranscriptionError::TranscriptionFailed("language detection".to_string()))?;

    tracing::debug!(language = best, probability = p, "Detected spoken language");
    Ok((best.to_string(), p))
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn top_k(values: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut indexed: Vec<(u32, f32)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as u32, *v))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(k);
    indexed
}

fn failed(stage: &'static str) -> impl Fn(candle_core::Error) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{}: {}", stage, e))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
