use super::audio_decoder::TARGET_SAMPLE_RATE;

/// 30ms analysis frames at 16kHz.
const FRAME_SAMPLES: usize = (TARGET_SAMPLE_RATE as usize * 30) / 1000;
/// Frames kept on either side of speech so word onsets survive.
const PADDING_FRAMES: usize = 10;
const DEFAULT_RMS_THRESHOLD: f32 = 0.01;

/// Energy-based voice activity filter.
#[derive(Debug, Clone, Copy)]
pub struct VoiceActivityFilter {
    threshold: f32,
}

impl Default for VoiceActivityFilter {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RMS_THRESHOLD,
        }
    }
}

impl VoiceActivityFilter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Drops silent stretches; returns an empty buffer when nothing is voiced.
    pub fn retain_speech(&self, pcm: &[f32]) -> Vec<f32> {
        let frames: Vec<&[f32]> = pcm.chunks(FRAME_SAMPLES).collect();
        let voiced: Vec<bool> = frames.iter().map(|f| rms(f) >= self.threshold).collect();

        let mut keep = vec![false; frames.len()];
        for (i, _) in voiced.iter().enumerate().filter(|(_, v)| **v) {
            let start = i.saturating_sub(PADDING_FRAMES);
            let end = (i + PADDING_FRAMES + 1).min(frames.len());
            keep[start..end].iter_mut().for_each(|k| *k = true);
        }

        frames
            .iter()
            .zip(keep)
            .filter(|(_, k)| *k)
            .flat_map(|(f, _)| f.iter().copied())
            .collect()
    }
}

fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    (frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32).sqrt()
}
