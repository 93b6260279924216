use std::fs::File;
use std::path::Path;

use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionError;

/// Whisper's input rate.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

const RESAMPLE_CHUNK: usize = 1024;

fn failed(stage: &str, e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::DecodingFailed(format!("{}: {}", stage, e))
}

/// Decodes an uploaded recording to 16kHz mono PCM.
///
/// The file extension is only a probing hint; the container is sniffed.
pub fn decode_file_to_pcm(path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let file = File::open(path).map_err(|e| failed("open", e))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| failed("probe", e))?;
    let mut reader = probed.format;

    let track = reader
        .default_track()
        .ok_or_else(|| TranscriptionError::DecodingFailed("no audio track".to_string()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();
    let source_rate = params
        .sample_rate
        .ok_or_else(|| TranscriptionError::DecodingFailed("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| failed("codec", e))?;

    let mono = read_mono(reader.as_mut(), decoder.as_mut(), track_id)?;
    if mono.is_empty() {
        return Err(TranscriptionError::DecodingFailed(
            "recording contains no samples".to_string(),
        ));
    }

    let pcm = if source_rate == TARGET_SAMPLE_RATE {
        mono
    } else {
        resample_to_target(&mono, source_rate)?
    };

    tracing::debug!(
        source_rate,
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Recording decoded"
    );

    Ok(pcm)
}

/// Reads every packet of one track, downmixing to mono.
fn read_mono(
    reader: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
    track_id: u32,
) -> Result<Vec<f32>, TranscriptionError> {
    let mut mono = Vec::new();
    let mut buffer: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(failed("packet", e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt frame");
                continue;
            }
            Err(e) => return Err(failed("decode", e)),
        };
        if decoded.frames() == 0 {
            continue;
        }

        let spec = *decoded.spec();
        let channels = spec.channels.count().max(1);
        let frames = decoded.capacity();
        if buffer.as_ref().is_none_or(|b| b.capacity() < frames * channels) {
            buffer = Some(SampleBuffer::new(frames as u64, spec));
        }
        let Some(buf) = buffer.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(decoded);
        downmix_into(buf.samples(), channels, &mut mono);
    }

    Ok(mono)
}

fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels == 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    let scale = 1.0 / channels as f32;
    out.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() * scale),
    );
}

fn resample_to_target(mono: &[f32], source_rate: u32) -> Result<Vec<f32>, TranscriptionError> {
    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        RESAMPLE_CHUNK,
        2,
        1,
    )
    .map_err(|e| failed("resampler", e))?;

    let expected = (mono.len() as u64 * TARGET_SAMPLE_RATE as u64 / source_rate as u64) as usize;
    let delay = resampler.output_delay();
    let mut out = Vec::with_capacity(expected + delay + RESAMPLE_CHUNK);

    let mut chunks = mono.chunks_exact(RESAMPLE_CHUNK);
    for chunk in chunks.by_ref() {
        let frames = resampler
            .process(&[chunk], None)
            .map_err(|e| failed("resample", e))?;
        out.extend_from_slice(&frames[0]);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let frames = resampler
            .process_partial(Some(&[tail][..]), None)
            .map_err(|e| failed("resample", e))?;
        out.extend_from_slice(&frames[0]);
    }

    // Drain what the filter still holds so the skipped delay is made up.
    while out.len() < expected + delay {
        let frames = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| failed("resample", e))?;
        if frames[0].is_empty() {
            break;
        }
        out.extend_from_slice(&frames[0]);
    }

    Ok(out.into_iter().skip(delay).take(expected).collect())
}
