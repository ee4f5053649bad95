//! Microphone capture for the candle scene: getUserMedia + AnalyserNode.
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, MediaStream, MediaStreamAudioSourceNode, MediaStreamTrack};

use crate::state::candle::{EnergySource, low_band_level};

const FFT_SIZE: u32 = 256;

#[derive(Debug, Error)]
pub enum MicError {
    #[error("this browser cannot record audio")]
    Unsupported,
    #[error("microphone permission denied ({0})")]
    PermissionDenied(String),
    #[error("microphone unavailable ({0})")]
    Unavailable(String),
    #[error("audio analysis failed ({0})")]
    AudioGraph(String),
}

impl MicError {
    /// Short text for the scene's status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            MicError::Unsupported => "Your browser can't listen. Use the button instead.",
            MicError::PermissionDenied(_) => "Microphone blocked. Use the button, or allow it and try again.",
            MicError::Unavailable(_) | MicError::AudioGraph(_) => {
                "Couldn't start the microphone. Use the button or try again."
            }
        }
    }
}

fn error_name(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn classify(err: &JsValue) -> MicError {
    let name = error_name(err);
    match name.as_str() {
        "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
            MicError::PermissionDenied(name)
        }
        _ => MicError::Unavailable(name),
    }
}

fn graph_err(err: JsValue) -> MicError {
    MicError::AudioGraph(error_name(&err))
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

pub struct MicCapture {
    stream: MediaStream,
    context: AudioContext,
    source: MediaStreamAudioSourceNode,
    analyser: AnalyserNode,
    bins: Vec<u8>,
    low_band_fraction: f32,
}

impl MicCapture {
    /// Prompts for the microphone and wires it into an analyser.
    pub async fn acquire(low_band_fraction: f32) -> Result<Self, MicError> {
        let window = web_sys::window().ok_or(MicError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| MicError::Unsupported)?;
        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| classify(&e))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| classify(&e))?
            .dyn_into()
            .map_err(graph_err)?;

        match Self::wire(&stream) {
            Ok((context, source, analyser)) => {
                let bins = vec![0; analyser.frequency_bin_count() as usize];
                log::info!("microphone listening ({} bins)", bins.len());
                Ok(Self { stream, context, source, analyser, bins, low_band_fraction })
            }
            Err(err) => {
                stop_tracks(&stream);
                Err(err)
            }
        }
    }

    fn wire(
        stream: &MediaStream,
    ) -> Result<(AudioContext, MediaStreamAudioSourceNode, AnalyserNode), MicError> {
        let context = AudioContext::new().map_err(graph_err)?;
        let built = (|| {
            let source = context.create_media_stream_source(stream)?;
            let analyser = context.create_analyser()?;
            analyser.set_fft_size(FFT_SIZE);
            analyser.set_smoothing_time_constant(0.3);
            source.connect_with_audio_node(&analyser)?;
            Ok::<_, JsValue>((source, analyser))
        })();
        match built {
            Ok((source, analyser)) => Ok((context, source, analyser)),
            Err(err) => {
                let _ = context.close();
                Err(graph_err(err))
            }
        }
    }
}

impl EnergySource for MicCapture {
    fn low_band_energy(&mut self) -> f32 {
        self.analyser.get_byte_frequency_data(&mut self.bins);
        low_band_level(&self.bins, self.low_band_fraction)
    }

    fn release(self) {
        let _ = self.source.disconnect();
        stop_tracks(&self.stream);
        let _ = self.context.close();
        log::info!("microphone released");
    }
}
