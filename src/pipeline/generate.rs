use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

use crate::audio::duration::resolve_durations;
use crate::audio::media::{AudioToolkit, ConcatPart};
use crate::audio::normalize::normalize_volumes;
use crate::audio::segment::AudioSegment;
use crate::compose::assemble::{CaptionStyle, assemble_composition};
use crate::foundation::core::Canvas;
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::job::registry::{JobId, JobRegistry};
use crate::overlay::resolve::resolve_overlays;
use crate::pipeline::collab::{Captioner, SpeechSynthesizer, VideoRenderer};
use crate::script::parse::parse_dialogue_script;
use crate::timeline::build::{SPEAKER_GAP_SECS, build_timeline, required_duration};
use crate::video::edit::VideoEditor;
use crate::video::fit::{FitDecision, portrait_crop, resolve_video_fit};

/// Background container formats accepted for upload.
const ACCEPTED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];

/// One video generation request, fully specified up front.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    /// Raw `Speaker: Text` dialogue script.
    pub script: String,
    /// Voice id per speaker name.
    pub voices: HashMap<String, String>,
    /// Background video file.
    pub background_video: PathBuf,
    /// Loop the background when it is shorter than the audio.
    pub loop_if_short: bool,
    /// Dialogue image per segment index.
    pub image_assignments: BTreeMap<usize, PathBuf>,
    /// Avatar per speaker name.
    pub avatar_assignments: HashMap<String, PathBuf>,
    /// Caption styling.
    pub caption_style: CaptionStyle,
}

/// Orchestrates one generation job end to end.
///
/// Collaborators (synthesis, captioning, media toolchain, background editor,
/// renderer) are injected behind traits; every step inside a job is strictly
/// sequential, and distinct jobs namespace their temp artifacts by job id.
/// Speaker count is never special-cased: it is just the length of the speaker
/// list flowing into the timeline and overlay logic.
pub struct Pipeline {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    captioner: Arc<dyn Captioner>,
    audio: Arc<dyn AudioToolkit + Send + Sync>,
    editor: Arc<dyn VideoEditor + Send + Sync>,
    renderer: Arc<dyn VideoRenderer>,
    registry: JobRegistry,
    work_dir: PathBuf,
    output_dir: PathBuf,
    rng: Mutex<StdRng>,
}

impl Pipeline {
    /// Build a pipeline with an entropy-seeded RNG for trim offsets.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        captioner: Arc<dyn Captioner>,
        audio: Arc<dyn AudioToolkit + Send + Sync>,
        editor: Arc<dyn VideoEditor + Send + Sync>,
        renderer: Arc<dyn VideoRenderer>,
        registry: JobRegistry,
        work_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            captioner,
            audio,
            editor,
            renderer,
            registry,
            work_dir: work_dir.into(),
            output_dir: output_dir.into(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the trim-offset RNG with a seeded one (reproducible tests).
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// The registry this pipeline records job state into.
    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Run one job to completion, recording checkpoints and the final
    /// outcome in the registry. Any abort marks the job failed with a
    /// human-readable message; partial artifacts under the job's work dir
    /// are left for an external cleanup sweep.
    #[instrument(skip(self, request), fields(job = %job_id))]
    pub fn run_job(&self, job_id: &JobId, request: &GenerateRequest) -> StoryreelResult<PathBuf> {
        match self.run_job_inner(job_id, request) {
            Ok(output) => {
                self.registry.complete(job_id, output.clone());
                info!(output = %output.display(), "job completed");
                Ok(output)
            }
            Err(err) => {
                self.registry.fail(job_id, err.to_string());
                Err(err)
            }
        }
    }

    fn run_job_inner(
        &self,
        job_id: &JobId,
        request: &GenerateRequest,
    ) -> StoryreelResult<PathBuf> {
        // Input validation happens before any side effects.
        validate_background_extension(&request.background_video)?;
        let parsed = parse_dialogue_script(&request.script)?;

        // Temp artifacts are namespaced by job id so concurrent jobs never
        // collide.
        let job_dir = self.work_dir.join(job_id.as_str());
        std::fs::create_dir_all(&job_dir).map_err(|e| {
            StoryreelError::render(format!(
                "failed to create job work directory '{}': {e}",
                job_dir.display()
            ))
        })?;
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            StoryreelError::render(format!(
                "failed to create output directory '{}': {e}",
                self.output_dir.display()
            ))
        })?;

        info!(
            segments = parsed.segments.len(),
            speakers = parsed.speakers.len(),
            "starting generation job"
        );
        self.registry.checkpoint(job_id, 10, "synthesizing dialogue audio");

        // Synthesis. Per-segment failure degrades to missing audio; a batch
        // with no audio at all aborts.
        let mut segments = Vec::with_capacity(parsed.segments.len());
        for dialogue in &parsed.segments {
            let audio_path = match request.voices.get(&dialogue.speaker) {
                None => {
                    warn!(
                        speaker = %dialogue.speaker,
                        index = dialogue.index,
                        "no voice mapped for speaker, segment has no audio"
                    );
                    None
                }
                Some(voice) => {
                    let out = job_dir.join(format!("segment_{}.mp3", dialogue.index));
                    match self.synthesizer.synthesize(&dialogue.text, voice, &out) {
                        Ok(synth) => Some(synth.path),
                        Err(err) => {
                            warn!(index = dialogue.index, %err, "synthesis failed for segment");
                            None
                        }
                    }
                }
            };
            segments.push(AudioSegment::new(dialogue.clone(), audio_path));
        }
        if segments.iter().all(|s| s.audio_path.is_none()) {
            return Err(StoryreelError::collaborator(
                "speech synthesis produced no audio for any segment",
            ));
        }

        self.registry.checkpoint(job_id, 30, "normalizing segment loudness");
        normalize_volumes(&mut segments, self.audio.as_ref(), &job_dir);
        resolve_durations(&mut segments, self.audio.as_ref());

        self.registry.checkpoint(job_id, 40, "building timeline");
        let timeline = build_timeline(&segments);
        let required = required_duration(&timeline);

        // Concatenate the audio track exactly as the timeline describes:
        // speaker-change gaps become silence, and segments without audio
        // become silence of their resolved duration.
        let mut parts = Vec::<ConcatPart>::new();
        let mut previous_speaker: Option<&str> = None;
        for seg in &segments {
            if let Some(prev) = previous_speaker
                && prev != seg.dialogue.speaker
            {
                parts.push(ConcatPart::Silence(SPEAKER_GAP_SECS));
            }
            match seg.playback_path() {
                Some(path) => parts.push(ConcatPart::Audio(path.to_path_buf())),
                None => parts.push(ConcatPart::Silence(seg.duration_secs.unwrap_or(0.0))),
            }
            previous_speaker = Some(&seg.dialogue.speaker);
        }
        let audio_track = job_dir.join("dialogue.mp3");
        self.audio.concat_with_gaps(&parts, &audio_track)?;

        // The rendered output is trimmed to the real track length; the
        // timeline total is the fallback when the probe cannot help.
        let total_duration = match self.audio.audio_duration_secs(&audio_track) {
            Ok(d) => d,
            Err(err) => {
                warn!(%err, "audio track probe failed, using timeline total");
                required
            }
        };

        self.registry.checkpoint(job_id, 55, "resolving overlays");
        let overlays = resolve_overlays(
            &timeline,
            &request.image_assignments,
            &request.avatar_assignments,
            &parsed.speakers,
        );

        self.registry.checkpoint(job_id, 65, "generating captions");
        let captions = self
            .captioner
            .captions(&audio_track, &request.caption_style)?;

        self.registry.checkpoint(job_id, 75, "fitting background video");
        let (base_video, canvas) =
            self.fit_background(&request.background_video, total_duration, request.loop_if_short, &job_dir)?;

        self.registry.checkpoint(job_id, 90, "rendering");
        let spec = assemble_composition(
            base_video,
            audio_track,
            canvas,
            overlays,
            captions,
            request.caption_style.clone(),
            total_duration,
        );
        let output = self.output_dir.join(format!("reel_{}.mp4", job_id.as_str()));
        self.renderer.render(&spec, &output)
    }

    /// Duration-fit then aspect-fit the background. The loop branch retries
    /// the trim against the looped asset exactly once; a looping
    /// collaborator that still comes up short is a collaborator failure.
    fn fit_background(
        &self,
        background: &Path,
        required_secs: f64,
        loop_if_short: bool,
        job_dir: &Path,
    ) -> StoryreelResult<(PathBuf, Canvas)> {
        let mut source = self.editor.probe(background)?;

        let mut decision = {
            let mut rng = self.rng.lock().expect("pipeline rng poisoned");
            resolve_video_fit(source.duration_secs, required_secs, loop_if_short, &mut *rng)?
        };
        if let FitDecision::Loop { target_duration } = decision {
            info!(
                available = format!("{:.2}", source.duration_secs),
                target = format!("{target_duration:.2}"),
                "background too short, requesting looped asset"
            );
            let looped = job_dir.join("background_looped.mp4");
            source = self
                .editor
                .loop_to_duration(background, target_duration, &looped)?;
            let mut rng = self.rng.lock().expect("pipeline rng poisoned");
            decision = resolve_video_fit(source.duration_secs, required_secs, false, &mut *rng)
                .map_err(|_| {
                    StoryreelError::collaborator(
                        "looped background is still shorter than the required duration",
                    )
                })?;
        }
        let FitDecision::Trim { start, end } = decision else {
            unreachable!("loop decisions are resolved above");
        };

        let cut = job_dir.join("background_cut.mp4");
        self.editor.cut(&source.source_path, start, end, &cut)?;

        // Aspect fit is independent of timing and always applied.
        let rect = portrait_crop(source.width, source.height)?;
        let cropped = job_dir.join("background_portrait.mp4");
        self.editor.crop(&cut, rect, &cropped)?;
        Ok((
            cropped,
            Canvas {
                width: rect.width,
                height: rect.height,
            },
        ))
    }
}

fn validate_background_extension(path: &Path) -> StoryreelResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some(ext) if ACCEPTED_VIDEO_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(StoryreelError::input(format!(
            "unsupported background video format '{}': use MP4, MOV, AVI, or MKV",
            path.display()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/generate.rs"]
mod tests;
