use crate::{
    catalog,
    error::{QuizReelError, Result},
    prompt,
    provider::ScriptGenerator,
    resolver,
    store::RecordStore,
    template::{RandomTemplatePicker, TemplatePicker},
    timeline::TimelineBuilder,
    types::{RecordId, VideoData},
};

/// Used when the exam id has no record. This keeps the run going with a
/// generic name instead of reporting not-found; revisit if exams become
/// mandatory.
pub const PLACEHOLDER_EXAM_NAME: &str = "Selected Exam";

pub struct VideoPipeline<S, G, T = RandomTemplatePicker> {
    store: S,
    generator: G,
    picker: T,
    tts_api_key: Option<String>,
}

impl<S, G> VideoPipeline<S, G, RandomTemplatePicker>
where
    S: RecordStore,
    G: ScriptGenerator,
{
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            generator,
            picker: RandomTemplatePicker,
            tts_api_key: None,
        }
    }
}

impl<S, G, T> VideoPipeline<S, G, T>
where
    S: RecordStore,
    G: ScriptGenerator,
    T: TemplatePicker,
{
    pub fn with_template_picker<P: TemplatePicker>(self, picker: P) -> VideoPipeline<S, G, P> {
        VideoPipeline {
            store: self.store,
            generator: self.generator,
            picker,
            tts_api_key: self.tts_api_key,
        }
    }

    /// Passed through untouched to the payload for the downstream voice renderer.
    pub fn with_tts_api_key(mut self, key: Option<String>) -> Self {
        self.tts_api_key = key;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Resolve questions, compose the prompt, generate the script and time its
    /// captions. Any failure aborts the run with no partial payload.
    pub async fn run(&self, course_id: &RecordId, exam_id: &RecordId) -> Result<VideoData> {
        let exam_name = match catalog::exam_name(&self.store, exam_id).await? {
            Some(name) => name,
            None => {
                tracing::warn!(%exam_id, "exam not found, using placeholder name");
                PLACEHOLDER_EXAM_NAME.to_string()
            }
        };

        let questions = resolver::resolve_questions(&self.store, course_id).await?;
        if questions.is_empty() {
            return Err(QuizReelError::NoQuestions {
                course_id: course_id.to_string(),
            });
        }

        let composed = prompt::compose(&questions, &exam_name);
        let script = self.generator.generate(&composed.text).await?;
        tracing::info!(words = script.split_whitespace().count(), "script generated");

        let timeline = TimelineBuilder::new(&composed.cues).build(&script, &questions);
        tracing::info!(
            captions = timeline.captions.len(),
            duration = timeline.total_duration,
            "caption timeline built"
        );

        Ok(VideoData {
            voice_over_text: script.clone(),
            script,
            captions: timeline.captions,
            template_suggestion: self.picker.pick(),
            total_conceptual_duration: timeline.total_duration,
            tts_api_key: self.tts_api_key.clone(),
            exam_name,
            question_count: questions.len(),
        })
    }
}
