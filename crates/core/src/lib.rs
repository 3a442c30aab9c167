//! QuizReel Core Library
//!
//! Turns a course's stored exam questions into a narration script and a
//! time-stamped caption track for a short-form video.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod resolver;
pub mod store;
pub mod template;
pub mod timeline;
pub mod types;

// Re-export commonly used items at crate root
pub use config::Settings;
pub use error::{QuizReelError, Result};
pub use format::{format_captions_with_timestamps, format_timestamp, format_video_readable};
pub use pipeline::{PLACEHOLDER_EXAM_NAME, VideoPipeline};
pub use prompt::{ComposedPrompt, CountdownCues, compose, compose_prompt, exam_abbreviation};
pub use provider::{NO_SCRIPT_SENTINEL, Provider, ProviderConfig, ProviderGenerator, ScriptGenerator};
pub use resolver::resolve_questions;
pub use store::{Filter, PostgrestStore, Query, RecordStore};
pub use template::{FixedTemplatePicker, RandomTemplatePicker, TemplatePicker, TemplateSuggestion};
pub use timeline::{CaptionSegment, HighlightEffect, Timeline, TimelineBuilder, build_timeline};
pub use types::{Course, Exam, Question, RecordId, VideoData};
