//! Caption timeline for the narration script.
//!
//! Durations are estimated from word counts; nothing here listens to audio.
//! Segments are emitted back to back on a single running clock, so every
//! segment ends exactly where the next one starts.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    prompt::CountdownCues,
    types::Question,
};

pub const SECONDS_PER_WORD: f64 = 0.25;
pub const MIN_SENTENCE_SECONDS: f64 = 1.5;
pub const COUNTDOWN_SECONDS: f64 = 5.0;
pub const SOLUTION_SECONDS: f64 = 5.0;

const COUNTDOWN_TEXT: &str = "5-second countdown...";

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightEffect {
    BoldYellow,
    Countdown,
    SolutionDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub highlight_effect: HighlightEffect,
}

impl CaptionSegment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub captions: Vec<CaptionSegment>,
    pub total_duration: f64,
}

/// Split after `.`, `!` or `?` followed by whitespace; blank fragments are dropped.
pub fn split_sentences(script: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(script) {
        // punctuation is one byte, so this stays on a char boundary
        sentences.push(&script[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&script[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// `max(1.5, words * 0.25)` seconds.
pub fn estimate_duration(sentence: &str) -> f64 {
    let words = sentence.split_whitespace().count() as f64;
    (words * SECONDS_PER_WORD).max(MIN_SENTENCE_SECONDS)
}

/// Newline-joined `Q{i}: {solution}` for every question, in list order.
pub fn solution_text(questions: &[Question]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("Q{}: {}", i + 1, q.solution))
        .collect::<Vec<_>>()
        .join("\n")
}

struct Clock {
    now: f64,
    captions: Vec<CaptionSegment>,
}

impl Clock {
    fn push(&mut self, text: String, duration: f64, highlight_effect: HighlightEffect) {
        let end_time = self.now + duration;
        self.captions.push(CaptionSegment {
            text,
            start_time: self.now,
            end_time,
            highlight_effect,
        });
        self.now = end_time;
    }
}

pub struct TimelineBuilder<'a> {
    cues: &'a CountdownCues,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(cues: &'a CountdownCues) -> Self {
        Self { cues }
    }

    /// Lay out `script` as captions, add countdowns after each question block,
    /// and close with the solution card for `questions`.
    pub fn build(&self, script: &str, questions: &[Question]) -> Timeline {
        let mut clock = Clock {
            now: 0.0,
            captions: Vec::new(),
        };
        let mut next_question = 1;
        let mut open_question: Option<usize> = None;

        for sentence in split_sentences(script) {
            if let Some(number) = self.cues.find_marker(sentence, next_question) {
                open_question = Some(number);
            }

            clock.push(
                sentence.to_string(),
                estimate_duration(sentence),
                HighlightEffect::BoldYellow,
            );

            if let Some(number) = open_question {
                if sentence.contains(self.cues.phrase()) {
                    clock.push(
                        COUNTDOWN_TEXT.to_string(),
                        COUNTDOWN_SECONDS,
                        HighlightEffect::Countdown,
                    );
                    next_question = number + 1;
                    open_question = None;
                }
            }
        }

        clock.push(
            solution_text(questions),
            SOLUTION_SECONDS,
            HighlightEffect::SolutionDisplay,
        );

        Timeline {
            total_duration: clock.now,
            captions: clock.captions,
        }
    }
}

/// [`TimelineBuilder`] with cues for `questions.len()` questions.
pub fn build_timeline(script: &str, questions: &[Question]) -> Timeline {
    let cues = CountdownCues::for_questions(questions.len());
    TimelineBuilder::new(&cues).build(script, questions)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::RecordId;

    fn question(solution: &str) -> Question {
        Question {
            id: RecordId::from("1"),
            statement: "solve x".to_string(),
            options: None,
            solution: solution.to_string(),
            topic_id: RecordId::from("9"),
        }
    }

    #[test]
    fn splits_on_terminal_punctuation_followed_by_whitespace() {
        assert_eq!(
            split_sentences("Hello there! Ready?  Let's go. Value is 3.14 today."),
            vec!["Hello there!", "Ready?", "Let's go.", "Value is 3.14 today."]
        );
    }

    #[test]
    fn blank_fragments_are_discarded() {
        assert!(split_sentences("   \n ").is_empty());
        assert_eq!(split_sentences("  One.\n\nTwo  "), vec!["One.", "Two"]);
    }

    #[test]
    fn duration_has_floor() {
        assert_eq!(estimate_duration(""), MIN_SENTENCE_SECONDS);
        assert_eq!(estimate_duration("one two three"), MIN_SENTENCE_SECONDS);
        assert_eq!(estimate_duration("a b c d e f g h"), 2.0);
    }

    #[test]
    fn countdown_follows_question_block_across_sentences() {
        let script = "Question 1: solve x. Options a:1,b:2. You'll have a 5-second countdown to think about it.";
        let timeline = build_timeline(script, &[question("x=1")]);
        let effects: Vec<_> = timeline
            .captions
            .iter()
            .map(|c| c.highlight_effect)
            .collect();

        assert_eq!(
            effects,
            vec![
                HighlightEffect::BoldYellow,
                HighlightEffect::BoldYellow,
                HighlightEffect::BoldYellow,
                HighlightEffect::Countdown,
                HighlightEffect::SolutionDisplay,
            ]
        );

        let countdown = &timeline.captions[3];
        assert_eq!(countdown.text, "5-second countdown...");
        assert_eq!(countdown.duration(), COUNTDOWN_SECONDS);

        let solution = timeline.captions.last().unwrap();
        assert_eq!(solution.text, "Q1: x=1");
        assert_eq!(solution.duration(), SOLUTION_SECONDS);
        assert_eq!(timeline.total_duration, solution.end_time);
        // 1.5 + 1.5 + 2.25 + 5 + 5
        assert_eq!(timeline.total_duration, 15.25);
    }

    #[test]
    fn marker_and_phrase_in_one_sentence_trigger_once() {
        let script = "Hi all! Question 1: what is 2+2, you'll have a 5-second countdown now. \
                      Question 2: what is 3+3, you'll have a 5-second countdown now. Bye!";
        let timeline = build_timeline(script, &[question("4"), question("6")]);
        let countdowns = timeline
            .captions
            .iter()
            .filter(|c| c.highlight_effect == HighlightEffect::Countdown)
            .count();

        assert_eq!(countdowns, 2);
        assert_eq!(timeline.captions.len(), 4 + 2 + 1);
        assert_eq!(timeline.captions.last().unwrap().text, "Q1: 4\nQ2: 6");
    }

    #[test]
    fn phrase_without_open_question_adds_no_countdown() {
        let script = "Each question gets a 5-second countdown. Question 2: skip ahead.";
        let timeline = build_timeline(script, &[question("a")]);
        assert!(
            timeline
                .captions
                .iter()
                .all(|c| c.highlight_effect != HighlightEffect::Countdown)
        );
    }

    #[test]
    fn question_block_counts_only_once() {
        let script = "Question 1: go. A 5-second countdown starts. Another 5-second countdown mention.";
        let timeline = build_timeline(script, &[question("a")]);
        let countdowns = timeline
            .captions
            .iter()
            .filter(|c| c.highlight_effect == HighlightEffect::Countdown)
            .count();
        assert_eq!(countdowns, 1);
    }

    #[test]
    fn open_question_counts_down_at_later_outro_mention() {
        let script = "Question 1: what is 2+2? Think carefully. Options are listed above. \
                      Thanks for watching, and remember the 5-second countdown is your friend!";
        let timeline = build_timeline(script, &[question("4")]);

        assert_eq!(timeline.captions.len(), 4 + 1 + 1);
        assert_eq!(timeline.captions[3].highlight_effect, HighlightEffect::BoldYellow);
        assert!(timeline.captions[3].text.starts_with("Thanks for watching"));
        assert_eq!(timeline.captions[4].highlight_effect, HighlightEffect::Countdown);
        assert_eq!(timeline.captions[5].highlight_effect, HighlightEffect::SolutionDisplay);
    }

    #[test]
    fn skipped_question_number_still_counts_down() {
        let script = "Question 2: second one. Take a 5-second countdown.";
        let timeline = build_timeline(script, &[question("a"), question("b")]);
        assert_eq!(timeline.captions[2].highlight_effect, HighlightEffect::Countdown);
    }

    #[test]
    fn solution_segment_lists_every_question_even_if_unscripted() {
        let timeline = build_timeline("Only an intro.", &[question("a"), question("b"), question("c")]);
        assert_eq!(timeline.captions.len(), 2);
        assert_eq!(timeline.captions[1].text, "Q1: a\nQ2: b\nQ3: c");
    }

    #[test]
    fn empty_script_still_shows_solutions() {
        let timeline = build_timeline("", &[question("x=1")]);
        assert_eq!(timeline.captions.len(), 1);
        assert_eq!(timeline.captions[0].start_time, 0.0);
        assert_eq!(timeline.total_duration, SOLUTION_SECONDS);
    }

    #[test]
    fn highlight_effects_serialize_as_tags() {
        assert_eq!(
            serde_json::to_value(HighlightEffect::SolutionDisplay).unwrap(),
            "SOLUTION_DISPLAY"
        );
        assert_eq!(serde_json::to_value(HighlightEffect::BoldYellow).unwrap(), "BOLD_YELLOW");
    }

    fn script_strategy() -> impl Strategy<Value = String> {
        let sentence = prop_oneof![
            "[a-z]{1,8}( [a-z]{1,8}){0,12}[.!?]",
            (1usize..4).prop_map(|n| format!("Question {}: pick one.", n)),
            Just("You'll have a 5-second countdown to think about it.".to_string()),
        ];
        prop::collection::vec(sentence, 0..12).prop_map(|s| s.join(" "))
    }

    proptest! {
        #[test]
        fn segments_are_contiguous_and_counted(script in script_strategy(), n in 1usize..4) {
            let questions: Vec<_> = (0..n).map(|i| question(&i.to_string())).collect();
            let timeline = build_timeline(&script, &questions);

            let sentences = split_sentences(&script).len();
            let countdowns = timeline
                .captions
                .iter()
                .filter(|c| c.highlight_effect == HighlightEffect::Countdown)
                .count();
            prop_assert_eq!(timeline.captions.len(), sentences + countdowns + 1);
            prop_assert!(countdowns <= n);

            prop_assert_eq!(timeline.captions[0].start_time, 0.0);
            for pair in timeline.captions.windows(2) {
                prop_assert_eq!(pair[0].end_time, pair[1].start_time);
            }
            for c in &timeline.captions {
                prop_assert!(c.end_time >= c.start_time);
            }

            let last = timeline.captions.last().unwrap();
            prop_assert_eq!(last.highlight_effect, HighlightEffect::SolutionDisplay);
            prop_assert_eq!(timeline.total_duration, last.end_time);
            prop_assert!(timeline.total_duration >= SOLUTION_SECONDS + countdowns as f64 * COUNTDOWN_SECONDS);
        }

        #[test]
        fn duration_is_monotonic_in_word_count(a in 0usize..200, b in 0usize..200) {
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            let short = vec!["w"; short].join(" ");
            let long = vec!["w"; long].join(" ");
            prop_assert!(estimate_duration(&short) <= estimate_duration(&long));
            prop_assert!(estimate_duration(&short) >= MIN_SENTENCE_SECONDS);
        }
    }
}
