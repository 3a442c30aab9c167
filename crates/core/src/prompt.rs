//! Narration prompt for the script generator.
//!
//! The prompt is where the countdown wording originates, so this module also
//! hands the caption timeline the exact markers it asked the generator to use
//! ([`CountdownCues`]).

use crate::types::Question;

/// Phrase every question block must carry for a countdown to be inserted.
pub const COUNTDOWN_PHRASE: &str = "5-second countdown";

const FALLBACK_ABBREVIATION: &str = "EXAM";

/// `"Question {n}:"`, 1-based.
pub fn question_marker(number: usize) -> String {
    format!("Question {}:", number)
}

/// Markers the composed prompt asked for, in question order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownCues {
    markers: Vec<String>,
}

impl CountdownCues {
    pub fn for_questions(count: usize) -> Self {
        Self {
            markers: (1..=count).map(question_marker).collect(),
        }
    }

    pub fn phrase(&self) -> &'static str {
        COUNTDOWN_PHRASE
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// First 1-based question number `>= from` whose marker occurs in `text`.
    pub fn find_marker(&self, text: &str, from: usize) -> Option<usize> {
        self.markers
            .iter()
            .enumerate()
            .skip(from.saturating_sub(1))
            .find(|(_, marker)| text.contains(marker.as_str()))
            .map(|(index, _)| index + 1)
    }
}

#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    pub text: String,
    pub cues: CountdownCues,
}

/// Uppercased first alphanumeric character of each word, or `EXAM`.
pub fn exam_abbreviation(exam_name: &str) -> String {
    let initials: String = exam_name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        FALLBACK_ABBREVIATION.to_string()
    } else {
        initials
    }
}

fn question_block(number: usize, question: &Question) -> String {
    let options = question.option_pairs();
    let options_line = if options.is_empty() {
        String::new()
    } else {
        format!("Here are your options: {}.", options.join(", "))
    };

    format!(
        "{} So, the question says: {}. {} You'll have a {} to think about it.",
        question_marker(number),
        question.statement,
        options_line,
        COUNTDOWN_PHRASE
    )
}

pub fn compose(questions: &[Question], exam_name: &str) -> ComposedPrompt {
    let abbreviation = exam_abbreviation(exam_name);

    let intro = format!(
        "Hello everyone! Today, we're going to solve some challenging questions for the upcoming {} entrance exam. Let's dive in!",
        exam_name
    );
    let call_to_action = format!(
        "The answer and solution will appear in the last 5 seconds of this video. Till then, if you're looking for a complete guide for {}, follow and comment '{}' and it will be in your DMs!",
        exam_name, abbreviation
    );

    let blocks = questions
        .iter()
        .enumerate()
        .map(|(i, q)| question_block(i + 1, q))
        .collect::<Vec<_>>()
        .join(" ");

    let text = format!(
        r#"You are an AI video script generator for educational content, specifically for Instagram Reels explaining mathematical problems. Your task is to create a concise, engaging, and clear script for a voice-over. Ensure mathematical symbols like '$x^2$', '$\int$', '$\sum$' are spoken clearly and naturally (e.g., 'x squared', 'integral', 'summation'). The script should flow naturally for a voice-over and adhere to the following structure:

1. Introduction: Start with an engaging intro similar to: '{intro}'
2. For each question:
   - Announce the question number exactly as "Question N:".
   - Read the question statement clearly, pronouncing mathematical symbols. For example, 'x squared' for '$x^2$'.
   - If options are present, read them out.
   - Include the exact phrase "{phrase}" so the viewer knows to pause and think.
3. Conclusion/Call to Action: End with a call to action similar to: '{call_to_action}'

Here are the questions (the solutions are background context for you only; never speak or reveal them in the script):

{blocks}

Make sure the tone is encouraging and educational. Keep the overall script concise for an Instagram Reel, ideally under 300 words."#,
        intro = intro,
        phrase = COUNTDOWN_PHRASE,
        call_to_action = call_to_action,
        blocks = blocks,
    );

    ComposedPrompt {
        text,
        cues: CountdownCues::for_questions(questions.len()),
    }
}

/// Render `questions` and `exam_name` into the generator instruction. Pure.
pub fn compose_prompt(questions: &[Question], exam_name: &str) -> String {
    compose(questions, exam_name).text
}
