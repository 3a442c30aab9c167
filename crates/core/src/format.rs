use crate::{
    timeline::{CaptionSegment, HighlightEffect},
    types::VideoData,
};

/// Format seconds as MM:SS.ss timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let hundredths = (seconds.max(0.0) * 100.0).round() as u64;
    let mins = hundredths / 6000;
    let secs = (hundredths % 6000) as f64 / 100.0;
    format!("{:02}:{:05.2}", mins, secs)
}

fn effect_tag(effect: HighlightEffect) -> &'static str {
    match effect {
        HighlightEffect::BoldYellow => "",
        HighlightEffect::Countdown => " [countdown]",
        HighlightEffect::SolutionDisplay => " [solutions]",
    }
}

/// Format caption segments with their time ranges
pub fn format_captions_with_timestamps(captions: &[CaptionSegment]) -> String {
    captions
        .iter()
        .map(|seg| {
            format!(
                "[{}–{}]{} {}",
                format_timestamp(seg.start_time),
                format_timestamp(seg.end_time),
                effect_tag(seg.highlight_effect),
                seg.text.replace('\n', " | ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_video_readable(video: &VideoData) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", video.exam_name));
    output.push_str(&format!(
        "**Duration:** {:.1}s | **Questions:** {} | **Template:** {}\n\n",
        video.total_conceptual_duration,
        video.question_count,
        video.template_suggestion.label()
    ));

    output.push_str("## Voice-over\n\n");
    output.push_str(&video.voice_over_text);
    output.push_str("\n\n");

    output.push_str("## Captions\n\n");
    output.push_str(&format_captions_with_timestamps(&video.captions));
    output.push('\n');

    output
}
