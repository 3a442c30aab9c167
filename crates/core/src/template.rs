use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSuggestion {
    #[default]
    #[serde(rename = "Dynamic Math Explainer - Clean & Modern")]
    DynamicMathExplainer,
    #[serde(rename = "Animated Chalkboard Style - Engaging & Educational")]
    AnimatedChalkboard,
    #[serde(rename = "Minimalist Whiteboard Reveal - Focus on Content")]
    MinimalistWhiteboard,
    #[serde(rename = "Sci-Fi Data Overlay - Futuristic Learning")]
    SciFiDataOverlay,
    #[serde(rename = "Vibrant Gradient Flow - Energetic & Youthful")]
    VibrantGradientFlow,
}

impl TemplateSuggestion {
    pub const ALL: [TemplateSuggestion; 5] = [
        TemplateSuggestion::DynamicMathExplainer,
        TemplateSuggestion::AnimatedChalkboard,
        TemplateSuggestion::MinimalistWhiteboard,
        TemplateSuggestion::SciFiDataOverlay,
        TemplateSuggestion::VibrantGradientFlow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TemplateSuggestion::DynamicMathExplainer => "Dynamic Math Explainer - Clean & Modern",
            TemplateSuggestion::AnimatedChalkboard => {
                "Animated Chalkboard Style - Engaging & Educational"
            }
            TemplateSuggestion::MinimalistWhiteboard => {
                "Minimalist Whiteboard Reveal - Focus on Content"
            }
            TemplateSuggestion::SciFiDataOverlay => "Sci-Fi Data Overlay - Futuristic Learning",
            TemplateSuggestion::VibrantGradientFlow => {
                "Vibrant Gradient Flow - Energetic & Youthful"
            }
        }
    }
}

pub trait TemplatePicker: Send + Sync {
    fn pick(&self) -> TemplateSuggestion;
}

/// Uniform choice over [`TemplateSuggestion::ALL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTemplatePicker;

impl TemplatePicker for RandomTemplatePicker {
    fn pick(&self) -> TemplateSuggestion {
        TemplateSuggestion::ALL
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedTemplatePicker(pub TemplateSuggestion);

impl TemplatePicker for FixedTemplatePicker {
    fn pick(&self) -> TemplateSuggestion {
        self.0
    }
}
