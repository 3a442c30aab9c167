use crate::error::{QuizReelError, Result};

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const TTS_API_KEY_VAR: &str = "TTS_API_KEY";

/// Process settings. Values are read as-is; requirements are checked by the
/// component that needs them, so a missing store key does not block commands
/// that never touch the store.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub tts_api_key: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            supabase_url: read_var(SUPABASE_URL_VAR),
            supabase_anon_key: read_var(SUPABASE_ANON_KEY_VAR),
            tts_api_key: read_var(TTS_API_KEY_VAR),
        }
    }

    pub fn require_supabase_url(&self) -> Result<&str> {
        require(&self.supabase_url, SUPABASE_URL_VAR)
    }

    pub fn require_supabase_anon_key(&self) -> Result<&str> {
        require(&self.supabase_anon_key, SUPABASE_ANON_KEY_VAR)
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn require<'a>(value: &'a Option<String>, env_var: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| QuizReelError::MissingConfig {
            env_var: env_var.to_string(),
        })
}
