//! Application-level configuration constants.

// Assets
pub const MEDIA_MAP_URL: &str = "/data/media.json";
pub const EXPIRY_CUE_URL: &str = "/sounds/timer-over.wav";

// Default clock duration
pub const DEFAULT_MINUTES: u32 = 5;
pub const DEFAULT_SECONDS: u32 = 0;

// UI behavior
pub const SCORE_ANIMATION_MS: u32 = 600;
pub const DANGER_THRESHOLD_SECS: u32 = 10;

// Speech synthesis parameters
pub const SPEECH_RATE: f32 = 0.5;
pub const SPEECH_PITCH: f32 = 1.2;
pub const SPEECH_VOLUME: f32 = 1.0;
