// Playfield (pixels, origin top-left)
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Minimum distance kept between a gap and the top/bottom edge.
pub const GAP_MARGIN_TOP: f32 = 20.0;
pub const GAP_MARGIN_BOTTOM: f32 = 20.0;

pub const PIPE_WIDTH: f32 = 52.0;

// Obstacle pool
pub const PIPES_TO_RENDER: usize = 4;
pub const PIPE_SCROLL_VELOCITY: f32 = -200.0;
pub const POOL_START_X: f32 = 0.0;

// Bird
pub const FLAP_VELOCITY: f32 = 300.0;

// Countdowns (seconds)
pub const RESUME_COUNTDOWN_SECS: f32 = 3.0;
pub const GAME_OVER_COUNTDOWN_SECS: f32 = 3.0;

// Difficulty table: (threshold, vertical gap range, horizontal spacing range)
pub const EASY_THRESHOLD: u32 = 0;
pub const EASY_VERTICAL_GAP: [u32; 2] = [150, 200];
pub const EASY_HORIZONTAL_SPACING: [u32; 2] = [300, 350];

pub const NORMAL_THRESHOLD: u32 = 30;
pub const NORMAL_VERTICAL_GAP: [u32; 2] = [140, 190];
pub const NORMAL_HORIZONTAL_SPACING: [u32; 2] = [280, 330];

pub const HARD_THRESHOLD: u32 = 60;
pub const HARD_VERTICAL_GAP: [u32; 2] = [120, 170];
pub const HARD_HORIZONTAL_SPACING: [u32; 2] = [250, 310];

// Persistence
pub const BEST_SCORE_KEY: &str = "bestScore";
pub const STORAGE_DIR_NAME: &str = ".skyward";
pub const STORAGE_FILE_NAME: &str = "storage.json";
