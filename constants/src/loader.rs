/// Length of the loading animation in seconds.
pub const LOAD_DURATION_SECS: f32 = 3.5;

/// Pause between reaching full progress and signalling completion.
pub const COMPLETION_DELAY_SECS: f32 = 0.3;

/// Progress boundaries between the three overlay phase labels.
pub const PHASE_UNFOLDING_PERCENT: u32 = 30;
pub const PHASE_LAUNCHING_PROGRESS: f32 = 0.7;

/// Progress at which the shells start flying apart.
pub const PARTICLE_EXPLOSION_START: f32 = 0.6;
/// Radial distance reached by every particle at full progress.
pub const PARTICLE_EXPLOSION_DISTANCE: f32 = 15.0;

pub const PARTICLE_SHELL_COUNT: usize = 3;
pub const PARTICLES_PER_SHELL: usize = 1000;
pub const PARTICLE_BASE_RADIUS: f32 = 3.0;
pub const PARTICLE_OPACITY: f32 = 0.6;

/// Per-frame shell spin, multiplied by `shell index + 1`.
pub const SHELL_SPIN_Y_PER_FRAME: f32 = 0.001;
pub const SHELL_SPIN_X_PER_FRAME: f32 = 0.0005;

/// Largest model dimension after fitting.
pub const MODEL_TARGET_SIZE: f32 = 2.5;
pub const MODEL_SPIN_PER_FRAME: f32 = 0.01;
pub const MODEL_TILT_AMPLITUDE: f32 = 0.2;

/// Scale envelope endpoints: unfold up to (1.5, 1.5, 0.7), explode to (3.5, 3.5, 0.0).
pub const UNFOLD_XY_GAIN: f32 = 0.5;
pub const UNFOLD_Z_SHRINK: f32 = 0.3;
pub const EXPLODE_XY_GAIN: f32 = 2.0;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 5.0;

// Light units are Bevy's physical ones; values approximate the unitless rig
// (ambient 0.6, key 1.0, fill 0.8, point 1.0).
pub const AMBIENT_BRIGHTNESS: f32 = 300.0;
pub const KEY_LIGHT_ILLUMINANCE: f32 = 4_000.0;
pub const FILL_LIGHT_ILLUMINANCE: f32 = 3_200.0;
pub const POINT_LIGHT_INTENSITY: f32 = 400_000.0;
pub const POINT_LIGHT_RANGE: f32 = 100.0;

/// Width of the overlay progress bar in logical pixels.
pub const PROGRESS_BAR_WIDTH: f32 = 256.0;
