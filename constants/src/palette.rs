use bevy::color::Color;

/// Loader backdrop (`#0f172a`).
pub const LOADER_BACKGROUND: Color = Color::srgb(0.059, 0.090, 0.165);

/// Indigo, violet and cyan used by the lights, shells and fallback model.
pub const INDIGO: Color = Color::srgb(0.388, 0.400, 0.945);
pub const VIOLET: Color = Color::srgb(0.545, 0.361, 0.965);
pub const CYAN: Color = Color::srgb(0.024, 0.714, 0.831);

pub const SHELL_COLOURS: [Color; 3] = [INDIGO, VIOLET, CYAN];

/// Ambient canvas particle colour, rgb(0, 240, 255).
pub const AMBIENT_PARTICLE: Color = Color::srgb(0.0, 0.941, 1.0);

pub struct ThemePalette {
    pub background: Color,
    pub surface: Color,
    pub surface_elevated: Color,
    pub border: Color,
    pub primary: Color,
    pub accent: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
}

pub const DARK_THEME: ThemePalette = ThemePalette {
    background: Color::srgb(0.039, 0.039, 0.071),
    surface: Color::srgb(0.078, 0.082, 0.129),
    surface_elevated: Color::srgb(0.110, 0.118, 0.180),
    border: Color::srgb(0.192, 0.204, 0.290),
    primary: Color::srgb(0.0, 0.941, 1.0),
    accent: Color::srgb(0.749, 0.0, 1.0),
    text_primary: Color::srgb(0.945, 0.953, 0.980),
    text_secondary: Color::srgb(0.702, 0.725, 0.800),
    text_muted: Color::srgb(0.482, 0.506, 0.592),
};

pub const LIGHT_THEME: ThemePalette = ThemePalette {
    background: Color::srgb(0.973, 0.976, 0.988),
    surface: Color::srgb(1.0, 1.0, 1.0),
    surface_elevated: Color::srgb(0.945, 0.953, 0.973),
    border: Color::srgb(0.863, 0.875, 0.910),
    primary: Color::srgb(0.388, 0.400, 0.945),
    accent: Color::srgb(0.545, 0.361, 0.965),
    text_primary: Color::srgb(0.059, 0.090, 0.165),
    text_secondary: Color::srgb(0.278, 0.333, 0.412),
    text_muted: Color::srgb(0.392, 0.455, 0.545),
};

/// Unfilled part of the loader progress bar (`#334155`).
pub const LOADER_TRACK: Color = Color::srgb(0.200, 0.255, 0.333);
