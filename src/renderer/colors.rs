//! Colors for game elements (linear RGBA, 0-1)

pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
pub const TEXT_DIM: Color = [1.0, 1.0, 1.0, 0.75];

pub const STAR: Color = [1.0, 1.0, 1.0, 0.06];

pub const ARENA_FILL: Color = [0.027, 0.027, 0.039, 1.0]; // #07070a
pub const ARENA_BORDER: Color = [1.0, 1.0, 1.0, 0.8];

pub const ENEMY_BODY: Color = [0.067, 0.067, 0.067, 1.0]; // #111
pub const ENEMY_BORDER: Color = [1.0, 1.0, 1.0, 0.25];

pub const PROJECTILE_FALLBACK: Color = [0.467, 0.733, 1.0, 1.0]; // #7bf
pub const SOUL: Color = [1.0, 0.2, 0.2, 1.0]; // #f33

pub const HUD_STRIP: Color = [0.0, 0.0, 0.0, 0.9];
pub const HUD_RULE: Color = [1.0, 1.0, 1.0, 0.12];
pub const HP_TRACK: Color = [1.0, 1.0, 1.0, 0.12];
pub const HP_FILL: Color = SOUL;

pub const DIALOGUE_BOX: Color = [0.0, 0.0, 0.0, 0.85];
pub const DIALOGUE_BORDER: Color = [1.0, 1.0, 1.0, 0.35];

/// Same color with a different alpha
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// CSS `rgba()` string for canvas fill/stroke styles
pub fn to_css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_css() {
        assert_eq!(to_css(BLACK), "rgba(0,0,0,1)");
        assert_eq!(to_css(with_alpha(TEXT, 0.5)), "rgba(255,255,255,0.5)");
    }
}
