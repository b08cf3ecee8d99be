use common::game::{FRUIT_SKIN_COUNT, SNAKE_SKIN_COUNT};
use egui::Color32;

/// A snake skin: `None` colors mean "cycle the rainbow per segment".
pub struct SnakeSkin {
    pub name: &'static str,
    pub body_color: Option<Color32>,
    pub head_color: Option<Color32>,
}

pub const SNAKE_SKINS: [SnakeSkin; SNAKE_SKIN_COUNT] = [
    SnakeSkin {
        name: "Classic Green",
        body_color: Some(Color32::from_rgb(0, 180, 0)),
        head_color: Some(Color32::from_rgb(0, 255, 0)),
    },
    SnakeSkin {
        name: "Blue Neon",
        body_color: Some(Color32::from_rgb(50, 100, 255)),
        head_color: Some(Color32::from_rgb(0, 200, 255)),
    },
    SnakeSkin {
        name: "Fire",
        body_color: Some(Color32::from_rgb(255, 80, 0)),
        head_color: Some(Color32::from_rgb(255, 180, 0)),
    },
    SnakeSkin {
        name: "Purple",
        body_color: Some(Color32::from_rgb(120, 0, 180)),
        head_color: Some(Color32::from_rgb(200, 0, 255)),
    },
    SnakeSkin {
        name: "Rainbow",
        body_color: None,
        head_color: None,
    },
];

const RAINBOW_COLORS: [Color32; 7] = [
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(255, 127, 0),
    Color32::from_rgb(255, 255, 0),
    Color32::from_rgb(0, 255, 0),
    Color32::from_rgb(0, 0, 255),
    Color32::from_rgb(75, 0, 130),
    Color32::from_rgb(148, 0, 211),
];

pub struct FruitSkin {
    pub name: &'static str,
    pub color: Color32,
}

pub const FRUIT_SKINS: [FruitSkin; FRUIT_SKIN_COUNT] = [
    FruitSkin { name: "Red Apple", color: Color32::from_rgb(220, 30, 30) },
    FruitSkin { name: "Orange", color: Color32::from_rgb(255, 165, 0) },
    FruitSkin { name: "Blue Berry", color: Color32::from_rgb(40, 70, 200) },
    FruitSkin { name: "Lime", color: Color32::from_rgb(50, 200, 50) },
    FruitSkin { name: "Purple Grape", color: Color32::from_rgb(130, 30, 130) },
];

/// Color for one snake segment. `pulse` brightens the head over time, in
/// `0.0..=1.0`.
pub fn snake_segment_color(skin_idx: usize, segment_idx: usize, pulse: f32) -> Color32 {
    let skin = &SNAKE_SKINS[skin_idx];

    let base = match skin.body_color {
        Some(color) => color,
        None => RAINBOW_COLORS[segment_idx % RAINBOW_COLORS.len()],
    };

    if segment_idx == 0 {
        let head = skin.head_color.unwrap_or(base);
        brighten(head, 30 + (70.0 * pulse) as i32)
    } else {
        base
    }
}

fn brighten(color: Color32, amount: i32) -> Color32 {
    Color32::from_rgb(
        (color.r() as i32 + amount).clamp(0, 255) as u8,
        (color.g() as i32 + amount).clamp(0, 255) as u8,
        (color.b() as i32 + amount).clamp(0, 255) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainbow_cycles_per_segment() {
        let rainbow_idx = SNAKE_SKINS.iter().position(|s| s.name == "Rainbow").unwrap();
        let first = snake_segment_color(rainbow_idx, 1, 0.0);
        let wrapped = snake_segment_color(rainbow_idx, 1 + RAINBOW_COLORS.len(), 0.0);
        assert_eq!(first, wrapped);
        assert_ne!(first, snake_segment_color(rainbow_idx, 2, 0.0));
    }

    #[test]
    fn test_head_pulse_saturates_instead_of_wrapping() {
        let color = snake_segment_color(0, 0, 1.0);
        // Classic Green head is (0, 255, 0); the green channel must clamp.
        assert_eq!(color.g(), 255);
        assert_eq!(color.r(), 100);
    }
}
