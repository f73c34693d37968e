//! Stickers and frame colors offered to the user.

use crate::image::Color;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
    pub name: String,
    pub color: Color,
}

/// Fixed lists of selectable glyphs and background frames. The first frame is
/// the default background.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub glyphs: Vec<String>,
    pub frames: Vec<Frame>,
}

impl Default for Catalog {
    fn default() -> Self {
        let glyphs = [
            "❤️", "⭐", "🌟", "✨", "💫", "🎈", "🎉", "🎊", "🌈", "☀️", "🌙", "⚡", "💖", "🦋", "🌸",
        ];
        let frames = [
            ("White", 0xff, 0xff, 0xff),
            ("Red", 0xff, 0x6b, 0x6b),
            ("Teal", 0x4e, 0xcd, 0xc4),
            ("Yellow", 0xff, 0xe6, 0x6d),
            ("Green", 0xa8, 0xe6, 0xcf),
            ("Pink", 0xff, 0x8b, 0x94),
            ("Purple", 0xc7, 0xce, 0xea),
        ];
        Self {
            glyphs: glyphs.into_iter().map(String::from).collect(),
            frames: frames
                .into_iter()
                .map(|(name, r, g, b)| Frame {
                    name: name.to_string(),
                    color: Color::from_rgb8(r, g, b),
                })
                .collect(),
        }
    }
}

impl Catalog {
    /// Looks a glyph up by its position in the catalog or by the glyph itself.
    pub fn glyph(&self, key: &str) -> Option<&str> {
        if let Ok(i) = key.parse::<usize>() {
            return self.glyphs.get(i).map(String::as_str);
        }
        self.glyphs
            .iter()
            .find(|g| g.as_str() == key)
            .map(String::as_str)
    }

    /// Looks a frame up by name, ignoring case.
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Resolves a frame name or a literal `#RRGGBB[AA]` color.
    pub fn color(&self, key: &str) -> Option<Color> {
        self.frame(key)
            .map(|f| f.color)
            .or_else(|| key.parse().ok())
    }

    pub fn default_background(&self) -> Color {
        self.frames.first().map(|f| f.color).unwrap_or(Color::WHITE)
    }
}
