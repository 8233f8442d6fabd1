//! Built-in palettes.

use std::fmt;
use std::str::FromStr;

use super::palette::Palette;

/// ZX Spectrum colors at normal intensity.
pub const ZX_BASIC: [[u8; 3]; 8] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0xCD],
    [0xCD, 0x00, 0x00],
    [0xCD, 0x00, 0xCD],
    [0x00, 0xCD, 0x00],
    [0x00, 0xCD, 0xCD],
    [0xCD, 0xCD, 0x00],
    [0xCD, 0xCD, 0xCD],
];

/// ZX Spectrum colors with the BRIGHT attribute set.
pub const ZX_BRIGHT: [[u8; 3]; 8] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0xFF],
    [0xFF, 0x00, 0x00],
    [0xFF, 0x00, 0xFF],
    [0x00, 0xFF, 0x00],
    [0x00, 0xFF, 0xFF],
    [0xFF, 0xFF, 0x00],
    [0xFF, 0xFF, 0xFF],
];

/// Both ZX Spectrum intensities, normal first.
pub const ZX_FULL: [[u8; 3]; 16] = [
    ZX_BASIC[0], ZX_BASIC[1], ZX_BASIC[2], ZX_BASIC[3],
    ZX_BASIC[4], ZX_BASIC[5], ZX_BASIC[6], ZX_BASIC[7],
    ZX_BRIGHT[0], ZX_BRIGHT[1], ZX_BRIGHT[2], ZX_BRIGHT[3],
    ZX_BRIGHT[4], ZX_BRIGHT[5], ZX_BRIGHT[6], ZX_BRIGHT[7],
];

/// Original Game Boy four greens, darkest first.
pub const GAMEBOY: [[u8; 3]; 4] = [
    [0x0F, 0x38, 0x0F],
    [0x30, 0x62, 0x30],
    [0x8B, 0xAC, 0x0F],
    [0x9B, 0xBC, 0x0F],
];

/// CGA mode 4, palette 1 at high intensity.
pub const CGA: [[u8; 3]; 4] = [
    [0x00, 0x00, 0x00],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0x55, 0xFF],
    [0xFF, 0xFF, 0xFF],
];

/// Named built-in palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    ZxBasic,
    ZxBright,
    ZxFull,
    Gameboy,
    Cga,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::ZxBasic,
        Preset::ZxBright,
        Preset::ZxFull,
        Preset::Gameboy,
        Preset::Cga,
    ];

    /// Look up a preset by name, ignoring case, `-` and `_`.
    ///
    /// ```
    /// use glitch_dither::Preset;
    ///
    /// assert_eq!(Preset::by_name("zx-bright"), Some(Preset::ZxBright));
    /// assert_eq!(Preset::by_name("GameBoy"), Some(Preset::Gameboy));
    /// assert_eq!(Preset::by_name("c64"), None);
    /// ```
    pub fn by_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "zx" | "zxbasic" => Some(Preset::ZxBasic),
            "zxbright" => Some(Preset::ZxBright),
            "zxfull" => Some(Preset::ZxFull),
            "gameboy" | "gb" => Some(Preset::Gameboy),
            "cga" => Some(Preset::Cga),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::ZxBasic => "zx-basic",
            Preset::ZxBright => "zx-bright",
            Preset::ZxFull => "zx-full",
            Preset::Gameboy => "gameboy",
            Preset::Cga => "cga",
        }
    }

    pub fn rgb8(self) -> &'static [[u8; 3]] {
        match self {
            Preset::ZxBasic => &ZX_BASIC,
            Preset::ZxBright => &ZX_BRIGHT,
            Preset::ZxFull => &ZX_FULL,
            Preset::Gameboy => &GAMEBOY,
            Preset::Cga => &CGA,
        }
    }

    pub fn palette(self) -> Palette {
        Palette::from_rgb8_table(self.rgb8())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::by_name(s).ok_or_else(|| format!("unknown preset: {s}"))
    }
}
