use crate::foundation::error::HeatError;

/// Named colour palette mapping a value in `[0, 1]` to RGB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Jet,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Hot,
    Cool,
    #[serde(alias = "grey")]
    Gray,
}

type Segments = &'static [(f64, f64)];

// Piecewise-linear channel tables: (position, value).
const JET: [Segments; 3] = [
    &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    &[
        (0.0, 0.0),
        (0.125, 0.0),
        (0.375, 1.0),
        (0.64, 1.0),
        (0.91, 0.0),
        (1.0, 0.0),
    ],
    &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
];

const HOT: [Segments; 3] = [
    &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
];

// Evenly spaced samples of the perceptually uniform maps.
const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3e4a89, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const PLASMA: [u32; 10] = [
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];
const INFERNO: [u32; 10] = [
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: [u32; 10] = [
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];

impl Colormap {
    pub const ALL: [Colormap; 8] = [
        Self::Jet,
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Hot,
        Self::Cool,
        Self::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Jet => "jet",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Hot => "hot",
            Self::Cool => "cool",
            Self::Gray => "gray",
        }
    }

    /// RGB for `t`, clamped to `[0, 1]`. NaN maps to the low end.
    pub fn sample(self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let rgb = match self {
            Self::Jet => channels(&JET, t),
            Self::Hot => channels(&HOT, t),
            Self::Viridis => stops(&VIRIDIS, t),
            Self::Plasma => stops(&PLASMA, t),
            Self::Inferno => stops(&INFERNO, t),
            Self::Magma => stops(&MAGMA, t),
            Self::Cool => [t, 1.0 - t, 1.0],
            Self::Gray => [t, t, t],
        };
        rgb.map(to_u8)
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Colormap {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "grey" {
            return Ok(Self::Gray);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                HeatError::invalid_input(format!(
                    "unknown colormap '{s}' (known: {})",
                    known.join(", ")
                ))
            })
    }
}

fn channels(table: &[Segments; 3], t: f64) -> [f64; 3] {
    [lerp_segments(table[0], t), lerp_segments(table[1], t), lerp_segments(table[2], t)]
}

fn lerp_segments(segs: Segments, t: f64) -> f64 {
    for w in segs.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        if t <= x1 {
            if x1 <= x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    segs.last().map_or(0.0, |&(_, y)| y)
}

fn stops(table: &[u32], t: f64) -> [f64; 3] {
    let n = table.len() - 1;
    let pos = t * n as f64;
    let i = (pos.floor() as usize).min(n - 1);
    let f = pos - i as f64;
    let (a, b) = (unpack(table[i]), unpack(table[i + 1]));
    [
        a[0] + (b[0] - a[0]) * f,
        a[1] + (b[1] - a[1]) * f,
        a[2] + (b[2] - a[2]) * f,
    ]
}

fn unpack(hex: u32) -> [f64; 3] {
    [
        f64::from((hex >> 16) & 0xff) / 255.0,
        f64::from((hex >> 8) & 0xff) / 255.0,
        f64::from(hex & 0xff) / 255.0,
    ]
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;
