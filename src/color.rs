use tracing::warn;

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f64; 3]);

impl Rgb {
    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b])
    }

    /// Red component.
    #[must_use]
    pub fn r(&self) -> f64 {
        self.0[0]
    }

    /// Green component.
    #[must_use]
    pub fn g(&self) -> f64 {
        self.0[1]
    }

    /// Blue component.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.0[2]
    }

    /// Linear blend, `t = 0` gives `self`, `t = 1` gives `other`.
    #[must_use]
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let c = |i: usize| self.0[i] + (other.0[i] - self.0[i]) * t;
        Rgb([c(0), c(1), c(2)])
    }
}

/// Fill color of the root outline region.
pub const ROOT_COLOR: Rgb = Rgb::new(0.259, 0.259, 0.259);

/// Opacity of the root outline region in 2D plots.
pub const ROOT_ALPHA: f64 = 0.3;

/// Maps scalars to colors.
pub trait Colormap {
    /// Color of `value` within `[vmin, vmax]`. Values outside the range
    /// clamp to the ends.
    fn map(&self, value: f64, vmin: f64, vmax: f64) -> Rgb;
}

/// Piecewise-linear colormap with evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColormap {
    name: String,
    stops: Vec<Rgb>,
}

impl NamedColormap {
    /// Looks up a built-in colormap. Unknown names fall back to `"Reds"`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let stops = match name {
            "Reds" => vec![
                Rgb::new(1.0, 0.961, 0.941),
                Rgb::new(0.984, 0.416, 0.290),
                Rgb::new(0.404, 0.0, 0.051),
            ],
            "Blues" => vec![
                Rgb::new(0.969, 0.984, 1.0),
                Rgb::new(0.420, 0.682, 0.839),
                Rgb::new(0.031, 0.188, 0.420),
            ],
            "Greens" => vec![
                Rgb::new(0.969, 0.988, 0.961),
                Rgb::new(0.455, 0.769, 0.463),
                Rgb::new(0.0, 0.267, 0.106),
            ],
            "Greys" => vec![
                Rgb::new(1.0, 1.0, 1.0),
                Rgb::new(0.588, 0.588, 0.588),
                Rgb::new(0.0, 0.0, 0.0),
            ],
            "viridis" => vec![
                Rgb::new(0.267, 0.005, 0.329),
                Rgb::new(0.231, 0.322, 0.545),
                Rgb::new(0.129, 0.569, 0.549),
                Rgb::new(0.369, 0.788, 0.384),
                Rgb::new(0.993, 0.906, 0.144),
            ],
            other => {
                warn!(colormap = other, "unknown colormap, using Reds");
                return Self::from_name("Reds");
            }
        };
        Self {
            name: name.to_owned(),
            stops,
        }
    }

    /// Name of the colormap.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for NamedColormap {
    fn default() -> Self {
        Self::from_name("Reds")
    }
}

impl Colormap for NamedColormap {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn map(&self, value: f64, vmin: f64, vmax: f64) -> Rgb {
        let t = if vmax > vmin {
            ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
        } else if value >= vmax {
            1.0
        } else {
            0.0
        };

        let spans = self.stops.len() - 1;
        let scaled = t * spans as f64;
        let i = (scaled.floor() as usize).min(spans - 1);
        self.stops[i].lerp(&self.stops[i + 1], scaled - i as f64)
    }
}

/// The `[vmin, vmax]` range scalars are mapped over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    /// Lower end of the range.
    pub vmin: f64,
    /// Upper end of the range.
    pub vmax: f64,
}

impl ColorRange {
    /// Extrema of `values`, ignoring NaN. All-NaN or empty input gives
    /// `NaN` for both ends.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (vmin, vmax) = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self { vmin, vmax }
    }

    /// Replaces either end with an explicit value. Zero is a valid override.
    #[must_use]
    pub fn with_overrides(self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        Self {
            vmin: vmin.unwrap_or(self.vmin),
            vmax: vmax.unwrap_or(self.vmax),
        }
    }

    /// Returns `true` if `value` lies within the range, ends included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.vmin <= value && value <= self.vmax
    }

    /// Color of `value`, or `None` for NaN values or an undefined range.
    #[must_use]
    pub fn color_for<C: Colormap + ?Sized>(&self, colormap: &C, value: f64) -> Option<Rgb> {
        if value.is_nan() || self.vmin.is_nan() || self.vmax.is_nan() {
            return None;
        }
        Some(colormap.map(value, self.vmin, self.vmax))
    }
}
