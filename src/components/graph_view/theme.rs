//! Visual theming for the graph view.
//!
//! Node colors come from the payload's category registry; the theme supplies
//! everything else, including the muted, hover and selection colors the
//! reducers switch to.

use std::fmt;

/// An sRGB color with alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const WHITE: Color = Color::rgb(255, 255, 255);
	/// Stand-in for payload colors that cannot be read.
	pub const FALLBACK: Color = Color::rgb(128, 128, 128);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::rgba(r, g, b, 1.0)
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear blend towards `other` by `t` in `0.0..=1.0`, keeping own alpha.
	pub fn mix(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let blend = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
		Self {
			r: blend(self.r, other.r),
			g: blend(self.g, other.g),
			b: blend(self.b, other.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		self.to_string()
	}

	/// Read `#rrggbb`, `#rgb`, `rgb(..)` or `rgba(..)`.
	pub fn from_css(text: &str) -> Option<Self> {
		let text = text.trim();
		if let Some(hex) = text.strip_prefix('#') {
			return from_hex(hex);
		}
		let args = text
			.strip_prefix("rgba(")
			.or_else(|| text.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let mut parts = args.split(',').map(str::trim);
		let r = parts.next()?.parse().ok()?;
		let g = parts.next()?.parse().ok()?;
		let b = parts.next()?.parse().ok()?;
		let a = match parts.next() {
			Some(alpha) => alpha.parse().ok()?,
			None => 1.0,
		};
		Some(Self::rgba(r, g, b, a))
	}
}

fn from_hex(hex: &str) -> Option<Color> {
	let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
	match hex.len() {
		6 => Some(Color::rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
		3 => Some(Color::rgb(
			digit(0, 1)? * 17,
			digit(1, 1)? * 17,
			digit(2, 1)? * 17,
		)),
		_ => None,
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.a >= 0.999 {
			write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Canvas fill behind the graph.
#[derive(Clone, Debug)]
pub struct Backdrop {
	pub base: Color,
	/// Center color of a radial glow fading into `base`.
	pub glow: Option<Color>,
	/// Edge darkening, 0.0 disables it.
	pub vignette: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Used when the payload gives no edge color.
	pub color: Color,
	pub hover_color: Color,
	pub selected_color: Color,
	/// Width multiplier for highlighted edges.
	pub highlight_width: f64,
}

/// Stroke around every node.
#[derive(Clone, Copy, Debug)]
pub struct Outline {
	pub color: Color,
	/// Screen pixels.
	pub width: f64,
}

#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Shade nodes as lit spheres instead of flat discs.
	pub shaded: bool,
	pub outline: Option<Outline>,
	/// Dimmed nodes (search misses, hover non-neighbors).
	pub muted_color: Color,
	pub selected_color: Color,
	/// Ring around emphasized nodes.
	pub ring_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub backdrop: Backdrop,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label_color: Color,
}

impl Theme {
	/// Dark slate with soft highlights.
	pub fn default_theme() -> Self {
		let accent = Color::rgb(255, 166, 87);
		Self {
			name: "default",
			backdrop: Backdrop {
				base: Color::rgb(22, 27, 34),
				glow: Some(Color::rgb(31, 37, 46)),
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(139, 148, 158, 0.45),
				hover_color: Color::rgb(88, 166, 255),
				selected_color: accent,
				highlight_width: 2.0,
			},
			node: NodeStyle {
				shaded: true,
				outline: None,
				muted_color: Color::rgb(58, 64, 74),
				selected_color: accent,
				ring_color: Color::rgba(240, 246, 252, 0.8),
			},
			label_color: Color::rgba(230, 237, 243, 0.9),
		}
	}

	/// Near-black, flat nodes with thin outlines.
	pub fn midnight() -> Self {
		let accent = Color::rgb(230, 190, 110);
		Self {
			name: "midnight",
			backdrop: Backdrop {
				base: Color::rgb(13, 15, 22),
				glow: None,
				vignette: 0.25,
			},
			edge: EdgeStyle {
				color: Color::rgba(96, 112, 140, 0.4),
				hover_color: Color::rgb(140, 130, 230),
				selected_color: accent,
				highlight_width: 2.5,
			},
			node: NodeStyle {
				shaded: false,
				outline: Some(Outline {
					color: Color::rgba(255, 255, 255, 0.25),
					width: 1.0,
				}),
				muted_color: Color::rgb(40, 44, 56),
				selected_color: accent,
				ring_color: Color::rgba(210, 210, 255, 0.7),
			},
			label_color: Color::rgba(214, 220, 236, 0.85),
		}
	}

	/// Look up a theme by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
