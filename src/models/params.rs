//! Layout parameters
//!
//! The user-facing knobs that shape a practice sheet. They are persisted
//! outside the core under the field names below, so the serde names are part
//! of the storage format and must not change.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Largest accepted number of trace copies after the model character
pub const MAX_TRACE_COUNT: u8 = 10;

/// Allowed range for grid rows per character
pub const MIN_ROWS_PER_CHAR: u8 = 1;
pub const MAX_ROWS_PER_CHAR: u8 = 5;

/// Guide pattern drawn inside every grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GridStyle {
    /// 米字格: cross plus both diagonals
    #[default]
    #[serde(rename = "mi-zi-ge")]
    DiamondGuide,

    /// 田字格: vertical and horizontal center lines
    #[serde(rename = "tian-zi-ge")]
    SquareGuide,

    /// Border only
    #[serde(rename = "empty")]
    Blank,
}

impl GridStyle {
    pub const ALL: [GridStyle; 3] = [GridStyle::DiamondGuide, GridStyle::SquareGuide, GridStyle::Blank];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mi-zi-ge" => Some(GridStyle::DiamondGuide),
            "tian-zi-ge" => Some(GridStyle::SquareGuide),
            "empty" => Some(GridStyle::Blank),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            GridStyle::DiamondGuide => "mi-zi-ge",
            GridStyle::SquareGuide => "tian-zi-ge",
            GridStyle::Blank => "empty",
        }
    }

    /// Label shown in the style picker
    pub fn label(self) -> &'static str {
        match self {
            GridStyle::DiamondGuide => "米字格",
            GridStyle::SquareGuide => "田字格",
            GridStyle::Blank => "Blank",
        }
    }

    pub fn has_center_cross(self) -> bool {
        matches!(self, GridStyle::DiamondGuide | GridStyle::SquareGuide)
    }

    pub fn has_diagonals(self) -> bool {
        matches!(self, GridStyle::DiamondGuide)
    }
}

/// Note-taking space above each block, in points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr, Default)]
#[repr(u8)]
pub enum TopSpacing {
    #[default]
    Small = 5,
    Medium = 30,
    Large = 60,
}

impl TopSpacing {
    pub const ALL: [TopSpacing; 3] = [TopSpacing::Small, TopSpacing::Medium, TopSpacing::Large];

    pub fn from_points(points: u64) -> Option<Self> {
        match points {
            5 => Some(TopSpacing::Small),
            30 => Some(TopSpacing::Medium),
            60 => Some(TopSpacing::Large),
            _ => None,
        }
    }

    pub fn points(self) -> f32 {
        self as u8 as f32
    }

    pub fn label(self) -> &'static str {
        match self {
            TopSpacing::Small => "Small",
            TopSpacing::Medium => "Medium",
            TopSpacing::Large => "Large",
        }
    }
}

/// How dark the trace copies are drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TraceOpacity {
    Low,
    #[default]
    Medium,
    High,
}

impl TraceOpacity {
    pub const ALL: [TraceOpacity; 3] = [TraceOpacity::Low, TraceOpacity::Medium, TraceOpacity::High];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "low" => Some(TraceOpacity::Low),
            "medium" => Some(TraceOpacity::Medium),
            "high" => Some(TraceOpacity::High),
            _ => None,
        }
    }

    /// Alpha applied to trace glyphs
    pub fn alpha(self) -> f64 {
        match self {
            TraceOpacity::Low => 0.10,
            TraceOpacity::Medium => 0.25,
            TraceOpacity::High => 0.50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TraceOpacity::Low => "Light",
            TraceOpacity::Medium => "Medium",
            TraceOpacity::High => "Dark",
        }
    }
}

/// Complete set of layout options for one sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParameters {
    /// Faint copies drawn after the solid model character (0..=10)
    pub trace_count: u8,

    /// Grid rows per character block (1..=5)
    #[serde(rename = "rowsPerChar")]
    pub rows_per_character: u8,

    /// Reserve a pinyin band above each block
    #[serde(rename = "showHeaderInfo")]
    pub show_pronunciation_header: bool,

    #[serde(rename = "gridType")]
    pub grid_style: GridStyle,

    pub top_spacing: TopSpacing,

    #[serde(rename = "traceOpacity")]
    pub trace_opacity: TraceOpacity,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            trace_count: 5,
            rows_per_character: 2,
            show_pronunciation_header: true,
            grid_style: GridStyle::DiamondGuide,
            top_spacing: TopSpacing::Small,
            trace_opacity: TraceOpacity::Medium,
        }
    }
}

impl LayoutParameters {
    /// Clamp the integer fields into their valid ranges
    pub fn normalized(mut self) -> Self {
        self.trace_count = self.trace_count.min(MAX_TRACE_COUNT);
        self.rows_per_character = self
            .rows_per_character
            .clamp(MIN_ROWS_PER_CHAR, MAX_ROWS_PER_CHAR);
        self
    }
}

/// One entry of a picker: the persisted value and its display label
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOption<T> {
    pub value: T,
    pub label: &'static str,
}

/// Choices for every enumerated layout control, in display order
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub grid_types: Vec<LayoutOption<GridStyle>>,
    pub top_spacings: Vec<LayoutOption<TopSpacing>>,
    pub trace_opacities: Vec<LayoutOption<TraceOpacity>>,
}

pub fn layout_options() -> LayoutOptions {
    LayoutOptions {
        grid_types: GridStyle::ALL
            .iter()
            .map(|&value| LayoutOption { value, label: value.label() })
            .collect(),
        top_spacings: TopSpacing::ALL
            .iter()
            .map(|&value| LayoutOption { value, label: value.label() })
            .collect(),
        trace_opacities: TraceOpacity::ALL
            .iter()
            .map(|&value| LayoutOption { value, label: value.label() })
            .collect(),
    }
}
