//! CSS Property Definitions
//!
//! The properties the style system understands. Anything else is refused
//! by `StyleDeclaration::set_property` and ignored by the cascade.

/// Property identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyId {
    // Display & Layout
    Display,
    Position,
    Float,

    // Box Model
    Width,
    Height,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,

    // Border
    Border,
    BorderRadius,

    // Colors & Background
    Color,
    BackgroundColor,
    Background,
    Opacity,

    // Text
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    FontVariant,
    LineHeight,
    LetterSpacing,
    WordSpacing,
    TextAlign,
    TextDecoration,
    TextTransform,
    TextShadow,
    WhiteSpace,

    // Visual
    Visibility,
    Cursor,
    ZIndex,
    Filter,
    BoxShadow,
    UserSelect,
    Overflow,

    // Positioning
    Top,
    Right,
    Bottom,
    Left,

    // Transition
    Transition,
}

impl PropertyId {
    /// Properties captured by computed-style snapshots, in snapshot order
    pub const COMPUTED: [PropertyId; 18] = [
        Self::Color,
        Self::BackgroundColor,
        Self::Display,
        Self::FontFamily,
        Self::FontSize,
        Self::FontStyle,
        Self::FontWeight,
        Self::FontVariant,
        Self::LineHeight,
        Self::LetterSpacing,
        Self::WordSpacing,
        Self::TextDecoration,
        Self::TextTransform,
        Self::TextShadow,
        Self::WhiteSpace,
        Self::Visibility,
        Self::Opacity,
        Self::Cursor,
    ];

    /// Parse a property name into a PropertyId
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "display" => Self::Display,
            "position" => Self::Position,
            "float" => Self::Float,

            "width" => Self::Width,
            "height" => Self::Height,
            "margin" => Self::Margin,
            "margin-top" => Self::MarginTop,
            "margin-right" => Self::MarginRight,
            "margin-bottom" => Self::MarginBottom,
            "margin-left" => Self::MarginLeft,
            "padding" => Self::Padding,
            "padding-top" => Self::PaddingTop,
            "padding-right" => Self::PaddingRight,
            "padding-bottom" => Self::PaddingBottom,
            "padding-left" => Self::PaddingLeft,

            "border" => Self::Border,
            "border-radius" => Self::BorderRadius,

            "color" => Self::Color,
            "background-color" => Self::BackgroundColor,
            "background" => Self::Background,
            "opacity" => Self::Opacity,

            "font-family" => Self::FontFamily,
            "font-size" => Self::FontSize,
            "font-style" => Self::FontStyle,
            "font-weight" => Self::FontWeight,
            "font-variant" => Self::FontVariant,
            "line-height" => Self::LineHeight,
            "letter-spacing" => Self::LetterSpacing,
            "word-spacing" => Self::WordSpacing,
            "text-align" => Self::TextAlign,
            "text-decoration" => Self::TextDecoration,
            "text-transform" => Self::TextTransform,
            "text-shadow" => Self::TextShadow,
            "white-space" => Self::WhiteSpace,

            "visibility" => Self::Visibility,
            "cursor" => Self::Cursor,
            "z-index" => Self::ZIndex,
            "filter" => Self::Filter,
            "box-shadow" => Self::BoxShadow,
            "user-select" => Self::UserSelect,
            "overflow" => Self::Overflow,

            "top" => Self::Top,
            "right" => Self::Right,
            "bottom" => Self::Bottom,
            "left" => Self::Left,

            "transition" => Self::Transition,

            _ => return None,
        })
    }

    /// CSS name of the property
    pub fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Position => "position",
            Self::Float => "float",
            Self::Width => "width",
            Self::Height => "height",
            Self::Margin => "margin",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
            Self::Padding => "padding",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::Border => "border",
            Self::BorderRadius => "border-radius",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::Background => "background",
            Self::Opacity => "opacity",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontStyle => "font-style",
            Self::FontWeight => "font-weight",
            Self::FontVariant => "font-variant",
            Self::LineHeight => "line-height",
            Self::LetterSpacing => "letter-spacing",
            Self::WordSpacing => "word-spacing",
            Self::TextAlign => "text-align",
            Self::TextDecoration => "text-decoration",
            Self::TextTransform => "text-transform",
            Self::TextShadow => "text-shadow",
            Self::WhiteSpace => "white-space",
            Self::Visibility => "visibility",
            Self::Cursor => "cursor",
            Self::ZIndex => "z-index",
            Self::Filter => "filter",
            Self::BoxShadow => "box-shadow",
            Self::UserSelect => "user-select",
            Self::Overflow => "overflow",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Transition => "transition",
        }
    }

    /// Whether the value flows from parent to child by default
    pub fn is_inherited(self) -> bool {
        matches!(
            self,
            Self::Color
                | Self::FontFamily
                | Self::FontSize
                | Self::FontStyle
                | Self::FontWeight
                | Self::FontVariant
                | Self::LineHeight
                | Self::LetterSpacing
                | Self::WordSpacing
                | Self::TextAlign
                | Self::TextTransform
                | Self::TextShadow
                | Self::WhiteSpace
                | Self::Visibility
                | Self::Cursor
        )
    }

    /// Computed value used when nothing in the cascade sets the property
    pub fn initial_value(self) -> &'static str {
        match self {
            Self::Color => "rgb(0, 0, 0)",
            Self::BackgroundColor => "transparent",
            Self::Display => "inline",
            Self::FontFamily => "serif",
            Self::FontSize => "16px",
            Self::FontWeight => "400",
            Self::WordSpacing => "0px",
            Self::Opacity => "1",
            Self::Position => "static",
            Self::Visibility => "visible",
            Self::TextAlign => "start",
            Self::TextDecoration
            | Self::TextTransform
            | Self::TextShadow
            | Self::Filter
            | Self::BoxShadow
            | Self::Float
            | Self::Background
            | Self::Border => "none",
            Self::Cursor
            | Self::UserSelect
            | Self::ZIndex
            | Self::Width
            | Self::Height
            | Self::Top
            | Self::Right
            | Self::Bottom
            | Self::Left => "auto",
            Self::Margin
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft
            | Self::Padding
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::BorderRadius => "0px",
            Self::Overflow => "visible",
            Self::Transition => "all 0s ease 0s",
            Self::FontStyle | Self::FontVariant | Self::LineHeight | Self::LetterSpacing | Self::WhiteSpace => {
                "normal"
            }
        }
    }

    /// Whether the value is a color that should be normalized when computed
    pub fn is_color(self) -> bool {
        matches!(self, Self::Color | Self::BackgroundColor)
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
