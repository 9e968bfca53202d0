//! Configuration types for Stencil conversions.
//!
//! This module provides configuration structures that control how diagrams
//! are read, mapped and packaged. All types implement [`serde::Deserialize`]
//! for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining all sections.
//! - [`PageConfig`] - Size of the Visio page, in inches.
//! - [`CanvasConfig`] - Canvas assumed when a diagram declares none.
//! - [`MappingConfig`] - Extra style rules tried before the built-in ones.
//!
//! # Example
//!
//! ```
//! # use stencil::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.page().size().is_ok());
//! ```

use serde::Deserialize;

use stencil_core::{
    geometry::{Canvas, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, PageSize},
    shape::MasterKind,
};

use crate::mapping::StyleRule;

/// Top-level application configuration.
///
/// Groups [`PageConfig`], [`CanvasConfig`] and [`MappingConfig`] into a
/// single configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    page: PageConfig,

    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Mapping configuration section.
    #[serde(default)]
    mapping: MappingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `page` - Visio page size.
    /// * `canvas` - Fallback canvas for diagrams that declare none.
    /// * `mapping` - Style classification rules.
    pub fn new(page: PageConfig, canvas: CanvasConfig, mapping: MappingConfig) -> Self {
        Self {
            page,
            canvas,
            mapping,
        }
    }

    /// Returns the page configuration.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the mapping configuration.
    pub fn mapping(&self) -> &MappingConfig {
        &self.mapping
    }
}

/// Size of the generated Visio page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Page width in inches.
    #[serde(default = "default_page_width")]
    width: f64,

    /// Page height in inches.
    #[serde(default = "default_page_height")]
    height: f64,
}

impl PageConfig {
    /// Creates a new [`PageConfig`] with the given size in inches.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the validated page size.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is not a positive number.
    pub fn size(&self) -> Result<PageSize, String> {
        PageSize::new(self.width, self.height)
            .map_err(|err| format!("Invalid page size in config: {err}"))
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: default_page_width(),
            height: default_page_height(),
        }
    }
}

fn default_page_width() -> f64 {
    PageSize::letter_landscape().width()
}

fn default_page_height() -> f64 {
    PageSize::letter_landscape().height()
}

/// Canvas assumed for diagrams that do not declare `pageWidth` or
/// `pageHeight`, in pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    width: f64,

    #[serde(default = "default_canvas_height")]
    height: f64,
}

impl CanvasConfig {
    /// Creates a new [`CanvasConfig`] with the given size in pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the validated fallback canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is not a positive number.
    pub fn canvas(&self) -> Result<Canvas, String> {
        Canvas::new(self.width, self.height)
            .map_err(|err| format!("Invalid canvas size in config: {err}"))
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

/// Style classification settings.
///
/// ```toml
/// [[mapping.style_rules]]
/// contains = "cylinder"
/// kind = "ellipse"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingConfig {
    /// Rules tried in order before the built-in ellipse and rhombus rules.
    #[serde(default)]
    style_rules: Vec<StyleRuleConfig>,
}

impl MappingConfig {
    /// Creates a new [`MappingConfig`] with the given extra rules.
    pub fn new(style_rules: Vec<StyleRuleConfig>) -> Self {
        Self { style_rules }
    }

    /// Returns the configured rules, validated.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule has an empty `contains` pattern or maps
    /// vertices onto the connector master.
    pub fn style_rules(&self) -> Result<Vec<StyleRule>, String> {
        self.style_rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| {
                if rule.contains.is_empty() {
                    return Err(format!(
                        "Invalid style rule #{} in config: `contains` must not be empty",
                        idx + 1
                    ));
                }
                if rule.kind == MasterKind::Connector {
                    return Err(format!(
                        "Invalid style rule #{} in config: the connector master is for edges",
                        idx + 1
                    ));
                }
                Ok(StyleRule::new(rule.contains.clone(), rule.kind))
            })
            .collect()
    }
}

/// A single configured style rule.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleRuleConfig {
    /// Substring looked for in the vertex style.
    contains: String,

    /// Master used when the substring is present.
    kind: MasterKind,
}

impl StyleRuleConfig {
    pub fn new(contains: impl Into<String>, kind: MasterKind) -> Self {
        Self {
            contains: contains.into(),
            kind,
        }
    }
}
