// Library exports for ukpopmap

pub mod barchart;
pub mod choropleth;
pub mod geo;
pub mod palette;
pub mod render;
pub mod resolve;
pub mod scale;
pub mod selection;
pub mod table;
pub mod transform;

use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 { 1024 }
fn default_height() -> u32 { 800 }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 800,
            format: OutputFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_from_json() {
        let opts: RenderOptions =
            serde_json::from_str(r#"{"width": 640, "type": "svg"}"#).unwrap();
        assert_eq!(opts.width, 640);
        assert_eq!(opts.height, 800);
        assert_eq!(opts.format, OutputFormat::Svg);
    }

    #[test]
    fn test_render_options_defaults() {
        let opts: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.width, 1024);
        assert_eq!(opts.format, OutputFormat::Png);
    }
}
