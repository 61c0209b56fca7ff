use crate::detector::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What the tool prints to stdout per image. The JSON report file is
/// written regardless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Quiet,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the rendered images and JSON reports.
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// Packed `0xRRGGBB` outline color of the box overlay.
    pub box_color: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            format: OutputFormat::Text,
            box_color: crate::salient::BOX_COLOR,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ToolConfig {
    /// Images to process; each one is handled independently.
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: DetectorParams,
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(contents: &str) -> Result<ToolConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "inputs": ["a.png", "b.jpg"] }"#).unwrap();
        assert_eq!(cfg.inputs.len(), 2);
        assert_eq!(cfg.output.dir, PathBuf::from("data"));
        assert_eq!(cfg.output.box_color, 0x00FF00);
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert_eq!(cfg.params, DetectorParams::default());
    }

    #[test]
    fn nested_params_are_read() {
        let cfg = parse_config(
            r#"{
                "inputs": [],
                "output": { "dir": "out", "format": "quiet" },
                "params": { "segmentation": { "sigma_s": 3, "sigma_r": 6.5, "min_region": 50 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Quiet);
        assert_eq!(cfg.params.segmentation.sigma_s, 3);
        assert_eq!(cfg.params.segmentation.min_region, 50);
    }

    #[test]
    fn missing_inputs_is_an_error() {
        assert!(parse_config("{}").is_err());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/salient.json")).unwrap_err();
        assert!(err.contains("/nonexistent/salient.json"), "{err}");
    }
}
