use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

use crate::error::LabelError;
use crate::model::CropBox;

/// Job settings. Every field has a default, so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Worker threads for page extraction.
    pub workers: usize,
    /// Label region kept when cropping.
    pub crop: CropBox,
    pub sku_csv_name: String,
    pub orders_csv_name: String,
    /// Appended to the input file stem for the cropped PDF.
    pub cropped_suffix: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            workers: 4,
            crop: CropBox::default(),
            sku_csv_name: "labels_sku.csv".into(),
            orders_csv_name: "labels_orders.csv".into(),
            cropped_suffix: "_cropped".into(),
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<LabelConfig, LabelError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabelError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: LabelConfig =
        serde_json::from_str(&content).map_err(|e| LabelError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config(json: &str) -> Result<LabelConfig, LabelError> {
    let config: LabelConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &LabelConfig) -> Result<(), LabelError> {
    if config.workers == 0 {
        return Err(LabelError::ConfigInvalid(
            "workers must be at least 1".into(),
        ));
    }

    let c = &config.crop;
    if !(c.right > c.left && c.top > c.bottom) {
        return Err(LabelError::ConfigInvalid(format!(
            "crop box {} must have right > left and top > bottom",
            c
        )));
    }

    for (field, name) in [
        ("sku_csv_name", &config.sku_csv_name),
        ("orders_csv_name", &config.orders_csv_name),
    ] {
        if name.trim().is_empty() {
            return Err(LabelError::ConfigInvalid(format!(
                "{field} must not be empty"
            )));
        }
        if !is_plain_file_name(name) {
            return Err(LabelError::ConfigInvalid(format!(
                "{field} must be a file name, not a path: {name:?}"
            )));
        }
    }

    if config.cropped_suffix.contains(['/', '\\']) {
        return Err(LabelError::ConfigInvalid(format!(
            "cropped_suffix must not contain a path separator: {:?}",
            config.cropped_suffix
        )));
    }

    if config.sku_csv_name == config.orders_csv_name {
        return Err(LabelError::ConfigInvalid(
            "sku_csv_name and orders_csv_name must differ".into(),
        ));
    }

    Ok(())
}

/// Exactly one normal path component, with no separator of either platform.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LabelConfig::default();
        assert_eq!(config.workers, 4);
        assert_eq!(config.crop, CropBox::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = parse_config(r#"{ "workers": 8 }"#).unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.sku_csv_name, "labels_sku.csv");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = parse_config(r#"{ "workers": 0 }"#).unwrap_err();
        assert!(matches!(err, LabelError::ConfigInvalid(_)));
    }

    #[test]
    fn test_inverted_crop_rejected() {
        let json = r#"{ "crop": { "left": 400, "bottom": 450, "right": 185, "top": 820 } }"#;
        assert!(matches!(
            parse_config(json),
            Err(LabelError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_same_csv_names_rejected() {
        let json = r#"{ "sku_csv_name": "out.csv", "orders_csv_name": "out.csv" }"#;
        assert!(parse_config(json).is_err());
    }

    #[test]
    fn test_csv_names_must_be_file_names() {
        for json in [
            r#"{ "sku_csv_name": "../escape.csv" }"#,
            r#"{ "orders_csv_name": "missing/orders.csv" }"#,
            r#"{ "orders_csv_name": "/tmp/orders.csv" }"#,
            r#"{ "sku_csv_name": "..\\up.csv" }"#,
            r#"{ "sku_csv_name": ".." }"#,
        ] {
            assert!(
                matches!(parse_config(json), Err(LabelError::ConfigInvalid(_))),
                "accepted {json}"
            );
        }
        assert!(parse_config(r#"{ "sku_csv_name": "march skus.csv" }"#).is_ok());
    }

    #[test]
    fn test_suffix_with_separator_rejected() {
        let json = r#"{ "cropped_suffix": "/../x" }"#;
        assert!(matches!(
            parse_config(json),
            Err(LabelError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/labelcrop.json")).unwrap_err();
        assert!(matches!(err, LabelError::ConfigLoad { .. }));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labelcrop.json");
        std::fs::write(&path, r#"{ "cropped_suffix": "_labels" }"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.cropped_suffix, "_labels");
    }
}
