use labelcrop_core::config::LabelConfig;
use labelcrop_core::error::LabelError;

pub fn print_default() -> Result<(), LabelError> {
    let json = serde_json::to_string_pretty(&LabelConfig::default())?;
    println!("{json}");
    Ok(())
}
