use labelcrop_core::error::LabelError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), LabelError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
