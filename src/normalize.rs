use crate::error::{Error, Result};

/// Decodes the raw document and normalizes line endings. Content is
/// otherwise left exactly as authored.
pub fn stage0(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::Parse(format!("input is not UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
}
