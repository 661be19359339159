use std::time::SystemTime;

/// Maximum number of raw bytes rendered by [`hex_preview`].
pub const HEX_PREVIEW_LIMIT: usize = 128;

pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Renders at most [`HEX_PREVIEW_LIMIT`] bytes as space-separated hex, 16 per
/// line, with an offset column. A trailing `...` marks truncation.
pub fn hex_preview(buf: &[u8]) -> String {
    let shown = &buf[..buf.len().min(HEX_PREVIEW_LIMIT)];
    let mut out = String::with_capacity(shown.len() * 3 + 16);
    for (line_no, line) in shown.chunks(16).enumerate() {
        if line_no > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:08x} ", line_no * 16));
        for b in line {
            out.push_str(&format!(" {b:02x}"));
        }
    }
    if buf.len() > shown.len() {
        out.push_str(" ...");
    }
    out
}
