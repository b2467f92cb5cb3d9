/// Number of leading bytes inspected when sniffing file content
const SNIFF_LEN: usize = 8192;

/// Check if content is likely binary.
///
/// Looks only at the first 8 KiB: NUL bytes or a high share of control
/// characters mark the file as binary.
pub fn is_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(SNIFF_LEN)];
    if sample.is_empty() {
        return false;
    }

    if sample.contains(&0) {
        return true;
    }

    let control = sample
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\n' | b'\r' | b'\t' | 0x0c))
        .count();

    control > sample.len() / 8
}
