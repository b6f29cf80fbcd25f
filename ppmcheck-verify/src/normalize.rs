//! Line-ending normalisation.

use std::borrow::Cow;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Collapse every CR-LF pair into a single LF.
///
/// A lone CR is kept. Input without any CR-LF is returned borrowed.
pub fn normalize_line_endings(data: &[u8]) -> Cow<'_, [u8]> {
    if !data.windows(2).any(|w| w == [CR, LF]) {
        return Cow::Borrowed(data);
    }

    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == CR && iter.peek() == Some(&LF) {
            continue;
        }
        out.push(byte);
    }
    Cow::Owned(out)
}
