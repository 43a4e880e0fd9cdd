use super::{WireError, MAX_LABEL_LEN, MAX_NAME_LEN};
use std::collections::HashSet;

const POINTER_FLAG: u8 = 0xC0;

/// Decodes a possibly-compressed name starting at `offset` within `buf`.
///
/// Returns the dotted name without a trailing dot and the offset of the
/// first octet past the name in the original stream. Compression
/// pointers are followed with a visited-offset set so malicious loops
/// terminate with `PointerLoop` instead of spinning.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), WireError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    // Offset to resume at in the original stream, set at the first jump.
    let mut resume: Option<usize> = None;
    let mut visited: HashSet<usize> = HashSet::new();
    let mut encoded_len = 1usize;

    loop {
        let len_byte = *buf
            .get(pos)
            .ok_or(WireError::TruncatedSection("name"))?;

        if len_byte & POINTER_FLAG == POINTER_FLAG {
            let low = *buf
                .get(pos + 1)
                .ok_or(WireError::TruncatedSection("name"))?;
            let target = ((usize::from(len_byte) & 0x3F) << 8) | usize::from(low);
            if resume.is_none() {
                resume = Some(pos + 2);
            }
            if !visited.insert(target) {
                return Err(WireError::PointerLoop);
            }
            if target >= buf.len() {
                return Err(WireError::TruncatedSection("name"));
            }
            pos = target;
            continue;
        }

        if len_byte & POINTER_FLAG != 0 {
            return Err(WireError::InvalidLabel(format!(
                "reserved label flags 0x{:02x}",
                len_byte & POINTER_FLAG
            )));
        }

        pos += 1;
        if len_byte == 0 {
            break;
        }

        let len = usize::from(len_byte);
        encoded_len += len + 1;
        if encoded_len > MAX_NAME_LEN {
            return Err(WireError::InvalidLabel(
                "name exceeds 255 octets".to_string(),
            ));
        }

        let label = buf
            .get(pos..pos + len)
            .ok_or(WireError::TruncatedSection("name"))?;
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos += len;
    }

    Ok((labels.join("."), resume.unwrap_or(pos)))
}

/// Encodes `name` as an uncompressed label sequence. The root name (""
/// or ".") encodes to a single zero octet.
pub fn encode_name(name: &str) -> Result<Vec<u8>, WireError> {
    let name = name.trim_end_matches('.');
    let mut out = Vec::with_capacity(name.len() + 2);

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() {
                return Err(WireError::InvalidLabel(format!(
                    "empty label in name '{}'",
                    name
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(WireError::InvalidLabel(format!(
                    "label '{}' exceeds 63 octets",
                    label
                )));
            }
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0);

    if out.len() > MAX_NAME_LEN {
        return Err(WireError::InvalidLabel(format!(
            "name '{}' exceeds 255 octets",
            name
        )));
    }
    Ok(out)
}
