use super::message::{DnsMessage, ResourceRecord};
use super::name::decode_name;
use super::{WireError, HEADER_LEN, MAX_DATAGRAM_LEN, MAX_LABEL_LEN, MAX_NAME_LEN};
use crate::record_type::RecordType;
use std::collections::HashMap;

/// Packs a message into at most 512 octets.
///
/// Sections are written in order (questions, answers, authority,
/// additional). A record that would push the datagram past the limit is
/// rolled back whole, the TC flag is set, and packing stops; the header
/// counts always reflect what was actually emitted.
pub fn pack_message(msg: &DnsMessage) -> Result<Vec<u8>, WireError> {
    let mut buf = vec![0u8; HEADER_LEN];
    let mut offsets: HashMap<String, u16> = HashMap::new();

    for q in &msg.questions {
        write_name(&mut buf, &q.name, &mut offsets)?;
        buf.extend_from_slice(&q.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&q.qclass.to_u16().to_be_bytes());
    }

    let mut counts = [0u16; 3];
    let mut truncated = false;
    'sections: for (idx, records) in [&msg.answers, &msg.authority, &msg.additional]
        .into_iter()
        .enumerate()
    {
        for rr in records.iter() {
            let checkpoint = buf.len();
            let saved_offsets = offsets.clone();
            write_record(&mut buf, rr, &mut offsets)?;
            if buf.len() > MAX_DATAGRAM_LEN {
                buf.truncate(checkpoint);
                offsets = saved_offsets;
                truncated = true;
                break 'sections;
            }
            counts[idx] += 1;
        }
    }

    let mut flags = msg.header.flags;
    flags.tc = flags.tc || truncated;

    buf[0..2].copy_from_slice(&msg.header.id.to_be_bytes());
    buf[2..4].copy_from_slice(&flags.to_u16().to_be_bytes());
    buf[4..6].copy_from_slice(&(msg.questions.len() as u16).to_be_bytes());
    buf[6..8].copy_from_slice(&counts[0].to_be_bytes());
    buf[8..10].copy_from_slice(&counts[1].to_be_bytes());
    buf[10..12].copy_from_slice(&counts[2].to_be_bytes());

    Ok(buf)
}

/// Writes a name, compressing against suffixes already present in the
/// buffer. The compression state is a flat suffix-to-offset table: for
/// each label position the remaining suffix either points at an earlier
/// offset or is written out and recorded at its own offset.
fn write_name(
    buf: &mut Vec<u8>,
    name: &str,
    offsets: &mut HashMap<String, u16>,
) -> Result<(), WireError> {
    let name = name.trim_end_matches('.');
    if name.is_empty() {
        buf.push(0);
        return Ok(());
    }

    let labels: Vec<&str> = name.split('.').collect();
    let mut encoded_len = 1usize;

    for i in 0..labels.len() {
        let suffix = labels[i..].join(".");
        if let Some(&offset) = offsets.get(&suffix) {
            buf.extend_from_slice(&(0xC000u16 | offset).to_be_bytes());
            return Ok(());
        }

        let label = labels[i];
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
        encoded_len += label.len() + 1;
        if encoded_len > MAX_NAME_LEN {
            return Err(WireError::InvalidLabel(format!(
                "name '{}' exceeds 255 octets",
                name
            )));
        }

        // Pointers only address 14 bits; suffixes further out are
        // written in full without being recorded.
        if buf.len() <= 0x3FFF {
            offsets.insert(suffix, buf.len() as u16);
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    Ok(())
}

fn write_record(
    buf: &mut Vec<u8>,
    rr: &ResourceRecord,
    offsets: &mut HashMap<String, u16>,
) -> Result<(), WireError> {
    write_name(buf, &rr.name, offsets)?;
    buf.extend_from_slice(&rr.rtype.to_u16().to_be_bytes());
    buf.extend_from_slice(&rr.class.to_u16().to_be_bytes());
    buf.extend_from_slice(&rr.ttl.to_be_bytes());

    // RDLENGTH placeholder, patched once the RData is emitted.
    let rd_length_pos = buf.len();
    buf.extend_from_slice(&[0, 0]);
    let rdata_start = buf.len();

    write_rdata(buf, rr, offsets)?;

    let rdata_len = (buf.len() - rdata_start) as u16;
    buf[rd_length_pos..rd_length_pos + 2].copy_from_slice(&rdata_len.to_be_bytes());
    Ok(())
}

fn write_rdata(
    buf: &mut Vec<u8>,
    rr: &ResourceRecord,
    offsets: &mut HashMap<String, u16>,
) -> Result<(), WireError> {
    match rr.rtype {
        RecordType::A => {
            if rr.rdata.len() != 4 {
                return Err(WireError::InvalidRData(format!(
                    "A rdata must be 4 octets, got {}",
                    rr.rdata.len()
                )));
            }
            buf.extend_from_slice(&rr.rdata);
        }
        RecordType::AAAA => {
            if rr.rdata.len() != 16 {
                return Err(WireError::InvalidRData(format!(
                    "AAAA rdata must be 16 octets, got {}",
                    rr.rdata.len()
                )));
            }
            buf.extend_from_slice(&rr.rdata);
        }
        RecordType::CNAME | RecordType::NS | RecordType::PTR => {
            let (target, _) = decode_name(&rr.rdata, 0)?;
            write_name(buf, &target, offsets)?;
        }
        RecordType::MX => {
            if rr.rdata.len() < 2 {
                return Err(WireError::InvalidRData(
                    "MX rdata shorter than the preference field".to_string(),
                ));
            }
            buf.extend_from_slice(&rr.rdata[..2]);
            let (exchange, _) = decode_name(&rr.rdata[2..], 0)?;
            write_name(buf, &exchange, offsets)?;
        }
        RecordType::TXT => {
            validate_txt_segments(&rr.rdata)?;
            buf.extend_from_slice(&rr.rdata);
        }
        _ => {
            // Unknown types pass through opaquely.
            buf.extend_from_slice(&rr.rdata);
        }
    }
    Ok(())
}

fn validate_txt_segments(rdata: &[u8]) -> Result<(), WireError> {
    if rdata.is_empty() {
        return Err(WireError::InvalidRData(
            "TXT rdata must contain at least one string".to_string(),
        ));
    }
    let mut pos = 0usize;
    while pos < rdata.len() {
        pos += 1 + usize::from(rdata[pos]);
    }
    if pos != rdata.len() {
        return Err(WireError::InvalidRData(
            "TXT rdata segment lengths are inconsistent".to_string(),
        ));
    }
    Ok(())
}
