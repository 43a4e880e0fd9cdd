use super::message::{DnsHeader, DnsMessage, HeaderFlags, Question, ResourceRecord};
use super::name::{decode_name, encode_name};
use super::{WireError, HEADER_LEN};
use crate::record_class::RecordClass;
use crate::record_type::RecordType;

/// Parses a complete DNS datagram. Never reads past the input buffer;
/// short or inconsistent input fails with the matching `WireError`.
pub fn parse_message(buf: &[u8]) -> Result<DnsMessage, WireError> {
    if buf.len() < HEADER_LEN {
        return Err(WireError::ShortBuffer);
    }

    let header = DnsHeader {
        id: read_u16(buf, 0),
        flags: HeaderFlags::from_u16(read_u16(buf, 2)),
        qd_count: read_u16(buf, 4),
        an_count: read_u16(buf, 6),
        ns_count: read_u16(buf, 8),
        ar_count: read_u16(buf, 10),
    };

    let mut pos = HEADER_LEN;

    let mut questions = Vec::with_capacity(usize::from(header.qd_count.min(16)));
    for _ in 0..header.qd_count {
        let (name, next) = decode_name(buf, pos)?;
        pos = next;
        let fixed = buf
            .get(pos..pos + 4)
            .ok_or(WireError::TruncatedSection("question"))?;
        questions.push(Question {
            name,
            qtype: RecordType::from_u16(u16::from_be_bytes([fixed[0], fixed[1]])),
            qclass: RecordClass::from_u16(u16::from_be_bytes([fixed[2], fixed[3]])),
        });
        pos += 4;
    }

    let (answers, pos) = parse_records(buf, pos, header.an_count, "answer")?;
    let (authority, pos) = parse_records(buf, pos, header.ns_count, "authority")?;
    let (additional, _) = parse_records(buf, pos, header.ar_count, "additional")?;

    Ok(DnsMessage {
        header,
        questions,
        answers,
        authority,
        additional,
    })
}

fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

fn parse_records(
    buf: &[u8],
    mut pos: usize,
    count: u16,
    section: &'static str,
) -> Result<(Vec<ResourceRecord>, usize), WireError> {
    let mut records = Vec::with_capacity(usize::from(count.min(16)));
    for _ in 0..count {
        let (name, next) = decode_name(buf, pos)?;
        pos = next;

        let fixed = buf
            .get(pos..pos + 10)
            .ok_or(WireError::TruncatedSection(section))?;
        let rtype = RecordType::from_u16(u16::from_be_bytes([fixed[0], fixed[1]]));
        let class = RecordClass::from_u16(u16::from_be_bytes([fixed[2], fixed[3]]));
        let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        let rd_len = usize::from(u16::from_be_bytes([fixed[8], fixed[9]]));
        pos += 10;

        if buf.get(pos..pos + rd_len).is_none() {
            return Err(WireError::TruncatedSection(section));
        }
        let rdata = normalize_rdata(buf, pos, rd_len, rtype)?;
        pos += rd_len;

        records.push(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rdata,
        });
    }
    Ok((records, pos))
}

/// RData is stored uncompressed in memory. Name-bearing RData may arrive
/// compressed against the surrounding datagram, so those names are
/// decoded here and re-encoded flat.
fn normalize_rdata(
    buf: &[u8],
    start: usize,
    len: usize,
    rtype: RecordType,
) -> Result<Vec<u8>, WireError> {
    match rtype {
        RecordType::CNAME | RecordType::NS | RecordType::PTR => {
            let (target, _) = decode_name(buf, start)?;
            encode_name(&target)
        }
        RecordType::MX => {
            if len < 2 {
                return Err(WireError::InvalidRData(
                    "MX rdata shorter than the preference field".to_string(),
                ));
            }
            let mut rdata = buf[start..start + 2].to_vec();
            let (exchange, _) = decode_name(buf, start + 2)?;
            rdata.extend_from_slice(&encode_name(&exchange)?);
            Ok(rdata)
        }
        _ => Ok(buf[start..start + len].to_vec()),
    }
}
