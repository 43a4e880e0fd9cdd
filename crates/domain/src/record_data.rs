//! Text ⇄ wire conversion for RData.
//!
//! The store and the cache carry RData as text ("192.0.2.10",
//! "mx1.example.com.", "10 mx1.example.com."); the wire side carries
//! network-ready octets. This module is the only place that crosses
//! that boundary.

use crate::errors::DomainError;
use crate::record_type::RecordType;
use crate::wire::encode_name;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Encodes a record's text RData into wire-form octets.
///
/// Name-bearing types produce uncompressed label sequences; the packer
/// applies compression when the record is written into a datagram.
pub fn encode_rdata(rtype: RecordType, text: &str) -> Result<Vec<u8>, DomainError> {
    match rtype {
        RecordType::A => {
            let addr: Ipv4Addr = text.parse().map_err(|_| {
                DomainError::InvalidRecordData(format!("'{}' is not an IPv4 address", text))
            })?;
            Ok(addr.octets().to_vec())
        }
        RecordType::AAAA => {
            let addr: Ipv6Addr = text.parse().map_err(|_| {
                DomainError::InvalidRecordData(format!("'{}' is not an IPv6 address", text))
            })?;
            Ok(addr.octets().to_vec())
        }
        RecordType::CNAME | RecordType::NS | RecordType::PTR => {
            let target = text.trim_end_matches('.');
            if target.is_empty() {
                return Err(DomainError::InvalidRecordData(
                    "target domain name cannot be empty".to_string(),
                ));
            }
            if target.chars().any(char::is_whitespace) {
                return Err(DomainError::InvalidRecordData(format!(
                    "target domain name '{}' contains whitespace",
                    text
                )));
            }
            Ok(encode_name(target)?)
        }
        RecordType::MX => {
            let (preference, exchange) = text.split_once(' ').ok_or_else(|| {
                DomainError::InvalidRecordData(
                    "MX rdata must be 'PREFERENCE EXCHANGE'".to_string(),
                )
            })?;
            let preference: u16 = preference.trim().parse().map_err(|_| {
                DomainError::InvalidRecordData(format!(
                    "'{}' is not a valid MX preference",
                    preference
                ))
            })?;
            let exchange = exchange.trim().trim_end_matches('.');
            if exchange.is_empty() {
                return Err(DomainError::InvalidRecordData(
                    "MX exchange cannot be empty".to_string(),
                ));
            }
            let mut rdata = preference.to_be_bytes().to_vec();
            rdata.extend_from_slice(&encode_name(exchange)?);
            Ok(rdata)
        }
        RecordType::TXT => {
            let bytes = text.as_bytes();
            if bytes.is_empty() {
                return Ok(vec![0]);
            }
            // Each character-string holds at most 255 octets; longer
            // text spills into additional strings.
            let mut rdata = Vec::with_capacity(bytes.len() + bytes.len() / 255 + 1);
            for chunk in bytes.chunks(255) {
                rdata.push(chunk.len() as u8);
                rdata.extend_from_slice(chunk);
            }
            Ok(rdata)
        }
        other => Err(DomainError::InvalidRecordData(format!(
            "no text encoding for record type {}",
            other
        ))),
    }
}
