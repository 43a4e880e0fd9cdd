//! RFC 1035 wire format: message model, parser and packer.
//!
//! Messages are at most 512 octets on the wire; anything that would not
//! fit is truncated at a record boundary with the TC flag set. Name
//! compression is handled transparently in both directions.

mod message;
mod name;
mod packer;
mod parser;

pub use message::{
    DnsHeader, DnsMessage, HeaderFlags, Question, ResourceRecord, RCODE_FORMERR, RCODE_NOERROR,
    RCODE_NXDOMAIN, RCODE_SERVFAIL,
};
pub use name::{decode_name, encode_name};
pub use packer::pack_message;
pub use parser::parse_message;

use thiserror::Error;

/// Fixed DNS header size in octets.
pub const HEADER_LEN: usize = 12;

/// Maximum UDP datagram the server emits.
pub const MAX_DATAGRAM_LEN: usize = 512;

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of an encoded name, terminating zero included.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("buffer too short to contain a DNS header")]
    ShortBuffer,

    #[error("{0} section runs past the end of the buffer")]
    TruncatedSection(&'static str),

    #[error("compression pointer loop while decoding a name")]
    PointerLoop,

    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("invalid rdata: {0}")]
    InvalidRData(String),
}
