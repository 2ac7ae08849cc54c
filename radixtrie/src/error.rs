use std::net::AddrParseError;
use std::num::ParseIntError;

/// Errors raised when translating textual address prefixes to and from binary keys.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("prefix `{0}` has no `/length` part")]
    MissingLength(String),
    #[error("prefix `{input}` has an invalid address")]
    InvalidAddress {
        input: String,
        #[source]
        source: AddrParseError,
    },
    #[error("prefix `{input}` has an invalid length")]
    InvalidLength {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("prefix length {length} exceeds {max} bits")]
    LengthOutOfRange { length: usize, max: usize },
    #[error("prefix `{0}` is not an IPv4 prefix")]
    UnsupportedFamily(String),
    #[error("key symbol {symbol:#04x} at position {position} is neither '0' nor '1'")]
    NonBinarySymbol { position: usize, symbol: u8 },
}
