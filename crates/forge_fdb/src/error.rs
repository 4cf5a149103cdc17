//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::AttributeType;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is not a valid asset database
    #[error("file is not a valid asset database")]
    InvalidDatabase,

    /// string contains an embedded nul byte
    #[error("string contains an embedded nul byte")]
    StringContainsNul,

    /// string is too long for the pool; store it as a blob attribute instead
    #[error("string of {len} bytes exceeds the pool limit of {max}")]
    StringTooLong {
        /// Length of the rejected string
        len: usize,
        /// Configured pool limit
        max: usize,
    },

    /// child names must not be empty
    #[error("child names must not be empty")]
    EmptyChildName,

    /// the string table outgrew the 24-bit key ordinal field
    #[error("string table holds {count} entries, more than a key ordinal can address")]
    TooManyStrings {
        /// Number of interned strings
        count: usize,
    },

    /// an item holds more children or attributes than a record counter can represent
    #[error("item {name:?} holds more {kind} than the record counter can represent")]
    CounterOverflow {
        /// Name of the offending item
        name: String,
        /// Which counter overflowed
        kind: &'static str,
    },

    /// a section grew past the range of 32-bit file offsets
    #[error("database exceeds the 4 GiB range of 32-bit file offsets")]
    OffsetOverflow,

    /// an offset read from the file points outside its bounds
    #[error("offset {offset:#x} is outside the file bounds")]
    OutOfBounds {
        /// The offending absolute offset
        offset: u64,
    },

    /// a string table entry is not valid UTF-8
    #[error("string table entry {ordinal} is not valid UTF-8")]
    InvalidString {
        /// Ordinal of the offending entry
        ordinal: u32,
    },

    /// an index read from the file points outside the table it refers to
    #[error("no entry at index {index}")]
    IndexOutOfRange {
        /// The offending index
        index: u32,
    },

    /// an attribute record carries a type tag this version does not know
    #[error("unknown attribute type tag {tag:#04x}")]
    UnknownTypeTag {
        /// The offending tag
        tag: u8,
    },

    /// an attribute exists under the key but holds a different type
    #[error("attribute {key:?} is a {actual}, not a {expected}")]
    TypeMismatch {
        /// The requested key
        key: String,
        /// The type the caller asked for
        expected: AttributeType,
        /// The type stored in the file
        actual: AttributeType,
    },

    /// a stored payload did not decompress to its recorded size
    #[error("decompressed {actual} bytes where {expected} were recorded")]
    DecompressedSizeMismatch {
        /// Size recorded in the data-description table
        expected: usize,
        /// Size actually produced
        actual: usize,
    },

    /// an array payload is not a whole number of elements
    #[error("array payload of {len} bytes is not a whole number of elements")]
    RaggedArray {
        /// Payload length in bytes
        len: usize,
    },

    /// corruption local to one data block; the rest of the database stays readable
    #[error("data block {index} is corrupt")]
    CorruptBlock {
        /// Index into the data-description table
        index: u32,
        /// What went wrong while reading the block
        #[source]
        source: Box<Error>,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
