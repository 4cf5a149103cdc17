//! This library handles building, writing and querying **FDB** asset database files.
//!
//! # FDB Asset Database Format Documentation
//!
//! This crate provides utilities to build a hierarchical tree of named items at asset-build
//! time and to serialize that tree into a single compact, random-access binary file. The
//! resulting file can be queried (child by name, attribute by key, payload by reference)
//! without deserializing the whole tree. FDB files are typically identified with the `.fdb`
//! extension.
//!
//! ## File Structure
//!
//! An FDB file consists of a header, a string section, an item section, a data-description
//! table, and a data section.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 8 bytes: "FDB00001" (format marker and version)            |
//! | 0x0008         | Item Offset            | 4 bytes: Offset to the item section                        |
//! | 0x000C         | Data Desc Offset       | 4 bytes: Offset to the data-description table              |
//! | 0x0010         | Data Offset            | 4 bytes: Offset to the data section                        |
//! | 0x0014         | String Count           | 4 bytes: Number of entries in the string section           |
//! | 0x0018         | Data Block Count       | 4 bytes: Number of entries in the data-description table   |
//!
//! The header is written last: every one of its fields depends on section sizes that are
//! only known once each section has been fully emitted, so the writer reserves the header
//! up front and backpatches it.
//!
//! ### String Section
//!
//! Immediately after the header. Every string used as an item name, attribute key or
//! string-typed attribute value is stored here exactly once, sorted lexicographically.
//! The position of a string in this sorted order is its **ordinal**; item and attribute
//! records refer to strings only by ordinal, which is what makes binary-search lookups
//! possible on the read side.
//!
//! | Field          | Description                                                         |
//! |----------------|---------------------------------------------------------------------|
//! | Offsets        | String Count x 4 bytes: absolute file offset of each string         |
//! | Bytes          | String Count NUL-terminated UTF-8 strings in ordinal order          |
//! | Padding        | Zero bytes up to the next 4-byte boundary                           |
//!
//! ### Item Section
//!
//! A pre-order sequence of item records. Children are emitted sorted by name and
//! attributes sorted by key, so both lists can be binary searched on disk. Each record:
//!
//! | Field          | Description                                                         |
//! |----------------|---------------------------------------------------------------------|
//! | Name Ordinal   | 4 bytes: ordinal of the item's name                                 |
//! | Parent Offset  | 4 bytes: absolute offset of the parent's record, 0 for the root     |
//! | Child Count    | 4 bytes: number of child items                                      |
//! | Attrib Count   | 4 bytes: number of attributes                                       |
//! | Child Offsets  | Child Count x 4 bytes: absolute offset of each child's record       |
//! | Attributes     | Attrib Count x 8 bytes: attribute records, see below                |
//!
//! A child's file offset is only known after the child has been completely serialized, so
//! the writer emits zero placeholders for the child-offset list and backpatches each slot
//! once the corresponding subtree is done.
//!
//! ### Attribute Records
//!
//! | Field          | Description                                                         |
//! |----------------|---------------------------------------------------------------------|
//! | Keyed Type     | 4 bytes: key ordinal in the low 24 bits, type tag in the high 8     |
//! | Value          | 4 bytes: inline scalar, string ordinal, or data-block index         |
//!
//! Type tags: Int32 = 0, Float32 = 1, Bool = 2, String = 3, Blob = 4, Int32Array = 5,
//! Float32Array = 6. Scalars are stored inline (floats as IEEE-754 bits, bools as 0/1);
//! `String` stores a string ordinal; blob and array types store an index into the
//! data-description table. Array payloads are the little-endian concatenation of their
//! elements.
//!
//! ### Data-Description Table
//!
//! | Field             | Description                                                      |
//! |-------------------|------------------------------------------------------------------|
//! | Uncompressed Size | 4 bytes: payload size before compression                         |
//! | Stored Size       | 4 bytes: payload size as stored in the file                      |
//! | File Offset       | 4 bytes: absolute offset of the stored payload                   |
//!
//! A payload is zlib-compressed when the builder asked for it and the compressed form is
//! strictly smaller; otherwise it is stored raw. A block is compressed exactly when its
//! stored size differs from its uncompressed size, so no method field is needed.
//!
//! ### Data Section
//!
//! The stored payload bytes of every data block, concatenated in registration order.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.fdb`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Determinism**: children, attributes and strings are all sorted before emission, so
//!   the file layout is a pure function of tree content, not of the order the build calls
//!   were made in.
//!

pub mod compression;
pub mod error;
pub mod intern;
pub mod read;
pub mod tree;
pub mod types;
pub mod write;

pub use compression::CompressionMethod;
pub use intern::{StringHandle, StringPool};
pub use read::{Database, Item, Value};
pub use tree::{ItemId, ItemTree};
pub use write::{DbWriter, DbWriterOptions};
