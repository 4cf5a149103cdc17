//! Base types for the structure of FDB files.

use std::fmt;

use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};

/// Size of the serialized [`DbHeader`] including its magic marker
pub const HEADER_SIZE: u32 = 28;

/// Size of a serialized [`ItemRecord`] excluding child offsets and attributes
pub const ITEM_RECORD_SIZE: u32 = 16;

/// Size of a serialized [`AttrRecord`]
pub const ATTR_RECORD_SIZE: u32 = 8;

/// Size of a serialized [`DataDescRecord`]
pub const DATA_DESC_RECORD_SIZE: u32 = 12;

/// Largest string ordinal that fits the 24-bit key field of an [`AttrRecord`]
pub const MAX_KEY_ORDINAL: u32 = 0x00FF_FFFF;

/// FDB file header
///
/// Starts with the 8-byte marker "FDB00001" (format plus version), followed by the section
/// offsets and counts. All data is stored in little endian format. The offsets are only
/// known once the sections have been written, so the writer emits a zeroed header first
/// and backpatches it at the end of the save.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"FDB00001", little)]
pub struct DbHeader {
    /// The offset from the beginning of the file where the item section starts
    pub item_offset: u32,

    /// The offset from the beginning of the file where the data-description table starts
    pub data_desc_offset: u32,

    /// The offset from the beginning of the file where the data section starts
    pub data_offset: u32,

    /// The number of entries in the string section
    pub string_count: u32,

    /// The number of entries in the data-description table
    pub data_block_count: u32,
}

/// Fixed part of an item record
///
/// Followed in the file by `child_count` x 4-byte child offsets and `attrib_count`
/// attribute records.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct ItemRecord {
    /// Ordinal of this item's name in the string section
    pub name_ordinal: u32,

    /// Absolute offset of the parent's record, 0 for the root
    pub parent_offset: u32,

    /// The number of child items
    pub child_count: u32,

    /// The number of attributes
    pub attrib_count: u32,
}

/// The type of value an attribute holds
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttributeType {
    /// A 32-bit signed integer stored inline
    Int32,
    /// A 32-bit float stored inline as its IEEE-754 bits
    Float32,
    /// A boolean stored inline as 0 or 1
    Bool,
    /// A string ordinal
    String,
    /// A data-block index to an opaque byte payload
    Blob,
    /// A data-block index to packed little-endian i32 elements
    Int32Array,
    /// A data-block index to packed little-endian f32 elements
    Float32Array,
}

impl AttributeType {
    /// The tag stored in the high 8 bits of an attribute's keyed-type field
    pub const fn tag(self) -> u8 {
        match self {
            AttributeType::Int32 => 0,
            AttributeType::Float32 => 1,
            AttributeType::Bool => 2,
            AttributeType::String => 3,
            AttributeType::Blob => 4,
            AttributeType::Int32Array => 5,
            AttributeType::Float32Array => 6,
        }
    }

    /// Decode a tag read from disk
    pub const fn from_tag(tag: u8) -> Option<AttributeType> {
        match tag {
            0 => Some(AttributeType::Int32),
            1 => Some(AttributeType::Float32),
            2 => Some(AttributeType::Bool),
            3 => Some(AttributeType::String),
            4 => Some(AttributeType::Blob),
            5 => Some(AttributeType::Int32Array),
            6 => Some(AttributeType::Float32Array),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::Int32 => "int32",
            AttributeType::Float32 => "float32",
            AttributeType::Bool => "bool",
            AttributeType::String => "string",
            AttributeType::Blob => "blob",
            AttributeType::Int32Array => "int32[]",
            AttributeType::Float32Array => "float32[]",
        };
        f.write_str(name)
    }
}

/// Attribute record
///
/// `keyed` packs the key's string ordinal into the low 24 bits and the type tag into the
/// high 8 bits. `value` is an inline scalar, a string ordinal, or a data-block index
/// depending on the tag.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct AttrRecord {
    /// Packed key ordinal and type tag
    pub keyed: u32,

    /// Inline scalar, string ordinal, or data-block index
    pub value: u32,
}

impl AttrRecord {
    /// Pack a key ordinal and type tag into a record.
    ///
    /// The ordinal must already have been checked against [`MAX_KEY_ORDINAL`].
    pub fn pack(ty: AttributeType, key_ordinal: u32, value: u32) -> AttrRecord {
        debug_assert!(key_ordinal <= MAX_KEY_ORDINAL);
        AttrRecord {
            keyed: (u32::from(ty.tag()) << 24) | key_ordinal,
            value,
        }
    }

    /// The ordinal of this attribute's key
    pub const fn key_ordinal(&self) -> u32 {
        self.keyed & MAX_KEY_ORDINAL
    }

    /// The type of value this attribute holds
    pub fn attribute_type(&self) -> Result<AttributeType> {
        let tag = (self.keyed >> 24) as u8;
        AttributeType::from_tag(tag).ok_or(Error::UnknownTypeTag { tag })
    }
}

/// Data-description table entry
///
/// A block is compressed exactly when `stored` differs from `uncompressed`.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct DataDescRecord {
    /// The size of the payload before compression
    pub uncompressed: u32,

    /// The size of the payload as stored in the file
    pub stored: u32,

    /// The absolute offset of the stored payload
    pub offset: u32,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{AttrRecord, AttributeType, DataDescRecord, DbHeader, ItemRecord};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'F', b'D', b'B', b'0', b'0', b'0', b'0', b'1',
            0x30, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = DbHeader {
            item_offset: 48,
            data_desc_offset: 92,
            data_offset: 92,
            string_count: 3,
            data_block_count: 0,
        };

        assert_eq!(DbHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_header_bad_magic() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'F', b'D', b'B', b'0', b'0', b'0', b'0', b'2',
            0x30, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        assert!(DbHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            b'F', b'D', b'B', b'0', b'0', b'0', b'0', b'1',
            0x30, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
        ];

        let header = DbHeader {
            item_offset: 48,
            data_desc_offset: 92,
            data_offset: 92,
            string_count: 3,
            data_block_count: 1,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_item_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
        ]);

        let expected = ItemRecord {
            name_ordinal: 1,
            parent_offset: 48,
            child_count: 2,
            attrib_count: 5,
        };

        assert_eq!(ItemRecord::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_data_desc_record() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x30, 0x00, 0x00, 0x00,
            0x18, 0x00, 0x00, 0x00,
            0x64, 0x00, 0x00, 0x00,
        ];

        let record = DataDescRecord {
            uncompressed: 48,
            stored: 24,
            offset: 100,
        };

        let mut actual = Vec::new();
        record.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn attr_record_packing() -> Result<()> {
        let record = AttrRecord::pack(AttributeType::Float32Array, 0x00AB_CDEF, 7);

        assert_eq!(record.keyed, 0x06AB_CDEF);
        assert_eq!(record.key_ordinal(), 0x00AB_CDEF);
        assert_eq!(record.attribute_type()?, AttributeType::Float32Array);
        assert_eq!(record.value, 7);

        Ok(())
    }

    #[test]
    fn attr_record_unknown_tag() {
        let record = AttrRecord {
            keyed: 0x0F00_0001,
            value: 0,
        };

        assert!(matches!(
            record.attribute_type(),
            Err(Error::UnknownTypeTag { tag: 0x0F })
        ));
    }

    #[test]
    fn attribute_type_tags_round_trip() {
        for ty in [
            AttributeType::Int32,
            AttributeType::Float32,
            AttributeType::Bool,
            AttributeType::String,
            AttributeType::Blob,
            AttributeType::Int32Array,
            AttributeType::Float32Array,
        ] {
            assert_eq!(AttributeType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(AttributeType::from_tag(7), None);
    }
}
