//! Types for reading FDB files
//!

use binrw::BinRead;
use byteorder::{ByteOrder, LittleEndian};
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    io::{Cursor, Read, Seek, SeekFrom},
};
use tracing::instrument;

use crate::{
    compression,
    error::{Error, Result},
    types::{
        AttrRecord, AttributeType, DataDescRecord, DbHeader, ItemRecord, ATTR_RECORD_SIZE,
        HEADER_SIZE, ITEM_RECORD_SIZE,
    },
};

/// FDB database reader
///
/// Owns the loaded file bytes and exposes read-only navigation over them. The header and
/// string table are parsed once at open; everything else is read lazily as items are
/// navigated, so querying never materializes the whole tree.
///
/// Every query method takes `&self` over immutable data, so once a database is open it
/// can be shared freely across threads without locking.
///
/// ```no_run
/// fn read_vertex_count(reader: impl std::io::Read) -> forge_fdb::error::Result<()> {
///     let db = forge_fdb::Database::new(reader)?;
///
///     let models = db.root().child("models")?;
///     if let Some(models) = models {
///         if let Some(count) = models.get_int32("nVertex")? {
///             println!("nVertex: {count}");
///         }
///     }
///
///     Ok(())
/// }
/// ```
pub struct Database {
    data: Vec<u8>,
    header: DbHeader,
    strings: Vec<Box<str>>,
    blocks: Vec<DataDescRecord>,
}

impl Database {
    /// Read a database, collecting its header, string table and data descriptions.
    #[instrument(skip(reader), err)]
    pub fn new<R: Read>(mut reader: R) -> Result<Database> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Database::from_bytes(data)
    }

    /// Open a database over an already-loaded byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Database> {
        let mut cursor = Cursor::new(data.as_slice());
        let header = DbHeader::read(&mut cursor).map_err(|_| Error::InvalidDatabase)?;

        for offset in [
            header.item_offset,
            header.data_desc_offset,
            header.data_offset,
        ] {
            if offset as usize > data.len() {
                return Err(Error::OutOfBounds {
                    offset: u64::from(offset),
                });
            }
        }

        let strings = Database::read_strings(&data, &header)?;
        let blocks = Database::read_data_descs(&mut cursor, &data, &header)?;

        Ok(Database {
            data,
            header,
            strings,
            blocks,
        })
    }

    fn read_strings(data: &[u8], header: &DbHeader) -> Result<Vec<Box<str>>> {
        let mut strings = Vec::with_capacity(header.string_count as usize);

        for ordinal in 0..header.string_count {
            let entry = HEADER_SIZE as usize + ordinal as usize * 4;
            let bytes = data.get(entry..entry + 4).ok_or(Error::OutOfBounds {
                offset: entry as u64,
            })?;
            let start = LittleEndian::read_u32(bytes) as usize;

            let tail = data.get(start..).ok_or(Error::OutOfBounds {
                offset: start as u64,
            })?;
            let end = tail
                .iter()
                .position(|&b| b == 0)
                .ok_or(Error::OutOfBounds {
                    offset: data.len() as u64,
                })?;

            let text = core::str::from_utf8(&tail[..end])
                .map_err(|_| Error::InvalidString { ordinal })?;
            strings.push(text.into());
        }

        // The table is written sorted; anything else means the file is damaged and
        // binary-search lookups would silently miss.
        if strings.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidDatabase);
        }

        Ok(strings)
    }

    fn read_data_descs(
        cursor: &mut Cursor<&[u8]>,
        data: &[u8],
        header: &DbHeader,
    ) -> Result<Vec<DataDescRecord>> {
        cursor.seek(SeekFrom::Start(u64::from(header.data_desc_offset)))?;

        let mut blocks = Vec::with_capacity(header.data_block_count as usize);
        for _ in 0..header.data_block_count {
            let desc = DataDescRecord::read(cursor)?;

            let end = u64::from(desc.offset) + u64::from(desc.stored);
            if end > data.len() as u64 {
                return Err(Error::OutOfBounds { offset: end });
            }

            blocks.push(desc);
        }

        Ok(blocks)
    }

    /// The root item.
    pub fn root(&self) -> Item<'_> {
        Item {
            db: self,
            offset: self.header.item_offset,
        }
    }

    /// The parsed file header.
    pub fn header(&self) -> &DbHeader {
        &self.header
    }

    /// Total size of the loaded file in bytes.
    pub fn file_size(&self) -> usize {
        self.data.len()
    }

    /// Number of entries in the string table.
    pub fn string_count(&self) -> u32 {
        self.header.string_count
    }

    /// Number of data blocks in the file.
    pub fn data_block_count(&self) -> u32 {
        self.header.data_block_count
    }

    /// The data-description table.
    pub fn data_blocks(&self) -> &[DataDescRecord] {
        &self.blocks
    }

    /// Resolve a string ordinal to its text.
    pub fn string(&self, ordinal: u32) -> Result<&str> {
        self.strings
            .get(ordinal as usize)
            .map(AsRef::as_ref)
            .ok_or(Error::IndexOutOfRange { index: ordinal })
    }

    /// Find the ordinal of `text`, if it is in the table.
    ///
    /// The table is sorted, so ordinal order is lexicographic order; this is what lets
    /// item navigation compare ordinals instead of strings.
    fn find_ordinal(&self, text: &str) -> Option<u32> {
        self.strings
            .binary_search_by(|entry| entry.as_ref().cmp(text))
            .ok()
            .map(|index| index as u32)
    }

    fn u32_at(&self, offset: u32) -> Result<u32> {
        let start = offset as usize;
        let bytes = self.data.get(start..start + 4).ok_or(Error::OutOfBounds {
            offset: u64::from(offset),
        })?;
        Ok(LittleEndian::read_u32(bytes))
    }

    fn block_ref(&self, index: u32) -> Result<BlockRef<'_>> {
        if index as usize >= self.blocks.len() {
            return Err(Error::IndexOutOfRange { index });
        }
        Ok(BlockRef { db: self, index })
    }
}

impl Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Database(items at {:#x}, {} strings, {} blocks, {} bytes)",
            self.header.item_offset,
            self.header.string_count,
            self.header.data_block_count,
            self.data.len()
        )
    }
}

/// A read-only view of one item in an open [`Database`]
///
/// Cheap to copy; holds nothing but the owning database and the record offset.
#[derive(Copy, Clone)]
pub struct Item<'a> {
    db: &'a Database,
    offset: u32,
}

impl<'a> Item<'a> {
    fn record(&self) -> Result<ItemRecord> {
        let field = |index: u32| -> Result<u32> {
            let pos = self.offset.checked_add(index * 4).ok_or(Error::OutOfBounds {
                offset: u64::from(self.offset),
            })?;
            self.db.u32_at(pos)
        };

        Ok(ItemRecord {
            name_ordinal: field(0)?,
            parent_offset: field(1)?,
            child_count: field(2)?,
            attrib_count: field(3)?,
        })
    }

    fn child_slot(&self, index: u32) -> Result<u32> {
        index
            .checked_mul(4)
            .and_then(|rel| self.offset.checked_add(ITEM_RECORD_SIZE)?.checked_add(rel))
            .ok_or(Error::OutOfBounds {
                offset: u64::from(self.offset),
            })
    }

    fn attrs_start(&self, record: &ItemRecord) -> Result<u32> {
        record
            .child_count
            .checked_mul(4)
            .and_then(|slots| self.offset.checked_add(ITEM_RECORD_SIZE)?.checked_add(slots))
            .ok_or(Error::OutOfBounds {
                offset: u64::from(self.offset),
            })
    }

    fn attr_record_at(&self, start: u32, index: u32) -> Result<AttrRecord> {
        let pos = index
            .checked_mul(ATTR_RECORD_SIZE)
            .and_then(|rel| start.checked_add(rel))
            .ok_or(Error::OutOfBounds {
                offset: u64::from(start),
            })?;

        Ok(AttrRecord {
            keyed: self.db.u32_at(pos)?,
            value: self.db.u32_at(pos + 4)?,
        })
    }

    /// The name of this item.
    pub fn name(&self) -> Result<&'a str> {
        self.db.string(self.record()?.name_ordinal)
    }

    /// The parent of this item, `None` for the root.
    pub fn parent(&self) -> Result<Option<Item<'a>>> {
        let record = self.record()?;
        Ok((record.parent_offset != 0).then(|| Item {
            db: self.db,
            offset: record.parent_offset,
        }))
    }

    /// Number of children of this item.
    pub fn child_count(&self) -> Result<u32> {
        Ok(self.record()?.child_count)
    }

    /// Number of attributes on this item.
    pub fn attribute_count(&self) -> Result<u32> {
        Ok(self.record()?.attrib_count)
    }

    /// The child at `index` in name-sorted order.
    pub fn child_at(&self, index: u32) -> Result<Item<'a>> {
        let record = self.record()?;
        if index >= record.child_count {
            return Err(Error::IndexOutOfRange { index });
        }

        let slot = self.child_slot(index)?;
        Ok(Item {
            db: self.db,
            offset: self.db.u32_at(slot)?,
        })
    }

    /// Look up a child by name.
    ///
    /// Binary search over the name-sorted child list; siblings that do not match are
    /// never materialized. Absence is `Ok(None)`, never an error.
    pub fn child(&self, name: &str) -> Result<Option<Item<'a>>> {
        let Some(ordinal) = self.db.find_ordinal(name) else {
            return Ok(None);
        };
        let record = self.record()?;

        let (mut lo, mut hi) = (0u32, record.child_count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let child = Item {
                db: self.db,
                offset: self.db.u32_at(self.child_slot(mid)?)?,
            };

            match self.db.u32_at(child.offset)?.cmp(&ordinal) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Ok(Some(child)),
            }
        }

        Ok(None)
    }

    /// Look up an attribute by key.
    ///
    /// Binary search over the key-sorted attribute records. Absence is `Ok(None)`.
    pub fn attribute(&self, key: &str) -> Result<Option<Value<'a>>> {
        let Some(ordinal) = self.db.find_ordinal(key) else {
            return Ok(None);
        };
        let record = self.record()?;
        let start = self.attrs_start(&record)?;

        let (mut lo, mut hi) = (0u32, record.attrib_count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let attr = self.attr_record_at(start, mid)?;

            match attr.key_ordinal().cmp(&ordinal) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return self.decode(attr).map(Some),
            }
        }

        Ok(None)
    }

    /// The attribute at `index` in key-sorted order.
    pub fn attribute_at(&self, index: u32) -> Result<(&'a str, Value<'a>)> {
        let record = self.record()?;
        if index >= record.attrib_count {
            return Err(Error::IndexOutOfRange { index });
        }

        let attr = self.attr_record_at(self.attrs_start(&record)?, index)?;
        Ok((self.db.string(attr.key_ordinal())?, self.decode(attr)?))
    }

    fn decode(&self, record: AttrRecord) -> Result<Value<'a>> {
        Ok(match record.attribute_type()? {
            AttributeType::Int32 => Value::Int32(record.value as i32),
            AttributeType::Float32 => Value::Float32(f32::from_bits(record.value)),
            AttributeType::Bool => Value::Bool(record.value != 0),
            AttributeType::String => Value::String(self.db.string(record.value)?),
            AttributeType::Blob => Value::Blob(self.db.block_ref(record.value)?),
            AttributeType::Int32Array => Value::Int32Array(self.db.block_ref(record.value)?),
            AttributeType::Float32Array => Value::Float32Array(self.db.block_ref(record.value)?),
        })
    }

    fn mismatch(&self, key: &str, expected: AttributeType, actual: &Value<'_>) -> Error {
        Error::TypeMismatch {
            key: key.to_owned(),
            expected,
            actual: actual.attribute_type(),
        }
    }

    /// Fetch an int32 attribute.
    pub fn get_int32(&self, key: &str) -> Result<Option<i32>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Int32(value)) => Ok(Some(value)),
            Some(other) => Err(self.mismatch(key, AttributeType::Int32, &other)),
        }
    }

    /// Fetch a float32 attribute.
    pub fn get_float32(&self, key: &str) -> Result<Option<f32>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Float32(value)) => Ok(Some(value)),
            Some(other) => Err(self.mismatch(key, AttributeType::Float32, &other)),
        }
    }

    /// Fetch a bool attribute.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(value)),
            Some(other) => Err(self.mismatch(key, AttributeType::Bool, &other)),
        }
    }

    /// Fetch a string attribute.
    pub fn get_string(&self, key: &str) -> Result<Option<&'a str>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(self.mismatch(key, AttributeType::String, &other)),
        }
    }

    /// Fetch a blob attribute's payload, decompressing if it was stored compressed.
    pub fn get_data(&self, key: &str) -> Result<Option<Cow<'a, [u8]>>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Blob(block)) => Ok(Some(block.bytes()?)),
            Some(other) => Err(self.mismatch(key, AttributeType::Blob, &other)),
        }
    }

    /// Fetch an int32 array attribute.
    pub fn get_int32_array(&self, key: &str) -> Result<Option<Vec<i32>>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Int32Array(block)) => Ok(Some(block.int32_values()?)),
            Some(other) => Err(self.mismatch(key, AttributeType::Int32Array, &other)),
        }
    }

    /// Fetch a float32 array attribute.
    pub fn get_float32_array(&self, key: &str) -> Result<Option<Vec<f32>>> {
        match self.attribute(key)? {
            None => Ok(None),
            Some(Value::Float32Array(block)) => Ok(Some(block.float32_values()?)),
            Some(other) => Err(self.mismatch(key, AttributeType::Float32Array, &other)),
        }
    }
}

impl Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Item({:#x})", self.offset)
    }
}

/// A decoded attribute value
#[derive(Debug, Copy, Clone)]
pub enum Value<'a> {
    /// A 32-bit signed integer
    Int32(i32),
    /// A 32-bit float
    Float32(f32),
    /// A boolean
    Bool(bool),
    /// A string from the table
    String(&'a str),
    /// An opaque byte payload
    Blob(BlockRef<'a>),
    /// Packed i32 elements
    Int32Array(BlockRef<'a>),
    /// Packed f32 elements
    Float32Array(BlockRef<'a>),
}

impl Value<'_> {
    /// The on-disk type of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Value::Int32(_) => AttributeType::Int32,
            Value::Float32(_) => AttributeType::Float32,
            Value::Bool(_) => AttributeType::Bool,
            Value::String(_) => AttributeType::String,
            Value::Blob(_) => AttributeType::Blob,
            Value::Int32Array(_) => AttributeType::Int32Array,
            Value::Float32Array(_) => AttributeType::Float32Array,
        }
    }
}

/// Reference to one data block in an open [`Database`]
///
/// Fetching the payload is lazy; a block's bytes are only touched (and decompressed)
/// when [`BlockRef::bytes`] is called.
#[derive(Copy, Clone)]
pub struct BlockRef<'a> {
    db: &'a Database,
    index: u32,
}

impl<'a> BlockRef<'a> {
    fn desc(&self) -> &DataDescRecord {
        &self.db.blocks[self.index as usize]
    }

    /// Index of this block in the data-description table.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Payload size before compression.
    pub fn size(&self) -> u32 {
        self.desc().uncompressed
    }

    /// Payload size as stored in the file.
    pub fn stored_size(&self) -> u32 {
        self.desc().stored
    }

    /// Whether the stored payload is compressed.
    pub fn is_compressed(&self) -> bool {
        let desc = self.desc();
        desc.stored != desc.uncompressed
    }

    /// The payload bytes, decompressed if necessary.
    ///
    /// A block that fails to decompress is corrupt on its own; other blocks and the rest
    /// of the database stay readable.
    pub fn bytes(&self) -> Result<Cow<'a, [u8]>> {
        let desc = self.desc();
        let start = desc.offset as usize;
        let stored = &self.db.data[start..start + desc.stored as usize];

        if desc.stored == desc.uncompressed {
            return Ok(Cow::Borrowed(stored));
        }

        compression::decompress(stored, desc.uncompressed as usize)
            .map(Cow::Owned)
            .map_err(|source| Error::CorruptBlock {
                index: self.index,
                source: Box::new(source),
            })
    }

    /// Decode the payload as packed little-endian i32 elements.
    pub fn int32_values(&self) -> Result<Vec<i32>> {
        let bytes = self.bytes()?;
        if bytes.len() % 4 != 0 {
            return Err(Error::RaggedArray { len: bytes.len() });
        }
        Ok(bytes.chunks_exact(4).map(LittleEndian::read_i32).collect())
    }

    /// Decode the payload as packed little-endian f32 elements.
    pub fn float32_values(&self) -> Result<Vec<f32>> {
        let bytes = self.bytes()?;
        if bytes.len() % 4 != 0 {
            return Err(Error::RaggedArray { len: bytes.len() });
        }
        Ok(bytes.chunks_exact(4).map(LittleEndian::read_f32).collect())
    }
}

impl Debug for BlockRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let desc = self.desc();
        write!(
            f,
            "BlockRef(index={}, size={}, stored={})",
            self.index, desc.uncompressed, desc.stored
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::Database;

    /// Root with one child "a" holding one int32 attribute "n" = 7.
    #[rustfmt::skip]
    fn single_child_fixture() -> Vec<u8> {
        vec![
            // Header
            b'F', b'D', b'B', b'0', b'0', b'0', b'0', b'1',
            0x30, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x5C, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            // Strings: "", "a", "n"
            0x28, 0x00, 0x00, 0x00,
            0x29, 0x00, 0x00, 0x00,
            0x2B, 0x00, 0x00, 0x00,
            0x00, 0x61, 0x00, 0x6E, 0x00, 0x00, 0x00, 0x00,
            // Root record with one child slot
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x44, 0x00, 0x00, 0x00,
            // Child "a" with one int32 attribute "n" = 7
            0x01, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00,
        ]
    }

    /// Root with one raw blob attribute "data" = [1, 2, 3, 4].
    #[rustfmt::skip]
    fn blob_fixture() -> Vec<u8> {
        vec![
            // Header
            b'F', b'D', b'B', b'0', b'0', b'0', b'0', b'1',
            0x2C, 0x00, 0x00, 0x00,
            0x44, 0x00, 0x00, 0x00,
            0x50, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            // Strings: "", "data"
            0x24, 0x00, 0x00, 0x00,
            0x25, 0x00, 0x00, 0x00,
            0x00, 0x64, 0x61, 0x74, 0x61, 0x00, 0x00, 0x00,
            // Root record with one blob attribute
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0x00,
            // Data description: 4 bytes raw at 0x50
            0x04, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x50, 0x00, 0x00, 0x00,
            // Data
            0x01, 0x02, 0x03, 0x04,
        ]
    }

    #[test]
    fn read_invalid_magic() {
        let mut input = single_child_fixture();
        input[7] = b'2';

        assert!(matches!(
            Database::from_bytes(input),
            Err(Error::InvalidDatabase)
        ));
    }

    #[test]
    fn read_truncated_header() {
        let input = single_child_fixture()[..20].to_vec();

        assert!(matches!(
            Database::from_bytes(input),
            Err(Error::InvalidDatabase)
        ));
    }

    #[test]
    fn read_item_offset_out_of_bounds() {
        let mut input = single_child_fixture();
        // item_offset = 0xFFFF, far past the end of the 92-byte file
        input[8] = 0xFF;
        input[9] = 0xFF;

        assert!(matches!(
            Database::from_bytes(input),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn navigate_single_child() -> Result<()> {
        let db = Database::from_bytes(single_child_fixture())?;

        let root = db.root();
        assert_eq!(root.name()?, "");
        assert_eq!(root.child_count()?, 1);

        let child = root.child("a")?.expect("child should be found");
        assert_eq!(child.name()?, "a");
        assert_eq!(child.get_int32("n")?, Some(7));
        assert_eq!(child.parent()?.expect("child has a parent").name()?, "");

        Ok(())
    }

    #[test]
    fn missing_child_and_attribute_are_not_errors() -> Result<()> {
        let db = Database::from_bytes(single_child_fixture())?;

        assert!(db.root().child("b")?.is_none());
        assert!(db.root().child("a")?.unwrap().get_int32("m")?.is_none());

        Ok(())
    }

    #[test]
    fn type_mismatch_is_an_error() -> Result<()> {
        let db = Database::from_bytes(single_child_fixture())?;
        let child = db.root().child("a")?.unwrap();

        assert!(matches!(
            child.get_string("n"),
            Err(Error::TypeMismatch { .. })
        ));

        Ok(())
    }

    #[test]
    fn unknown_type_tag_is_an_error() -> Result<()> {
        let mut input = single_child_fixture();
        // High byte of the attribute's keyed-type field
        input[87] = 0x0F;

        let db = Database::from_bytes(input)?;
        let child = db.root().child("a")?.unwrap();

        assert!(matches!(
            child.attribute("n"),
            Err(Error::UnknownTypeTag { tag: 0x0F })
        ));

        Ok(())
    }

    #[test]
    fn read_raw_blob() -> Result<()> {
        let db = Database::from_bytes(blob_fixture())?;

        let data = db.root().get_data("data")?.expect("blob should be found");
        assert_eq!(data.as_ref(), &[1, 2, 3, 4]);

        Ok(())
    }

    #[test]
    fn corrupt_block_is_surfaced_distinctly() -> Result<()> {
        let mut input = blob_fixture();
        // Claim 8 uncompressed bytes; the stored 4 are not a zlib stream.
        input[68] = 0x08;

        let db = Database::from_bytes(input)?;

        assert!(matches!(
            db.root().get_data("data"),
            Err(Error::CorruptBlock { index: 0, .. })
        ));

        Ok(())
    }

    #[test]
    fn data_desc_past_eof_is_rejected() {
        let mut input = blob_fixture();
        // Stored size larger than the remaining file
        input[72] = 0xFF;

        assert!(matches!(
            Database::from_bytes(input),
            Err(Error::OutOfBounds { .. })
        ));
    }
}
