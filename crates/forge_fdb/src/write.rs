//! Types for writing FDB files
//!

use binrw::BinWrite;
use bon::Builder;
use byteorder::{LittleEndian, WriteBytesExt};
use std::borrow::Cow;
use std::io::{Seek, SeekFrom, Write};
use tracing::instrument;

use crate::compression::{self, CompressionMethod, MIN_COMPRESS_SIZE};
use crate::error::{Error, Result};
use crate::intern::SortedStrings;
use crate::tree::{AttrValue, ItemId, ItemTree};
use crate::types::{
    AttrRecord, AttributeType, DataDescRecord, DbHeader, ItemRecord, MAX_KEY_ORDINAL,
};

/// Options for how the FDB file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct DbWriterOptions {
    /// The compression method to attempt for data block payloads
    #[builder(default)]
    pub compression: CompressionMethod,
}

/// A payload registered during item emission, written out in the data section
struct PendingBlock<'a> {
    bytes: Cow<'a, [u8]>,
    compress: bool,
}

/// FDB file generator
///
/// Serializes a finished [`ItemTree`] in one forward pass. Child offsets, the
/// data-description table and the header are backpatched once their values are known,
/// which is why the target must be seekable.
///
/// ```
/// # fn doit() -> forge_fdb::error::Result<()>
/// # {
/// use forge_fdb::{DbWriter, ItemTree};
/// use forge_fdb::write::DbWriterOptions;
///
/// let mut tree = ItemTree::new();
/// let models = tree.fetch_child(tree.root(), "models")?;
/// tree.set_int32(models, "count", 1)?;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let writer = DbWriter::new(
///     std::io::Cursor::new(Vec::new()),
///     DbWriterOptions::builder()
///         .compression(forge_fdb::CompressionMethod::Zlib)
///         .build(),
/// );
/// writer.save(&tree)?;
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct DbWriter<W: Write + Seek> {
    inner: W,
    options: DbWriterOptions,
}

impl<W: Write + Seek> DbWriter<W> {
    /// Initializes the writer.
    ///
    /// Nothing is written until [`DbWriter::save`] is called.
    pub fn new(inner: W, options: DbWriterOptions) -> DbWriter<W> {
        DbWriter { inner, options }
    }

    /// Serialize the whole tree and return the inner writer.
    ///
    /// The output depends only on the tree's content: strings are written sorted, and
    /// every item's children and attributes are sorted before emission, so equivalent
    /// trees built through different call orders produce byte-identical files.
    #[instrument(skip_all, err, fields(items = tree.item_count()))]
    pub fn save(mut self, tree: &ItemTree) -> Result<W> {
        let pool = tree.strings();
        if pool.len() > MAX_KEY_ORDINAL as usize + 1 {
            return Err(Error::TooManyStrings { count: pool.len() });
        }
        let sorted = pool.sorted_ordinals();

        let mut header = DbHeader {
            string_count: pool.len() as u32,
            ..Default::default()
        };
        header.write(&mut self.inner)?;

        self.write_string_section(tree, &sorted)?;

        header.item_offset = self.position()?;
        let mut blocks = Vec::new();
        self.write_item(tree, tree.root(), 0, &sorted.ordinal_of, &mut blocks)?;

        header.data_desc_offset = self.position()?;
        header.data_block_count = blocks.len() as u32;
        for _ in 0..blocks.len() {
            DataDescRecord::default().write(&mut self.inner)?;
        }

        header.data_offset = self.position()?;
        let descs = self.write_data_section(&blocks)?;

        let end = self.inner.stream_position()?;

        self.inner
            .seek(SeekFrom::Start(u64::from(header.data_desc_offset)))?;
        for desc in &descs {
            desc.write(&mut self.inner)?;
        }

        self.inner.seek(SeekFrom::Start(0))?;
        header.write(&mut self.inner)?;

        self.inner.seek(SeekFrom::Start(end))?;
        Ok(self.inner)
    }

    fn write_string_section(&mut self, tree: &ItemTree, sorted: &SortedStrings) -> Result<()> {
        let pool = tree.strings();

        // The offset table is fully computable up front; only items need backpatching.
        let mut offset = self
            .position()?
            .checked_add(sorted.by_ordinal.len() as u32 * 4)
            .ok_or(Error::OffsetOverflow)?;
        for &handle in &sorted.by_ordinal {
            self.inner.write_u32::<LittleEndian>(offset)?;
            offset = offset
                .checked_add(pool.resolve(handle).len() as u32 + 1)
                .ok_or(Error::OffsetOverflow)?;
        }

        for &handle in &sorted.by_ordinal {
            self.inner.write_all(pool.resolve(handle).as_bytes())?;
            self.inner.write_u8(0)?;
        }

        while self.inner.stream_position()? % 4 != 0 {
            self.inner.write_u8(0)?;
        }

        Ok(())
    }

    /// Emit one item and its subtree, returning the absolute offset of its record.
    fn write_item<'t>(
        &mut self,
        tree: &'t ItemTree,
        item: ItemId,
        parent_offset: u32,
        ordinals: &[u32],
        blocks: &mut Vec<PendingBlock<'t>>,
    ) -> Result<u32> {
        let node = tree.node(item);
        let record_offset = self.position()?;

        let mut children = node.children.clone();
        children.sort_by_key(|&child| ordinals[tree.node(child).name.0 as usize]);

        let mut attributes: Vec<_> = node.attributes.iter().map(|(&key, value)| (key, value)).collect();
        attributes.sort_by_key(|(key, _)| ordinals[key.0 as usize]);

        let counter = |count: usize, kind: &'static str| {
            u32::try_from(count).map_err(|_| Error::CounterOverflow {
                name: tree.name(item).to_owned(),
                kind,
            })
        };

        let record = ItemRecord {
            name_ordinal: ordinals[node.name.0 as usize],
            parent_offset,
            child_count: counter(children.len(), "children")?,
            attrib_count: counter(attributes.len(), "attributes")?,
        };
        record.write(&mut self.inner)?;

        // Reserve one slot per child; each child's offset is only known after its
        // whole subtree has been written.
        let slots = self.inner.stream_position()?;
        for _ in 0..children.len() {
            self.inner.write_u32::<LittleEndian>(0)?;
        }

        for (key, value) in attributes {
            let (ty, raw) = self.encode_attr(value, ordinals, blocks)?;
            AttrRecord::pack(ty, ordinals[key.0 as usize], raw).write(&mut self.inner)?;
        }

        for (slot, &child) in children.iter().enumerate() {
            let child_offset = self.write_item(tree, child, record_offset, ordinals, blocks)?;

            let here = self.inner.stream_position()?;
            self.inner
                .seek(SeekFrom::Start(slots + 4 * slot as u64))?;
            self.inner.write_u32::<LittleEndian>(child_offset)?;
            self.inner.seek(SeekFrom::Start(here))?;
        }

        Ok(record_offset)
    }

    fn encode_attr<'t>(
        &mut self,
        value: &'t AttrValue,
        ordinals: &[u32],
        blocks: &mut Vec<PendingBlock<'t>>,
    ) -> Result<(AttributeType, u32)> {
        Ok(match value {
            AttrValue::Int32(value) => (AttributeType::Int32, *value as u32),
            AttrValue::Float32(value) => (AttributeType::Float32, value.to_bits()),
            AttrValue::Bool(value) => (AttributeType::Bool, u32::from(*value)),
            AttrValue::String(handle) => {
                (AttributeType::String, ordinals[handle.0 as usize])
            }
            AttrValue::Int32Array(values) => {
                let mut bytes = Vec::with_capacity(values.len() * 4);
                for value in values {
                    bytes.write_i32::<LittleEndian>(*value)?;
                }
                (
                    AttributeType::Int32Array,
                    register_block(blocks, Cow::Owned(bytes), true),
                )
            }
            AttrValue::Float32Array(values) => {
                let mut bytes = Vec::with_capacity(values.len() * 4);
                for value in values {
                    bytes.write_f32::<LittleEndian>(*value)?;
                }
                (
                    AttributeType::Float32Array,
                    register_block(blocks, Cow::Owned(bytes), true),
                )
            }
            AttrValue::Blob { bytes, compress } => (
                AttributeType::Blob,
                register_block(blocks, Cow::Borrowed(bytes), *compress),
            ),
        })
    }

    fn write_data_section(&mut self, blocks: &[PendingBlock<'_>]) -> Result<Vec<DataDescRecord>> {
        let mut descs = Vec::with_capacity(blocks.len());

        for block in blocks {
            let uncompressed =
                u32::try_from(block.bytes.len()).map_err(|_| Error::OffsetOverflow)?;
            let offset = self.position()?;

            let packed = if block.compress
                && self.options.compression == CompressionMethod::Zlib
                && block.bytes.len() > MIN_COMPRESS_SIZE
            {
                Some(compression::compress(&block.bytes)?)
                    .filter(|packed| packed.len() < block.bytes.len())
            } else {
                None
            };

            let stored = match &packed {
                Some(packed) => {
                    self.inner.write_all(packed)?;
                    packed.len() as u32
                }
                None => {
                    self.inner.write_all(&block.bytes)?;
                    uncompressed
                }
            };

            descs.push(DataDescRecord {
                uncompressed,
                stored,
                offset,
            });
        }

        Ok(descs)
    }

    fn position(&mut self) -> Result<u32> {
        u32::try_from(self.inner.stream_position()?).map_err(|_| Error::OffsetOverflow)
    }
}

/// Register a payload and return its data-block index.
fn register_block<'t>(blocks: &mut Vec<PendingBlock<'t>>, bytes: Cow<'t, [u8]>, compress: bool) -> u32 {
    let index = blocks.len() as u32;
    blocks.push(PendingBlock { bytes, compress });
    index
}
