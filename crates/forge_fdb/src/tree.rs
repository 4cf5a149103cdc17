//! The mutable, build-time tree of named items.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::intern::{StringHandle, StringPool};

/// Index of an item in an [`ItemTree`] arena
///
/// Ids are only meaningful to the tree that created them and stay valid for its whole
/// lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) u32);

/// A value held by an attribute during the build
#[derive(Debug, Clone)]
pub(crate) enum AttrValue {
    Int32(i32),
    Float32(f32),
    Bool(bool),
    String(StringHandle),
    Int32Array(Vec<i32>),
    Float32Array(Vec<f32>),
    Blob { bytes: Vec<u8>, compress: bool },
}

#[derive(Debug)]
pub(crate) struct ItemNode {
    pub name: StringHandle,
    pub parent: Option<ItemId>,
    pub children: Vec<ItemId>,
    pub attributes: IndexMap<StringHandle, AttrValue>,
}

/// The build-time tree consumed by [`crate::write::DbWriter`]
///
/// Items live in an arena addressed by [`ItemId`]; parent and child links are indices,
/// not owning pointers. The tree owns its [`StringPool`], so its lifetime is exactly one
/// build session: populate it through the `fetch_*`/`set_*` operations below, save it
/// once, discard it. Mutation is single-threaded; asset preprocessing may be fanned out,
/// but inserting results must be serialized onto the one tree.
///
/// ```
/// # fn doit() -> forge_fdb::error::Result<()>
/// # {
/// use forge_fdb::ItemTree;
///
/// let mut tree = ItemTree::new();
/// let models = tree.fetch_child(tree.root(), "models")?;
/// let crate_item = tree.fetch_child(models, "crate")?;
/// tree.set_string(crate_item, "textureName", "wood")?;
/// tree.set_int32(crate_item, "nVertex", 24)?;
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug)]
pub struct ItemTree {
    pool: StringPool,
    items: Vec<ItemNode>,
}

impl ItemTree {
    /// Create a tree holding only the root item.
    pub fn new() -> ItemTree {
        let mut pool = StringPool::new();
        let name = pool
            .intern("")
            .expect("the empty root name always interns");

        ItemTree {
            pool,
            items: vec![ItemNode {
                name,
                parent: None,
                children: Vec::new(),
                attributes: IndexMap::new(),
            }],
        }
    }

    /// The root item.
    pub fn root(&self) -> ItemId {
        ItemId(0)
    }

    /// Total number of items in the tree, root included.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The string pool backing this tree.
    pub fn strings(&self) -> &StringPool {
        &self.pool
    }

    /// The name of an item.
    pub fn name(&self, item: ItemId) -> &str {
        self.pool.resolve(self.node(item).name)
    }

    /// The parent of an item, `None` for the root.
    pub fn parent(&self, item: ItemId) -> Option<ItemId> {
        self.node(item).parent
    }

    /// The children of an item, in creation order.
    pub fn children(&self, item: ItemId) -> &[ItemId] {
        &self.node(item).children
    }

    /// Number of attributes set on an item.
    pub fn attribute_count(&self, item: ItemId) -> usize {
        self.node(item).attributes.len()
    }

    /// Get the child of `parent` named `name`, creating it if it does not exist.
    ///
    /// Sibling names are unique: repeated calls with the same name return the same item.
    pub fn fetch_child(&mut self, parent: ItemId, name: &str) -> Result<ItemId> {
        if name.is_empty() {
            return Err(Error::EmptyChildName);
        }

        let handle = self.pool.intern(name)?;

        let existing = self.items[parent.0 as usize]
            .children
            .iter()
            .copied()
            .find(|&child| self.items[child.0 as usize].name == handle);
        if let Some(child) = existing {
            return Ok(child);
        }

        let child = ItemId(self.items.len() as u32);
        self.items.push(ItemNode {
            name: handle,
            parent: Some(parent),
            children: Vec::new(),
            attributes: IndexMap::new(),
        });
        self.items[parent.0 as usize].children.push(child);

        Ok(child)
    }

    /// Get or create a child with a fixed-width zero-padded numeric name.
    ///
    /// Used for ordered or anonymous sequences; index 7 becomes the name `"00000007"`.
    pub fn fetch_child_at(&mut self, parent: ItemId, index: u32) -> Result<ItemId> {
        self.fetch_child(parent, &format!("{index:08}"))
    }

    /// Set an int32 attribute, replacing any prior value under `key`.
    pub fn set_int32(&mut self, item: ItemId, key: &str, value: i32) -> Result<()> {
        self.set_attr(item, key, AttrValue::Int32(value))
    }

    /// Set a float32 attribute, replacing any prior value under `key`.
    pub fn set_float32(&mut self, item: ItemId, key: &str, value: f32) -> Result<()> {
        self.set_attr(item, key, AttrValue::Float32(value))
    }

    /// Set a bool attribute, replacing any prior value under `key`.
    pub fn set_bool(&mut self, item: ItemId, key: &str, value: bool) -> Result<()> {
        self.set_attr(item, key, AttrValue::Bool(value))
    }

    /// Set a string attribute, replacing any prior value under `key`.
    ///
    /// The text is interned like any name; values over the pool limit must be stored
    /// through [`ItemTree::set_data`] instead.
    pub fn set_string(&mut self, item: ItemId, key: &str, text: &str) -> Result<()> {
        let value = self.pool.intern(text)?;
        self.set_attr(item, key, AttrValue::String(value))
    }

    /// Set an int32 array attribute, replacing any prior value under `key`.
    pub fn set_int32_array(&mut self, item: ItemId, key: &str, values: Vec<i32>) -> Result<()> {
        self.set_attr(item, key, AttrValue::Int32Array(values))
    }

    /// Set a float32 array attribute, replacing any prior value under `key`.
    pub fn set_float32_array(&mut self, item: ItemId, key: &str, values: Vec<f32>) -> Result<()> {
        self.set_attr(item, key, AttrValue::Float32Array(values))
    }

    /// Set a raw byte payload attribute, replacing any prior value under `key`.
    ///
    /// `compress` is a hint: the writer only attempts compression when it is set and the
    /// payload is large enough, and only keeps the result when it is strictly smaller.
    pub fn set_data(&mut self, item: ItemId, key: &str, bytes: Vec<u8>, compress: bool) -> Result<()> {
        self.set_attr(item, key, AttrValue::Blob { bytes, compress })
    }

    fn set_attr(&mut self, item: ItemId, key: &str, value: AttrValue) -> Result<()> {
        let key = self.pool.intern(key)?;
        // Replaces in place; the stale value is dropped immediately.
        self.items[item.0 as usize].attributes.insert(key, value);
        Ok(())
    }

    pub(crate) fn node(&self, item: ItemId) -> &ItemNode {
        &self.items[item.0 as usize]
    }
}

impl Default for ItemTree {
    fn default() -> Self {
        ItemTree::new()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::tree::{AttrValue, ItemTree};

    #[test]
    fn fetch_child_is_idempotent() -> Result<()> {
        let mut tree = ItemTree::new();

        let first = tree.fetch_child(tree.root(), "models")?;
        let second = tree.fetch_child(tree.root(), "models")?;

        assert_eq!(first, second);
        assert_eq!(tree.children(tree.root()).len(), 1);

        Ok(())
    }

    #[test]
    fn fetch_child_rejects_empty_names() {
        let mut tree = ItemTree::new();

        assert!(matches!(
            tree.fetch_child(tree.root(), ""),
            Err(Error::EmptyChildName)
        ));
    }

    #[test]
    fn numeric_children_are_zero_padded() -> Result<()> {
        let mut tree = ItemTree::new();

        let frame = tree.fetch_child_at(tree.root(), 7)?;
        assert_eq!(tree.name(frame), "00000007");

        let again = tree.fetch_child(tree.root(), "00000007")?;
        assert_eq!(frame, again);

        Ok(())
    }

    #[test]
    fn setting_a_key_twice_replaces_the_value() -> Result<()> {
        let mut tree = ItemTree::new();
        let item = tree.fetch_child(tree.root(), "crate")?;

        tree.set_int32(item, "nVertex", 1)?;
        tree.set_int32(item, "nVertex", 2)?;

        assert_eq!(tree.attribute_count(item), 1);
        assert!(matches!(
            tree.node(item).attributes.values().next(),
            Some(AttrValue::Int32(2))
        ));

        Ok(())
    }

    #[test]
    fn replacing_across_types_keeps_one_entry() -> Result<()> {
        let mut tree = ItemTree::new();
        let item = tree.fetch_child(tree.root(), "crate")?;

        tree.set_int32(item, "value", 1)?;
        tree.set_string(item, "value", "one")?;

        assert_eq!(tree.attribute_count(item), 1);
        assert!(matches!(
            tree.node(item).attributes.values().next(),
            Some(AttrValue::String(_))
        ));

        Ok(())
    }

    #[test]
    fn parent_links_follow_creation() -> Result<()> {
        let mut tree = ItemTree::new();

        let models = tree.fetch_child(tree.root(), "models")?;
        let crate_item = tree.fetch_child(models, "crate")?;

        assert_eq!(tree.parent(crate_item), Some(models));
        assert_eq!(tree.parent(models), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.item_count(), 3);

        Ok(())
    }
}
