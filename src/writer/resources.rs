//! Page resource naming.
//!
//! Shared resources (fonts, image XObjects, graphics states) are referenced
//! from content streams by short local names. Names are handed out per
//! category in call order (`F1`, `F2`, …; `Im1`, …; `GS1`, …) and the
//! aggregate `/Resources` dictionary is rendered with a fixed category order
//! and entries sorted by name.

use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Dict, Object, ObjectRef};

/// Resource category, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceCategory {
    /// `/Font`, names `F1…`
    Font,
    /// `/XObject`, names `Im1…`
    XObject,
    /// `/ExtGState`, names `GS1…`
    ExtGState,
}

impl ResourceCategory {
    /// All categories in the order they are serialized.
    pub const ALL: [ResourceCategory; 3] =
        [ResourceCategory::Font, ResourceCategory::XObject, ResourceCategory::ExtGState];

    /// Dictionary key of this category.
    pub fn key(self) -> &'static str {
        match self {
            ResourceCategory::Font => "Font",
            ResourceCategory::XObject => "XObject",
            ResourceCategory::ExtGState => "ExtGState",
        }
    }

    /// Local-name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            ResourceCategory::Font => "F",
            ResourceCategory::XObject => "Im",
            ResourceCategory::ExtGState => "GS",
        }
    }

    fn slot(self) -> usize {
        match self {
            ResourceCategory::Font => 0,
            ResourceCategory::XObject => 1,
            ResourceCategory::ExtGState => 2,
        }
    }
}

/// One named resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Category the entry belongs to
    pub category: ResourceCategory,
    /// 1-based sequence number within the category
    pub index: u32,
    /// Object the name points at
    pub target: u32,
}

impl ResourceEntry {
    /// Local name, e.g. `F2`.
    pub fn local_name(&self) -> String {
        format!("{}{}", self.category.prefix(), self.index)
    }
}

/// Procedure sets declared by every non-empty resource dictionary.
const PROC_SET: [&str; 5] = ["PDF", "Text", "ImageB", "ImageC", "ImageI"];

/// Per-page registry of named resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: [Vec<ResourceEntry>; 3],
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font object and return its local name.
    pub fn add_font(&mut self, obj_num: u32) -> Result<String> {
        self.add(ResourceCategory::Font, obj_num)
    }

    /// Register an image XObject and return its local name.
    pub fn add_image(&mut self, obj_num: u32) -> Result<String> {
        self.add(ResourceCategory::XObject, obj_num)
    }

    /// Register an ExtGState object and return its local name.
    pub fn add_ext_gstate(&mut self, obj_num: u32) -> Result<String> {
        self.add(ResourceCategory::ExtGState, obj_num)
    }

    /// Append an entry to `category`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidObjectNumber`] for object 0, which is never allocated.
    pub fn add(&mut self, category: ResourceCategory, obj_num: u32) -> Result<String> {
        if obj_num == 0 {
            return Err(Error::InvalidObjectNumber(obj_num));
        }
        let list = &mut self.entries[category.slot()];
        let entry = ResourceEntry {
            category,
            index: list.len() as u32 + 1,
            target: obj_num,
        };
        list.push(entry);
        Ok(entry.local_name())
    }

    /// Name already assigned to `obj_num` in `category`, if any.
    pub fn name_of(&self, category: ResourceCategory, obj_num: u32) -> Option<String> {
        self.entries[category.slot()]
            .iter()
            .find(|e| e.target == obj_num)
            .map(ResourceEntry::local_name)
    }

    /// Name for `obj_num` in `category`, registering it on first use.
    pub fn get_or_add(&mut self, category: ResourceCategory, obj_num: u32) -> Result<String> {
        match self.name_of(category, obj_num) {
            Some(name) => Ok(name),
            None => self.add(category, obj_num),
        }
    }

    /// True once any category holds an entry.
    pub fn has_resources(&self) -> bool {
        self.entries.iter().any(|list| !list.is_empty())
    }

    /// Entries of one category, in registration order.
    pub fn entries(&self, category: ResourceCategory) -> &[ResourceEntry] {
        &self.entries[category.slot()]
    }

    /// Build the `/Resources` dictionary.
    pub fn to_object(&self) -> Object {
        let mut resources = Dict::new();
        if !self.has_resources() {
            return Object::Dictionary(resources);
        }

        for category in ResourceCategory::ALL {
            let mut sorted = self.entries[category.slot()].clone();
            if sorted.is_empty() {
                continue;
            }
            sorted.sort_by_key(|e| e.index);

            let sub: Dict = sorted
                .iter()
                .map(|e| (e.local_name(), Object::Reference(ObjectRef::new(e.target, 0))))
                .collect();
            resources.insert(category.key().to_string(), Object::Dictionary(sub));
        }

        resources.insert(
            "ProcSet".to_string(),
            Object::Array(PROC_SET.iter().map(|p| ObjectSerializer::name(p)).collect()),
        );
        Object::Dictionary(resources)
    }

    /// Serialize the `/Resources` dictionary in compact form.
    pub fn serialize(&self) -> Vec<u8> {
        ObjectSerializer::compact().serialize(&self.to_object())
    }
}
