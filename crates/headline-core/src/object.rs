//! Object model for Headline.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership relationships with cascade destroy
//! - Object naming and lookup
//!
//! Widgets register themselves here so that destroying a parent widget
//! formally removes every descendant from the registry, children first.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Central registry managing all objects
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object
    /// tree changes. They become invalid when the object is destroyed.
    pub struct ObjectId;
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// The type ID of the concrete Object implementation.
    type_id: TypeId,
    /// The type name for debugging.
    type_name: &'static str,
    /// Parent object (if any).
    parent: Option<ObjectId>,
    /// Child objects (owned).
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_id,
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The central registry that manages all objects and their relationships.
///
/// Uses arena-based storage via SlotMap for stable object IDs and efficient
/// parent-child relationship management.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object and return its ID.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(TypeId::of::<T>(), std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: "headline_core::object", ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its children from the registry.
    ///
    /// Destroying a parent also destroys all children; descendants are
    /// removed depth-first, children before parents.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "headline_core::object", ?id, descendant_count = descendants.len(), "destroying object tree");

        // Remove from parent's children list.
        if let Some(data) = self.objects.get(id)
            && let Some(parent_id) = data.parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);
        Ok(())
    }

    /// Collect all descendant IDs in depth-first order (children before parents).
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;

        let mut result = Vec::new();
        for &child_id in &data.children {
            result.extend(self.collect_descendants(child_id)?);
            result.push(child_id);
        }
        Ok(result)
    }

    /// Set the parent of an object.
    ///
    /// This handles removing from the old parent and adding to the new parent.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if parent_id == id || self.is_ancestor_of(id, parent_id)? {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.objects.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }
        Ok(())
    }

    /// Check whether `ancestor` appears in the parent chain of `id`.
    fn is_ancestor_of(&self, ancestor: ObjectId, id: ObjectId) -> ObjectResult<bool> {
        let mut current = self.objects.get(id).and_then(|d| d.parent);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return Ok(true);
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        Ok(false)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object, in ownership order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.children.clone())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Check if an object is still registered.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Get the name of an object.
    pub fn name(&self, id: ObjectId) -> ObjectResult<String> {
        self.objects
            .get(id)
            .map(|d| d.name.clone())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the name of an object.
    pub fn set_name(&mut self, id: ObjectId, name: &str) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name.to_string();
        Ok(())
    }

    /// Get the concrete type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Check whether an object was registered as type `T`.
    pub fn is_type<T: 'static>(&self, id: ObjectId) -> ObjectResult<bool> {
        self.objects
            .get(id)
            .map(|d| d.type_id == TypeId::of::<T>())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// All objects without a parent, in registration order.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
#[derive(Clone)]
pub struct SharedObjectRegistry {
    inner: Arc<RwLock<ObjectRegistry>>,
}

impl SharedObjectRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObjectRegistry::new())),
        }
    }

    /// Register a new object and return its ID.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Remove an object and all its children from the registry.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// Set the parent of an object.
    pub fn set_parent(&self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, new_parent)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object, in ownership order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id)
    }

    /// Check if an object is still registered.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get the name of an object.
    pub fn name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().name(id)
    }

    /// Set the name of an object.
    pub fn set_name(&self, id: ObjectId, name: &str) -> ObjectResult<()> {
        self.inner.write().set_name(id, name)
    }

    /// Get the concrete type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// All objects without a parent, in registration order.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.inner.read().roots()
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Idempotent; calling it more than once has no effect.
pub fn init_global_registry() {
    let _ = GLOBAL_REGISTRY.set(SharedObjectRegistry::new());
}

/// Access the global object registry, initializing it on first use.
pub fn global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new)
}

/// Base trait for all objects participating in the ownership tree.
pub trait Object {
    /// The unique identifier of this object in the global registry.
    fn object_id(&self) -> ObjectId;

    /// The object's debug name, or an empty string if unnamed or destroyed.
    fn object_name(&self) -> String {
        global_registry()
            .name(self.object_id())
            .unwrap_or_default()
    }

    /// Set the object's debug name.
    fn set_object_name(&self, name: &str) {
        let _ = global_registry().set_name(self.object_id(), name);
    }
}

/// Helper struct for implementing [`Object`].
///
/// Registers with the global registry on construction and removes itself
/// (cascading into any still-registered children) when dropped.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of type `T` and return its base.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            id: global_registry().register::<T>(),
        }
    }

    /// The registered object ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // Already-destroyed ids are fine here: a parent cascade may have
        // removed this object before the owning struct was dropped.
        let _ = global_registry().destroy(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        base: ObjectBase,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }
    }

    impl Object for Probe {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    #[test]
    fn test_register_and_contains() {
        let registry = SharedObjectRegistry::new();
        let id = registry.register::<Probe>();
        assert!(registry.contains(id));
        assert_eq!(registry.parent(id).unwrap(), None);
    }

    #[test]
    fn test_set_parent_and_children_order() {
        let mut registry = ObjectRegistry::new();
        let parent = registry.register::<Probe>();
        let a = registry.register::<Probe>();
        let b = registry.register::<Probe>();

        registry.set_parent(a, Some(parent)).unwrap();
        registry.set_parent(b, Some(parent)).unwrap();

        assert_eq!(registry.children(parent).unwrap(), vec![a, b]);
        assert_eq!(registry.parent(a).unwrap(), Some(parent));
    }

    #[test]
    fn test_reparent_removes_from_old_parent() {
        let mut registry = ObjectRegistry::new();
        let first = registry.register::<Probe>();
        let second = registry.register::<Probe>();
        let child = registry.register::<Probe>();

        registry.set_parent(child, Some(first)).unwrap();
        registry.set_parent(child, Some(second)).unwrap();

        assert!(registry.children(first).unwrap().is_empty());
        assert_eq!(registry.children(second).unwrap(), vec![child]);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut registry = ObjectRegistry::new();
        let parent = registry.register::<Probe>();
        let child = registry.register::<Probe>();

        registry.set_parent(child, Some(parent)).unwrap();
        assert_eq!(
            registry.set_parent(parent, Some(child)),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(
            registry.set_parent(parent, Some(parent)),
            Err(ObjectError::CircularParentage)
        );
    }

    #[test]
    fn test_destroy_cascades_to_descendants() {
        let mut registry = ObjectRegistry::new();
        let root = registry.register::<Probe>();
        let child = registry.register::<Probe>();
        let grandchild = registry.register::<Probe>();

        registry.set_parent(child, Some(root)).unwrap();
        registry.set_parent(grandchild, Some(child)).unwrap();

        registry.destroy(root).unwrap();

        assert!(!registry.contains(root));
        assert!(!registry.contains(child));
        assert!(!registry.contains(grandchild));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_destroy_detaches_from_parent() {
        let mut registry = ObjectRegistry::new();
        let root = registry.register::<Probe>();
        let child = registry.register::<Probe>();

        registry.set_parent(child, Some(root)).unwrap();
        registry.destroy(child).unwrap();

        assert!(registry.contains(root));
        assert!(registry.children(root).unwrap().is_empty());
    }

    #[test]
    fn test_destroy_invalid_id() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register::<Probe>();
        registry.destroy(id).unwrap();
        assert_eq!(registry.destroy(id), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_object_base_unregisters_on_drop() {
        let probe = Probe::new();
        let id = probe.object_id();
        assert!(global_registry().contains(id));
        drop(probe);
        assert!(!global_registry().contains(id));
    }

    #[test]
    fn test_object_name_roundtrip() {
        let probe = Probe::new();
        probe.set_object_name("main-toolbar");
        assert_eq!(probe.object_name(), "main-toolbar");
    }

    #[test]
    fn test_type_name_recorded() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register::<Probe>();
        assert!(registry.type_name(id).unwrap().ends_with("Probe"));
        assert!(registry.is_type::<Probe>(id).unwrap());
    }
}
