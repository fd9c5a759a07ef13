//! Reference-counted catalog descriptors held in an arena.
//!
//! Descriptors are addressed by [`CatalogHandle`]; a handle stays valid (and
//! never aliases another catalog) after its descriptor is destroyed. The
//! priority order is a separate list of handles. System domains occupy a
//! trailing range of that list which always sorts last and is never removed.

use log::debug;

/// Stable address of a descriptor in the registry arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CatalogHandle(usize);

#[derive(Clone, Debug, Eq, PartialEq)]
struct CatalogDescriptor {
    name: String,
    load_count: usize,
}

/// Whether a registry mutation changed the priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegistryChange {
    /// The order changed; derived instances must be recomputed.
    Reordered,
    /// Only a load count changed.
    Counted,
    /// Nothing happened.
    Unchanged,
}

impl RegistryChange {
    /// Whether derived state needs rebuilding.
    #[must_use]
    pub const fn needs_recompute(self) -> bool {
        matches!(self, Self::Reordered)
    }
}

/// Ordered set of translation domains.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogRegistry {
    arena: Vec<Option<CatalogDescriptor>>,
    order: Vec<CatalogHandle>,
    system: usize,
}

impl CatalogRegistry {
    /// A registry holding `application` followed by the permanent
    /// `system` domains.
    ///
    /// ```
    /// use parlance::catalog::CatalogRegistry;
    ///
    /// let mut registry = CatalogRegistry::new("editor", ["widgets", "core"]);
    /// registry.insert("spelling");
    /// assert_eq!(registry.names(), ["editor", "spelling", "widgets", "core"]);
    /// ```
    #[must_use]
    pub fn new<I, S>(application: &str, system: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            arena: Vec::new(),
            order: Vec::new(),
            system: 0,
        };
        if !application.is_empty() {
            registry.insert(application);
        }
        for entry in system {
            let name = entry.into();
            if name.is_empty() || registry.handle(&name).is_some() {
                continue;
            }
            let handle = registry.allocate(name);
            registry.order.push(handle);
            registry.system += 1;
        }
        registry
    }

    /// Register a use of `name`, creating it just before the system range
    /// when it is new.
    pub fn insert(&mut self, name: &str) -> RegistryChange {
        if let Some(descriptor) = self.descriptor_mut(name) {
            descriptor.load_count += 1;
            return RegistryChange::Counted;
        }
        let handle = self.allocate(name.to_owned());
        let position = self.order.len() - self.system;
        self.order.insert(position, handle);
        debug!(target: "catalog", "registered catalog `{name}` at position {position}");
        RegistryChange::Reordered
    }

    /// Release one use of `name`, destroying it when unused.
    ///
    /// System domains are permanent.
    pub fn remove(&mut self, name: &str) -> RegistryChange {
        let Some(handle) = self.handle(name) else {
            return RegistryChange::Unchanged;
        };
        if self.is_system(handle) {
            debug!(target: "catalog", "system catalog `{name}` cannot be removed");
            return RegistryChange::Unchanged;
        }
        let Some(Some(descriptor)) = self.arena.get_mut(handle.0) else {
            return RegistryChange::Unchanged;
        };
        descriptor.load_count -= 1;
        if descriptor.load_count > 0 {
            return RegistryChange::Counted;
        }
        if let Some(slot) = self.arena.get_mut(handle.0) {
            *slot = None;
        }
        self.order.retain(|candidate| *candidate != handle);
        debug!(target: "catalog", "released catalog `{name}`");
        RegistryChange::Reordered
    }

    /// Move `name` to the highest priority.
    pub fn activate_to_front(&mut self, name: &str) -> RegistryChange {
        let Some(index) = self
            .order
            .iter()
            .position(|handle| self.name_of(*handle) == Some(name))
        else {
            return RegistryChange::Unchanged;
        };
        if index == 0 {
            return RegistryChange::Unchanged;
        }
        let handle = self.order.remove(index);
        self.order.insert(0, handle);
        if index >= self.order.len() - self.system {
            self.system -= 1;
        }
        RegistryChange::Reordered
    }

    /// The handle of a live descriptor.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<CatalogHandle> {
        self.order
            .iter()
            .copied()
            .find(|handle| self.name_of(*handle) == Some(name))
    }

    /// The domain a handle refers to, if still registered.
    #[must_use]
    pub fn name_of(&self, handle: CatalogHandle) -> Option<&str> {
        self.arena
            .get(handle.0)
            .and_then(Option::as_ref)
            .map(|descriptor| descriptor.name.as_str())
    }

    /// Outstanding uses of `name`; zero when not registered.
    #[must_use]
    pub fn load_count(&self, name: &str) -> usize {
        self.handle(name)
            .and_then(|handle| self.arena.get(handle.0))
            .and_then(Option::as_ref)
            .map_or(0, |descriptor| descriptor.load_count)
    }

    /// Domains in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|handle| self.name_of(*handle))
            .collect()
    }

    fn allocate(&mut self, name: String) -> CatalogHandle {
        self.arena.push(Some(CatalogDescriptor {
            name,
            load_count: 1,
        }));
        CatalogHandle(self.arena.len() - 1)
    }

    fn descriptor_mut(&mut self, name: &str) -> Option<&mut CatalogDescriptor> {
        let handle = self.handle(name)?;
        self.arena.get_mut(handle.0).and_then(Option::as_mut)
    }

    fn is_system(&self, handle: CatalogHandle) -> bool {
        self.order
            .iter()
            .rev()
            .take(self.system)
            .any(|candidate| *candidate == handle)
    }
}
