//! Fixed pool of interchangeable resources (vehicles).
//!
//! The pool only tracks which registered ids are free. Acquisition is a
//! non-blocking poll: callers that find the pool exhausted get `None` and
//! park their work in the waiting list instead of blocking.

use std::collections::{BTreeSet, HashMap};

use crate::core::DispatchError;
use crate::util::serde::ResourceId;

/// Registered resources and the free subset.
///
/// Free slots are kept as registration indices so that [`ResourcePool::acquire`]
/// always hands out the first-registered free resource.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    resources: Vec<ResourceId>,
    index: HashMap<ResourceId, usize>,
    free: BTreeSet<usize>,
}

impl ResourcePool {
    /// Register resources in order; all start free.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the list is empty or holds duplicates.
    pub fn new<I, R>(resources: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        let resources: Vec<ResourceId> = resources.into_iter().map(Into::into).collect();
        if resources.is_empty() {
            return Err(DispatchError::InvalidConfig(
                "resource pool needs at least one resource".into(),
            ));
        }
        let mut index = HashMap::with_capacity(resources.len());
        for (slot, id) in resources.iter().enumerate() {
            if index.insert(id.clone(), slot).is_some() {
                return Err(DispatchError::InvalidConfig(format!(
                    "resource `{id}` registered twice"
                )));
            }
        }
        let free = (0..resources.len()).collect();
        Ok(Self {
            resources,
            index,
            free,
        })
    }

    /// Take the first-registered free resource, or `None` if exhausted.
    pub fn acquire(&mut self) -> Option<ResourceId> {
        let slot = self.free.pop_first()?;
        Some(self.resources[slot].clone())
    }

    /// Take a specific resource if it is free. Returns whether it was taken.
    pub fn claim(&mut self, id: &str) -> bool {
        self.index
            .get(id)
            .is_some_and(|slot| self.free.remove(slot))
    }

    /// Return a resource to the pool. Releasing a free resource is a no-op.
    ///
    /// # Errors
    ///
    /// `UnknownResource` if `id` was never registered.
    pub fn release(&mut self, id: &str) -> Result<(), DispatchError> {
        let slot = self
            .index
            .get(id)
            .ok_or_else(|| DispatchError::UnknownResource(id.to_string()))?;
        if !self.free.insert(*slot) {
            tracing::debug!("resource {} already free", id);
        }
        Ok(())
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `id` is registered and currently free.
    #[must_use]
    pub fn is_free(&self, id: &str) -> bool {
        self.index.get(id).is_some_and(|slot| self.free.contains(slot))
    }

    /// Number of free resources.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total registered resources.
    #[must_use]
    pub fn size(&self) -> usize {
        self.resources.len()
    }

    /// Free resources in registration order.
    #[must_use]
    pub fn free_resources(&self) -> Vec<ResourceId> {
        self.free
            .iter()
            .map(|slot| self.resources[*slot].clone())
            .collect()
    }

    /// All registered resources in registration order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }
}
