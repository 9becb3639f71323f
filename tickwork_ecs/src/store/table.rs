use crate::component::{ComponentRef, ComponentTypeId};

/// Per-entity sparse array of components, indexed by `ComponentTypeId::index`.
///
/// An empty slot means the entity does not hold that component type. The
/// slot vector doubles whenever a higher id than it can hold shows up.
pub(crate) struct ComponentTable {
    slots: Vec<Option<ComponentRef>>,
    live: usize,
}

impl ComponentTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity.max(1), || None);
        Self { slots, live: 0 }
    }

    /// Writes `component` into the slot for `id`, returning the value it replaced.
    pub(crate) fn insert(&mut self, id: ComponentTypeId, component: ComponentRef) -> Option<ComponentRef> {
        let index = id.index();
        if index >= self.slots.len() {
            let mut len = self.slots.len().max(1);
            while len <= index {
                len *= 2;
            }
            self.slots.resize_with(len, || None);
        }

        let previous = self.slots[index].replace(component);
        if previous.is_none() {
            self.live += 1;
        }
        previous
    }

    pub(crate) fn get(&self, id: ComponentTypeId) -> Option<&ComponentRef> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn contains(&self, id: ComponentTypeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn contains_all(&self, ids: &[ComponentTypeId]) -> bool {
        ids.iter().all(|id| self.contains(*id))
    }

    pub(crate) fn remove(&mut self, id: ComponentTypeId) -> Option<ComponentRef> {
        let removed = self.slots.get_mut(id.index())?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Number of component types currently present.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Present `(id, component)` pairs in ascending id order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, &ComponentRef)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let component = slot.as_ref()?;
            // Slot `index` always belongs to id `index + 1`.
            let id = ComponentTypeId::from_raw(index as u32 + 1)?;
            Some((id, component))
        })
    }
}
