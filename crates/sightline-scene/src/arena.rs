use sightline_core::types::ColliderId;

use crate::collider::Collider;

/// One arena slot. The generation counts how many times the slot has been
/// vacated; handles carry the generation they were issued under, so a
/// handle to a removed (or replaced) collider no longer resolves.
#[derive(Debug)]
struct Slot {
    generation: u32,
    value: Option<Collider>,
}

/// Generation-tagged collider storage. Removal bumps the slot generation
/// instead of shifting elements, keeping every live `ColliderId` stable.
#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: Collider) -> ColliderId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return ColliderId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ColliderId {
            index,
            generation: 0,
        }
    }

    /// Remove a collider. Returns it if the handle was live. The slot
    /// generation is bumped so the handle (and any copies) go stale.
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.value.is_none() {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        slot.value.take()
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_mut()
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.get(id).is_some()
    }

    /// Live colliders in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value.as_ref().map(|c| {
                (
                    ColliderId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    c,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
