use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::text_slice::TextSlice;
use crate::settings::INITIAL_BINDING_CAPACITY;
use crate::{binding_log, return_allocation_error, return_compiler_error};

/// A name bound to a position in some flat list (funcs, locals, case labels...)
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: TextSlice,
    pub index: u32,
}

#[derive(Debug, Clone, Default)]
struct BindingSlot {
    // None means the slot is on the free list
    binding: Option<Binding>,

    // Occupied: next entry in the collision chain.
    // Free: next slot on the free list.
    next: Option<usize>,

    // Only meaningful while the slot is free
    prev: Option<usize>,
}

impl BindingSlot {
    #[cfg(test)]
    fn is_free(&self) -> bool {
        self.binding.is_none()
    }
}

/// Open addressing hash table from names to indices.
///
/// Collisions are resolved with coalesced chaining (Brent's variation):
/// every name is reachable by starting at its main slot (`hash % capacity`)
/// and following a single chain of `next` links. A new name whose main slot is
/// held by a displaced entry from another chain evicts that entry to a free slot,
/// so chains never grow because of unrelated names parked in them.
///
/// Free slots are kept on a doubly linked list so taking a specific free slot
/// (a new name's main slot) is O(1).
///
/// Entries are never removed. Inserting a name twice chains a second entry
/// behind the first, and lookup returns whichever of them comes first in the chain.
/// That is the first insertion unless a later collision or a rehash reorders the chain.
#[derive(Debug, Clone)]
pub struct BindingTable {
    slots: Vec<BindingSlot>,
    free_head: Option<usize>,
    len: usize,
    initial_capacity: usize,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// An empty table. No slots are allocated until the first insert.
    pub fn new() -> Self {
        Self::with_initial_capacity(INITIAL_BINDING_CAPACITY)
    }

    /// `initial_capacity` is rounded up to a power of two
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            initial_capacity: initial_capacity.max(1).next_power_of_two(),
        }
    }

    /// Number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied bindings in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.slots.iter().filter_map(|slot| slot.binding.as_ref())
    }

    #[inline]
    fn main_slot(&self, name: &TextSlice) -> usize {
        name.hash_name() as usize % self.slots.len()
    }

    /// Adds a new entry for `name` and returns it with `index` zeroed.
    ///
    /// The table shares the name with the caller rather than copying it.
    /// Any reference returned by a previous insert is invalidated, as this may grow the table.
    pub fn insert(&mut self, name: TextSlice) -> Result<&mut Binding, CompilerError> {
        if self.slots.is_empty() {
            self.resize(self.initial_capacity)?;
        }

        if self.free_head.is_none() {
            // No more free space, allocate more
            self.resize(self.slots.len() * 2)?;
        }

        let entry = self.new_entry(Binding { name, index: 0 })?;
        self.len += 1;

        match self.slots[entry].binding.as_mut() {
            Some(binding) => Ok(binding),
            None => return_compiler_error!("Binding table lost an entry it just inserted", {
                CompilationStage => "Binding Insertion",
            }),
        }
    }

    /// Inserts `name` and sets its index in one step
    pub fn bind(&mut self, name: TextSlice, index: u32) -> Result<(), CompilerError> {
        let binding = self.insert(name)?;
        binding.index = index;
        Ok(())
    }

    /// Finds the index bound to `name` by walking the chain from its main slot
    pub fn lookup(&self, name: &TextSlice) -> Option<u32> {
        self.slot_of(name)
            .and_then(|slot| self.slots[slot].binding.as_ref())
            .map(|binding| binding.index)
    }

    /// The slot currently holding the first entry for `name`
    pub(crate) fn slot_of(&self, name: &TextSlice) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        let mut entry = Some(self.main_slot(name));
        while let Some(slot_index) = entry {
            let slot = &self.slots[slot_index];
            let binding = slot.binding.as_ref()?;
            if binding.name == *name {
                return Some(slot_index);
            }

            entry = slot.next;
        }

        None
    }

    /// Places `binding` into the table without checking for free space.
    /// Returns the slot it ended up in.
    fn new_entry(&mut self, binding: Binding) -> Result<usize, CompilerError> {
        let main = self.main_slot(&binding.name);

        let entry = if let Some(occupant) = &self.slots[main].binding {
            let Some(free) = self.free_head else {
                return_compiler_error!("Binding table has no free slot for a colliding name", {
                    CompilationStage => "Binding Insertion",
                });
            };

            let occupant_main = self.main_slot(&occupant.name);

            // Pop the head of the free list
            self.free_head = self.slots[free].next;
            if let Some(next_free) = self.slots[free].next {
                self.slots[next_free].prev = None;
            }

            if occupant_main == main {
                // The occupant owns this slot, so join its chain as the second link
                self.slots[free].next = self.slots[main].next;
                self.slots[main].next = Some(free);
                free
            } else {
                // The occupant was displaced here from another chain.
                // Move it to the free slot and take back our main slot.
                let mut predecessor = occupant_main;
                while self.slots[predecessor].next != Some(main) {
                    predecessor = match self.slots[predecessor].next {
                        Some(next) => next,
                        None => return_compiler_error!(
                            "Displaced binding is not reachable from its main slot",
                            { CompilationStage => "Binding Relocation" }
                        ),
                    };
                }

                self.slots[predecessor].next = Some(free);
                let displaced = std::mem::take(&mut self.slots[main]);
                self.slots[free] = displaced;
                self.slots[main].next = None;
                main
            }
        } else {
            // Unlink the main slot from the free list
            let BindingSlot { next, prev, .. } = self.slots[main];
            if let Some(next) = next {
                self.slots[next].prev = prev;
            }
            match prev {
                Some(prev) => self.slots[prev].next = next,
                None => self.free_head = next,
            }

            self.slots[main].next = None;
            main
        };

        self.slots[entry].binding = Some(binding);
        self.slots[entry].prev = None;
        Ok(entry)
    }

    /// Rebuilds the table with `new_capacity` slots, re-inserting every entry in slot order.
    /// Names move into the new slots as they are, nothing is copied.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), CompilerError> {
        let mut slots: Vec<BindingSlot> = Vec::new();
        if slots.try_reserve_exact(new_capacity).is_err() {
            return_allocation_error!(
                format!("Could not grow binding table to {new_capacity} slots"),
                { CompilationStage => "Binding Table Growth" }
            );
        }
        slots.resize_with(new_capacity, BindingSlot::default);

        // Every slot starts on the free list, so the last slot ends up at the head
        let mut free_head: Option<usize> = None;
        for slot_index in 0..new_capacity {
            if let Some(head) = free_head {
                slots[head].prev = Some(slot_index);
            }
            slots[slot_index].next = free_head;
            free_head = Some(slot_index);
        }

        binding_log!("Binding table growing to ", Green new_capacity, " slots");

        let old_slots = std::mem::replace(&mut self.slots, slots);
        self.free_head = free_head;

        for old_slot in old_slots {
            if let Some(binding) = old_slot.binding {
                self.new_entry(binding)?;
            }
        }

        Ok(())
    }

    /// Checks the chain invariant: every occupied entry is reachable from its main slot.
    #[cfg(test)]
    pub(crate) fn all_entries_reachable(&self) -> bool {
        self.slots.iter().enumerate().all(|(slot_index, slot)| {
            let Some(binding) = &slot.binding else {
                return true;
            };

            let mut entry = Some(self.main_slot(&binding.name));
            while let Some(current) = entry {
                if current == slot_index {
                    return true;
                }
                if self.slots[current].is_free() {
                    return false;
                }
                entry = self.slots[current].next;
            }
            false
        })
    }

    /// Number of slots on the free list, counted by walking it
    #[cfg(test)]
    pub(crate) fn free_slot_count(&self) -> usize {
        let mut count = 0;
        let mut entry = self.free_head;
        while let Some(slot_index) = entry {
            count += 1;
            entry = self.slots[slot_index].next;
        }
        count
    }
}
