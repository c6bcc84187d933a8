//! Simulation setup: the staged ships and planet a simulation runs on.
//!
//! A [`Setup`] owns an ordered list of ships and at most one planet. Units
//! are addressed by slot: slots `0..num_ships()` are the ships in order, slot
//! `num_ships()` is the planet if there is one. Result aggregation and every
//! list view depend on this ordering.
//!
//! Mutations are not reported immediately. Structural changes set a pending
//! flag, attribute changes mark the unit dirty, and
//! [`Setup::notify_listeners`] turns the accumulated state into one batch of
//! [`SetupEvent`]s.

use std::cmp::Ordering;
use std::fmt;

use crate::data::ShipList;
use crate::object::{ObjectMut, ObjectRef, SimObject};
use crate::planet::Planet;
use crate::ship::Ship;

/// Change notification emitted by [`Setup::notify_listeners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupEvent {
    /// Units were added, removed, or reordered. Subsumes all other events.
    StructureChanged,
    /// The planet's attributes changed.
    PlanetChanged,
    /// Attributes of the ship in the given slot changed.
    ShipChanged(usize),
}

/// Callback receiving setup change notifications.
pub type SetupListener = Box<dyn FnMut(&SetupEvent)>;

/// Ordered collection of simulated ships plus an optional planet.
#[derive(Default)]
pub struct Setup {
    ships: Vec<Ship>,
    planet: Option<Planet>,
    structure_changed: bool,
    listeners: Vec<SetupListener>,
}

impl Setup {
    /// Create an empty setup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Append a ship with default values and return it.
    pub fn add_ship(&mut self) -> &mut Ship {
        self.structure_changed = true;
        self.ships.push(Ship::default());
        let slot = self.ships.len() - 1;
        &mut self.ships[slot]
    }

    /// Create the planet if absent and return it.
    ///
    /// An existing planet is returned unchanged.
    pub fn add_planet(&mut self) -> &mut Planet {
        if self.planet.is_none() {
            self.structure_changed = true;
        }
        self.planet.get_or_insert_with(Planet::default)
    }

    /// Remove the ship in a slot. Invalid slots are ignored.
    pub fn remove_ship(&mut self, slot: usize) {
        if slot < self.ships.len() {
            self.ships.remove(slot);
            self.structure_changed = true;
        }
    }

    /// Remove the planet, if any.
    pub fn remove_planet(&mut self) {
        if self.planet.take().is_some() {
            self.structure_changed = true;
        }
    }

    /// Exchange two ship slots. Invalid slots are ignored.
    pub fn swap_ships(&mut self, a: usize, b: usize) {
        if a != b && a < self.ships.len() && b < self.ships.len() {
            self.ships.swap(a, b);
            self.structure_changed = true;
        }
    }

    /// Insert a copy of the ship in `slot` directly after it, with a new id.
    ///
    /// Returns the copy, or `None` if the slot is invalid.
    pub fn duplicate_ship(&mut self, slot: usize, new_id: i32) -> Option<&mut Ship> {
        let mut copy = self.ships.get(slot)?.clone();
        copy.set_id(new_id);
        copy.mark_clean();
        self.ships.insert(slot + 1, copy);
        self.structure_changed = true;
        self.ships.get_mut(slot + 1)
    }

    /// Merge another setup into this one.
    ///
    /// Ships replace ships with the same id, other ships are appended. The
    /// other setup's planet replaces this one's.
    pub fn merge(&mut self, other: &Self) {
        for ship in &other.ships {
            if let Some(slot) = self.find_ship_slot_by_id(ship.id()) {
                if self.ships[slot] != *ship {
                    self.ships[slot] = ship.clone();
                    self.ships[slot].mark_dirty();
                }
            } else {
                self.ships.push(ship.clone());
                self.structure_changed = true;
            }
        }
        if let Some(planet) = &other.planet {
            match &mut self.planet {
                Some(existing) => {
                    if existing != planet {
                        *existing = planet.clone();
                        existing.mark_dirty();
                    }
                }
                None => {
                    self.planet = Some(planet.clone());
                    self.structure_changed = true;
                }
            }
        }
        tracing::debug!(
            ships = self.ships.len(),
            has_planet = self.planet.is_some(),
            "Merged setup"
        );
    }

    /// Sort the ships with a stable insertion sort built on [`Setup::swap_ships`].
    pub fn sort_ships<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Ship, &Ship) -> Ordering,
    {
        for i in 1..self.ships.len() {
            let mut j = i;
            while j > 0 && compare(&self.ships[j - 1], &self.ships[j]) == Ordering::Greater {
                self.swap_ships(j - 1, j);
                j -= 1;
            }
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Number of ships.
    #[must_use]
    pub fn num_ships(&self) -> usize {
        self.ships.len()
    }

    /// Number of units, ships plus planet.
    #[must_use]
    pub fn num_objects(&self) -> usize {
        self.ships.len() + usize::from(self.planet.is_some())
    }

    /// Check for a planet.
    #[must_use]
    pub const fn has_planet(&self) -> bool {
        self.planet.is_some()
    }

    /// Get the ship in a slot.
    #[must_use]
    pub fn ship(&self, slot: usize) -> Option<&Ship> {
        self.ships.get(slot)
    }

    /// Get the ship in a slot for modification.
    pub fn ship_mut(&mut self, slot: usize) -> Option<&mut Ship> {
        self.ships.get_mut(slot)
    }

    /// All ships in slot order.
    #[must_use]
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Get the planet.
    #[must_use]
    pub const fn planet(&self) -> Option<&Planet> {
        self.planet.as_ref()
    }

    /// Get the planet for modification.
    pub fn planet_mut(&mut self) -> Option<&mut Planet> {
        self.planet.as_mut()
    }

    /// Get the unit in a slot: ships first, then the planet.
    #[must_use]
    pub fn object(&self, slot: usize) -> Option<ObjectRef<'_>> {
        if let Some(ship) = self.ships.get(slot) {
            Some(ObjectRef::Ship(ship))
        } else if slot == self.ships.len() {
            self.planet.as_ref().map(ObjectRef::Planet)
        } else {
            None
        }
    }

    /// Get the unit in a slot for modification.
    pub fn object_mut(&mut self, slot: usize) -> Option<ObjectMut<'_>> {
        let num_ships = self.ships.len();
        if slot < num_ships {
            self.ships.get_mut(slot).map(ObjectMut::Ship)
        } else if slot == num_ships {
            self.planet.as_mut().map(ObjectMut::Planet)
        } else {
            None
        }
    }

    /// Iterate over all units in slot order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.ships
            .iter()
            .map(ObjectRef::Ship)
            .chain(self.planet.as_ref().map(ObjectRef::Planet))
    }

    /// Find a ship by id.
    #[must_use]
    pub fn find_ship_by_id(&self, id: i32) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    /// Find the slot of a ship by id.
    #[must_use]
    pub fn find_ship_slot_by_id(&self, id: i32) -> Option<usize> {
        self.ships.iter().position(|s| s.id() == id)
    }

    /// Find the smallest ship id at or above `first` that is not in use.
    ///
    /// If `exists` is given, ids it reports as existing elsewhere (e.g. in
    /// the live game) are skipped as well. Returns `None` if every id up to
    /// `i32::MAX` is taken.
    #[must_use]
    pub fn find_unused_ship_id(&self, first: i32, exists: Option<&dyn Fn(i32) -> bool>) -> Option<i32> {
        let mut id = first;
        while self.find_ship_by_id(id).is_some() || exists.is_some_and(|f| f(id)) {
            id = id.checked_add(1)?;
        }
        Some(id)
    }

    /// Check whether every ship is consistent with a ship list.
    #[must_use]
    pub fn is_matching_ship_list(&self, ship_list: &ShipList) -> bool {
        self.ships.iter().all(|s| s.is_matching_ship_list(ship_list))
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SetupEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver pending changes to all listeners and mark everything clean.
    ///
    /// A structural change is reported as a single
    /// [`SetupEvent::StructureChanged`]; otherwise each dirty unit produces
    /// one event. Returns the events that were delivered.
    pub fn notify_listeners(&mut self) -> Vec<SetupEvent> {
        let mut events = Vec::new();
        if self.structure_changed {
            events.push(SetupEvent::StructureChanged);
            self.structure_changed = false;
            for ship in &mut self.ships {
                ship.mark_clean();
            }
            if let Some(planet) = &mut self.planet {
                planet.mark_clean();
            }
        } else {
            for (slot, ship) in self.ships.iter_mut().enumerate() {
                if ship.is_dirty() {
                    events.push(SetupEvent::ShipChanged(slot));
                    ship.mark_clean();
                }
            }
            if let Some(planet) = self.planet.as_mut().filter(|p| p.is_dirty()) {
                events.push(SetupEvent::PlanetChanged);
                planet.mark_clean();
            }
        }

        for listener in &mut self.listeners {
            for event in &events {
                listener(event);
            }
        }
        events
    }
}

impl Clone for Setup {
    /// Deep copy of all units. Listeners are not copied.
    fn clone(&self) -> Self {
        Self {
            ships: self.ships.clone(),
            planet: self.planet.clone(),
            structure_changed: false,
            listeners: Vec::new(),
        }
    }

    /// Replace all units with copies of `source`'s, keeping listeners.
    ///
    /// Always reports a structural change.
    fn clone_from(&mut self, source: &Self) {
        self.ships.clone_from(&source.ships);
        self.planet.clone_from(&source.planet);
        self.structure_changed = true;
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("ships", &self.ships)
            .field("planet", &self.planet)
            .field("structure_changed", &self.structure_changed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn setup_with_ids(ids: &[i32]) -> Setup {
        let mut setup = Setup::new();
        for &id in ids {
            setup.add_ship().set_id(id);
        }
        setup
    }

    #[test]
    fn test_slots_ships_then_planet() {
        let mut setup = setup_with_ids(&[5, 6]);
        assert_eq!(setup.num_objects(), 2);
        assert!(setup.object(2).is_none());

        setup.add_planet().set_id(77);
        assert_eq!(setup.num_objects(), 3);
        assert_eq!(setup.object(0).unwrap().id(), 5);
        assert_eq!(setup.object(1).unwrap().id(), 6);
        assert_eq!(setup.object(2).unwrap().as_planet().unwrap().id(), 77);
        assert!(setup.object(3).is_none());
        assert_eq!(setup.objects().count(), 3);
    }

    #[test]
    fn test_add_planet_idempotent() {
        let mut setup = Setup::new();
        setup.add_planet().set_defense(42);
        setup.notify_listeners();
        assert_eq!(setup.add_planet().defense(), 42);
        assert!(setup.notify_listeners().is_empty());
    }

    #[test]
    fn test_remove_invalid_is_noop() {
        let mut setup = setup_with_ids(&[1]);
        setup.notify_listeners();
        setup.remove_ship(4);
        setup.remove_planet();
        assert!(setup.notify_listeners().is_empty());
        setup.remove_ship(0);
        assert_eq!(setup.notify_listeners(), vec![SetupEvent::StructureChanged]);
        assert_eq!(setup.num_ships(), 0);
    }

    #[test]
    fn test_notify_coalesces_per_object() {
        let mut setup = setup_with_ids(&[1, 2, 3]);
        setup.add_planet();
        assert_eq!(setup.notify_listeners(), vec![SetupEvent::StructureChanged]);

        let ship = setup.ship_mut(2).unwrap();
        ship.set_damage(10);
        ship.set_crew(3);
        ship.set_ammo(7);
        setup.planet_mut().unwrap().set_defense(1);
        assert_eq!(
            setup.notify_listeners(),
            vec![SetupEvent::ShipChanged(2), SetupEvent::PlanetChanged]
        );
        assert!(setup.notify_listeners().is_empty());
    }

    #[test]
    fn test_listeners_receive_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut setup = Setup::new();
        let sink = Rc::clone(&seen);
        setup.subscribe(move |e| sink.borrow_mut().push(*e));

        setup.add_ship();
        setup.notify_listeners();
        setup.ship_mut(0).unwrap().set_owner(4);
        setup.notify_listeners();
        assert_eq!(
            *seen.borrow(),
            vec![SetupEvent::StructureChanged, SetupEvent::ShipChanged(0)]
        );
    }

    #[test]
    fn test_find_unused_ship_id_at_upper_limit() {
        let mut setup = setup_with_ids(&[i32::MAX - 1]);
        assert_eq!(setup.find_unused_ship_id(i32::MAX - 1, None), Some(i32::MAX));
        setup.add_ship().set_id(i32::MAX);
        assert_eq!(setup.find_unused_ship_id(i32::MAX - 1, None), None);
        assert_eq!(setup.find_unused_ship_id(i32::MAX, None), None);
    }

    #[test]
    fn test_find_unused_ship_id() {
        let setup = setup_with_ids(&[1, 2, 4]);
        assert_eq!(setup.find_unused_ship_id(1, None), Some(3));
        assert_eq!(setup.find_unused_ship_id(4, None), Some(5));
        let live = |id: i32| id == 3;
        assert_eq!(setup.find_unused_ship_id(1, Some(&live)), Some(5));
        assert_eq!(setup.find_ship_slot_by_id(4), Some(2));
        assert!(setup.find_ship_by_id(3).is_none());
    }

    #[test]
    fn test_swap_and_sort() {
        let mut setup = setup_with_ids(&[3, 1, 2]);
        setup.notify_listeners();
        setup.sort_ships(|a, b| a.id().cmp(&b.id()));
        let ids: Vec<i32> = setup.ships().iter().map(SimObject::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(setup.notify_listeners(), vec![SetupEvent::StructureChanged]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut setup = setup_with_ids(&[1, 2, 3, 4]);
        for (slot, owner) in [2, 1, 2, 1].into_iter().enumerate() {
            setup.ship_mut(slot).unwrap().set_owner(owner);
        }
        setup.sort_ships(|a, b| a.owner().cmp(&b.owner()));
        let ids: Vec<i32> = setup.ships().iter().map(SimObject::id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_duplicate_ship() {
        let mut setup = setup_with_ids(&[1, 2]);
        setup.ship_mut(0).unwrap().set_name("Ares");
        let copy = setup.duplicate_ship(0, 9).unwrap();
        assert_eq!(copy.name(), "Ares");
        assert_eq!(copy.id(), 9);
        let ids: Vec<i32> = setup.ships().iter().map(SimObject::id).collect();
        assert_eq!(ids, vec![1, 9, 2]);
        assert!(setup.duplicate_ship(5, 10).is_none());
    }

    #[test]
    fn test_merge() {
        let mut a = setup_with_ids(&[1, 2]);
        a.notify_listeners();
        let mut b = setup_with_ids(&[2, 3]);
        b.ship_mut(0).unwrap().set_owner(5);
        b.add_planet().set_defense(99);

        a.merge(&b);
        assert_eq!(a.num_ships(), 3);
        assert_eq!(a.find_ship_by_id(2).unwrap().owner(), 5);
        assert_eq!(a.planet().unwrap().defense(), 99);
        assert_eq!(a.notify_listeners(), vec![SetupEvent::StructureChanged]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = setup_with_ids(&[1]);
        a.add_planet();
        let mut b = a.clone();
        b.ship_mut(0).unwrap().set_owner(3);
        assert_eq!(a.ship(0).unwrap().owner(), 12);
        assert_eq!(b.ship(0).unwrap().owner(), 3);
    }

    #[test]
    fn test_clone_from_marks_structure() {
        let source = setup_with_ids(&[1, 2]);
        let mut target = Setup::new();
        let same = target.clone();
        target.clone_from(&same);
        assert_eq!(target.notify_listeners(), vec![SetupEvent::StructureChanged]);
        target.clone_from(&source);
        assert_eq!(target.num_ships(), 2);
        assert_eq!(target.notify_listeners(), vec![SetupEvent::StructureChanged]);
    }

    #[test]
    fn test_object_mut_dispatch() {
        let mut setup = setup_with_ids(&[1]);
        setup.add_planet();
        setup.notify_listeners();
        if let Some(mut obj) = setup.object_mut(1) {
            obj.as_sim_object().set_owner(6);
        }
        assert_eq!(setup.planet().unwrap().owner(), 6);
        assert_eq!(setup.notify_listeners(), vec![SetupEvent::PlanetChanged]);
    }
}
