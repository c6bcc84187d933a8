//! Attributes shared by every simulated unit.
//!
//! A simulated unit is either a [`Ship`] or a [`Planet`]. Both embed an
//! [`Object`] holding identity, combat state and flags, and expose it through
//! the [`SimObject`] trait. Every setter marks the unit dirty when the value
//! actually changes; [`crate::setup::Setup::notify_listeners`] converts dirty
//! state into change events and marks the units clean again.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::HostConfiguration;
use crate::planet::Planet;
use crate::ship::Ship;

// ============================================================================
// Flags
// ============================================================================

bitflags! {
    /// Per-unit option flags.
    ///
    /// Abilities come in pairs: the `*_SET` bit records that the ability
    /// was explicitly configured, the plain bit carries its value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u32 {
        /// Friendly code is randomized before each fight.
        const RANDOM_FC = 1 << 0;
        /// Randomize first friendly code character.
        const RANDOM_FC1 = 1 << 1;
        /// Randomize second friendly code character.
        const RANDOM_FC2 = 1 << 2;
        /// Randomize third friendly code character.
        const RANDOM_FC3 = 1 << 3;
        /// FLAK rating and compensation are taken from the overrides.
        const RATING_OVERRIDE = 1 << 4;
        /// Ship is cloaked.
        const CLOAKED = 1 << 5;
        /// Unit does not take part in the fight.
        const DEACTIVATED = 1 << 6;

        /// Planet immunity ability.
        const PLANET_IMMUNITY = 1 << 7;
        /// Planet immunity was set explicitly.
        const PLANET_IMMUNITY_SET = 1 << 8;
        /// Full weaponry ability.
        const FULL_WEAPONRY = 1 << 9;
        /// Full weaponry was set explicitly.
        const FULL_WEAPONRY_SET = 1 << 10;
        /// Commander ability.
        const COMMANDER = 1 << 11;
        /// Commander was set explicitly.
        const COMMANDER_SET = 1 << 12;
        /// Elusive ability.
        const ELUSIVE = 1 << 13;
        /// Elusive was set explicitly.
        const ELUSIVE_SET = 1 << 14;
        /// Squadron ability.
        const SQUADRON = 1 << 15;
        /// Squadron was set explicitly.
        const SQUADRON_SET = 1 << 16;
        /// Shield generator ability.
        const SHIELD_GENERATOR = 1 << 17;
        /// Shield generator was set explicitly.
        const SHIELD_GENERATOR_SET = 1 << 18;
        /// Cloaked fighter bays ability.
        const CLOAKED_BAYS = 1 << 19;
        /// Cloaked fighter bays were set explicitly.
        const CLOAKED_BAYS_SET = 1 << 20;
        /// Double beam charge ability.
        const DOUBLE_BEAM_CHARGE = 1 << 21;
        /// Double beam charge was set explicitly.
        const DOUBLE_BEAM_CHARGE_SET = 1 << 22;
    }
}

impl ObjectFlags {
    /// Check whether any flag needs the wide (32-bit) storage field.
    #[must_use]
    pub const fn needs_wide_storage(self) -> bool {
        self.bits() >> 16 != 0
    }
}

// ============================================================================
// Common object data
// ============================================================================

/// Identity and combat attributes common to ships and planets.
///
/// Equality ignores the change marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) friendly_code: String,
    pub(crate) owner: i32,
    pub(crate) damage: i32,
    pub(crate) shield: i32,
    pub(crate) experience_level: i32,
    pub(crate) flags: ObjectFlags,
    pub(crate) flak_rating_override: i32,
    pub(crate) flak_compensation_override: i32,
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            id: 1,
            name: "?".to_string(),
            friendly_code: "???".to_string(),
            owner: 12,
            damage: 0,
            shield: 100,
            experience_level: 0,
            flags: ObjectFlags::empty(),
            flak_rating_override: 0,
            flak_compensation_override: 0,
            dirty: false,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.friendly_code == other.friendly_code
            && self.owner == other.owner
            && self.damage == other.damage
            && self.shield == other.shield
            && self.experience_level == other.experience_level
            && self.flags == other.flags
            && self.flak_rating_override == other.flak_rating_override
            && self.flak_compensation_override == other.flak_compensation_override
    }
}

impl Eq for Object {}

/// Assign `value` to `field`, setting `dirty` if it changed.
pub(crate) fn update<T: PartialEq>(field: &mut T, value: T, dirty: &mut bool) {
    if *field != value {
        *field = value;
        *dirty = true;
    }
}

/// Shared behaviour of simulated ships and planets.
///
/// Implementors provide access to their embedded [`Object`]; all accessors
/// are provided on top of that.
pub trait SimObject {
    /// Common object data.
    fn common(&self) -> &Object;

    /// Mutable common object data. Changes made through this do not mark
    /// the object dirty; use the setters.
    fn common_mut(&mut self) -> &mut Object;

    /// Object id.
    fn id(&self) -> i32 {
        self.common().id
    }

    /// Set object id.
    fn set_id(&mut self, id: i32) {
        let o = self.common_mut();
        update(&mut o.id, id, &mut o.dirty);
    }

    /// Object name.
    fn name(&self) -> &str {
        &self.common().name
    }

    /// Set object name.
    fn set_name(&mut self, name: &str) {
        let o = self.common_mut();
        if o.name != name {
            o.name = name.to_string();
            o.dirty = true;
        }
    }

    /// Friendly code.
    fn friendly_code(&self) -> &str {
        &self.common().friendly_code
    }

    /// Set friendly code.
    fn set_friendly_code(&mut self, code: &str) {
        let o = self.common_mut();
        if o.friendly_code != code {
            o.friendly_code = code.to_string();
            o.dirty = true;
        }
    }

    /// Owner player number, 0 for unowned.
    fn owner(&self) -> i32 {
        self.common().owner
    }

    /// Set owner.
    fn set_owner(&mut self, owner: i32) {
        let o = self.common_mut();
        update(&mut o.owner, owner, &mut o.dirty);
    }

    /// Damage in percent.
    fn damage(&self) -> i32 {
        self.common().damage
    }

    /// Set damage.
    fn set_damage(&mut self, damage: i32) {
        let o = self.common_mut();
        update(&mut o.damage, damage, &mut o.dirty);
    }

    /// Shield level in percent.
    fn shield(&self) -> i32 {
        self.common().shield
    }

    /// Set shield level.
    fn set_shield(&mut self, shield: i32) {
        let o = self.common_mut();
        update(&mut o.shield, shield, &mut o.dirty);
    }

    /// Experience level.
    fn experience_level(&self) -> i32 {
        self.common().experience_level
    }

    /// Set experience level.
    fn set_experience_level(&mut self, level: i32) {
        let o = self.common_mut();
        update(&mut o.experience_level, level, &mut o.dirty);
    }

    /// Option flags.
    fn flags(&self) -> ObjectFlags {
        self.common().flags
    }

    /// Replace option flags.
    fn set_flags(&mut self, flags: ObjectFlags) {
        let o = self.common_mut();
        update(&mut o.flags, flags, &mut o.dirty);
    }

    /// FLAK rating override, used when [`ObjectFlags::RATING_OVERRIDE`] is set.
    fn flak_rating_override(&self) -> i32 {
        self.common().flak_rating_override
    }

    /// Set FLAK rating override.
    fn set_flak_rating_override(&mut self, rating: i32) {
        let o = self.common_mut();
        update(&mut o.flak_rating_override, rating, &mut o.dirty);
    }

    /// FLAK compensation override.
    fn flak_compensation_override(&self) -> i32 {
        self.common().flak_compensation_override
    }

    /// Set FLAK compensation override.
    fn set_flak_compensation_override(&mut self, compensation: i32) {
        let o = self.common_mut();
        update(&mut o.flak_compensation_override, compensation, &mut o.dirty);
    }

    /// Check whether the object changed since the last notification.
    fn is_dirty(&self) -> bool {
        self.common().dirty
    }

    /// Mark the object changed.
    fn mark_dirty(&mut self) {
        self.common_mut().dirty = true;
    }

    /// Mark the object unchanged.
    fn mark_clean(&mut self) {
        self.common_mut().dirty = false;
    }

    /// Maximum damage the owner's race survives.
    fn max_damage(&self, config: &HostConfiguration) -> i32 {
        config.max_damage_per_player.get(self.owner())
    }

    /// Maximum shield level at the current damage.
    fn max_shield(&self) -> i32 {
        (100 - self.damage()).max(0)
    }
}

// ============================================================================
// Kind dispatch
// ============================================================================

/// Borrowed view of a simulated unit of either kind.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    /// A ship.
    Ship(&'a Ship),
    /// The planet.
    Planet(&'a Planet),
}

impl<'a> ObjectRef<'a> {
    /// Common object data.
    #[must_use]
    pub fn common(self) -> &'a Object {
        match self {
            Self::Ship(s) => s.common(),
            Self::Planet(p) => p.common(),
        }
    }

    /// Get the ship, if this is one.
    #[must_use]
    pub const fn as_ship(self) -> Option<&'a Ship> {
        match self {
            Self::Ship(s) => Some(s),
            Self::Planet(_) => None,
        }
    }

    /// Get the planet, if this is one.
    #[must_use]
    pub const fn as_planet(self) -> Option<&'a Planet> {
        match self {
            Self::Planet(p) => Some(p),
            Self::Ship(_) => None,
        }
    }

    /// Object id.
    #[must_use]
    pub fn id(self) -> i32 {
        self.common().id
    }

    /// Owner player number.
    #[must_use]
    pub fn owner(self) -> i32 {
        self.common().owner
    }

    /// Object name.
    #[must_use]
    pub fn name(self) -> &'a str {
        &self.common().name
    }
}

/// Mutable view of a simulated unit of either kind.
#[derive(Debug)]
pub enum ObjectMut<'a> {
    /// A ship.
    Ship(&'a mut Ship),
    /// The planet.
    Planet(&'a mut Planet),
}

impl ObjectMut<'_> {
    /// Access the unit through the common trait.
    pub fn as_sim_object(&mut self) -> &mut dyn SimObject {
        match self {
            Self::Ship(s) => &mut **s,
            Self::Planet(p) => &mut **p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_defaults() {
        let ship = Ship::default();
        assert_eq!(ship.id(), 1);
        assert_eq!(ship.name(), "?");
        assert_eq!(ship.friendly_code(), "???");
        assert_eq!(ship.owner(), 12);
        assert_eq!(ship.damage(), 0);
        assert_eq!(ship.shield(), 100);
        assert!(ship.flags().is_empty());
        assert!(!ship.is_dirty());
    }

    #[test]
    fn test_setter_marks_dirty_only_on_change() {
        let mut ship = Ship::default();
        ship.set_owner(12);
        assert!(!ship.is_dirty());
        ship.set_owner(3);
        assert!(ship.is_dirty());
        ship.mark_clean();
        ship.set_name("?");
        assert!(!ship.is_dirty());
        ship.set_name("Ares");
        assert!(ship.is_dirty());
    }

    #[test]
    fn test_equality_ignores_dirty() {
        let mut a = Ship::default();
        a.set_owner(3);
        let mut b = a.clone();
        b.mark_clean();
        assert!(a.is_dirty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_damage_and_shield() {
        let mut config = HostConfiguration::default();
        let mut planet = Planet::default();
        planet.set_owner(2);
        assert_eq!(planet.max_damage(&config), 99);
        config.max_damage_per_player.set(2, 150);
        assert_eq!(planet.max_damage(&config), 150);
        planet.set_owner(5);
        assert_eq!(planet.max_damage(&config), 99);

        planet.set_damage(30);
        assert_eq!(planet.max_shield(), 70);
        planet.set_damage(120);
        assert_eq!(planet.max_shield(), 0);
    }

    #[test]
    fn test_wide_flags() {
        assert!(!ObjectFlags::SQUADRON.needs_wide_storage());
        assert!(ObjectFlags::SQUADRON_SET.needs_wide_storage());
        assert!((ObjectFlags::CLOAKED | ObjectFlags::DOUBLE_BEAM_CHARGE).needs_wide_storage());
    }

    #[test]
    fn test_object_ref_dispatch() {
        let ship = Ship::default();
        let planet = Planet::default();
        assert!(ObjectRef::Ship(&ship).as_ship().is_some());
        assert!(ObjectRef::Ship(&ship).as_planet().is_none());
        assert!(ObjectRef::Planet(&planet).as_planet().is_some());
        assert_eq!(ObjectRef::Planet(&planet).owner(), 12);
    }
}
