//! Proptest strategies for setups.
//!
//! Each strategy takes a file version and only generates values that
//! version stores exactly, so a save followed by a load must give back an
//! equal setup.

use ccsim_core::data::NUM_TORPEDO_TYPES;
use ccsim_core::object::{ObjectFlags, SimObject};
use ccsim_core::planet::Planet;
use ccsim_core::setup::Setup;
use ccsim_core::ship::Ship;
use proptest::prelude::*;

/// Generate a unit name that survives fixed-width storage.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,18}[A-Za-z0-9]"
}

/// Generate a three-character friendly code.
pub fn arb_friendly_code() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9?]{3}"
}

/// Generate a 16-bit field value.
pub fn arb_word() -> impl Strategy<Value = i32> {
    i32::from(i16::MIN)..=i32::from(i16::MAX)
}

/// Generate unit flags storable in `version`.
pub fn arb_flags(version: u8) -> impl Strategy<Value = ObjectFlags> {
    any::<u32>().prop_map(move |bits| {
        let mut flags = ObjectFlags::from_bits_truncate(bits);
        if version < 5 {
            flags = ObjectFlags::from_bits_truncate(flags.bits() & 0xFFFF);
        }
        if version < 4 {
            flags.remove(ObjectFlags::RATING_OVERRIDE);
        }
        flags
    })
}

/// FLAK overrides and intercept target storable in `version`.
pub fn arb_overrides(version: u8) -> impl Strategy<Value = (i32, i32, i32)> {
    if version >= 4 {
        (any::<i32>(), arb_word(), arb_word()).boxed()
    } else {
        Just((0, 0, 0)).boxed()
    }
}

/// Generate a ship storable in `version` (3 or later).
pub fn arb_ship(version: u8) -> impl Strategy<Value = Ship> {
    (
        (arb_word(), arb_name(), arb_friendly_code(), 0i32..=12, 0i32..=150, 0i32..=100),
        (arb_word(), 0i32..=10, 0i32..=20, 0i32..=10, 0i32..=255, 0i32..=4),
        (0i32..=20, 0i32..=500, 1i32..=9, 0i32..=105, 1i32..=2000, -1i32..=13),
        (arb_flags(version), arb_overrides(version)),
    )
        .prop_map(
            |(
                (id, name, fc, owner, damage, shield),
                (crew, beam_type, num_beams, torpedo_type, num_launchers, experience),
                (num_bays, ammo, engine_type, hull_type, mass, aggressiveness),
                (flags, (rating, compensation, intercept)),
            )| {
                let mut ship = Ship::new();
                ship.set_id(id);
                ship.set_name(&name);
                ship.set_friendly_code(&fc);
                ship.set_owner(owner);
                ship.set_damage(damage);
                ship.set_shield(shield);
                ship.set_crew(crew);
                ship.set_beam_type(beam_type);
                ship.set_num_beams(num_beams);
                ship.set_torpedo_type(torpedo_type);
                ship.set_num_launchers(num_launchers);
                ship.set_experience_level(experience);
                ship.set_num_bays(num_bays);
                ship.set_ammo(ammo);
                ship.set_engine_type(engine_type);
                ship.set_hull_type_only(hull_type);
                ship.set_mass(mass);
                ship.set_aggressiveness(aggressiveness);
                ship.set_flags(flags);
                ship.set_flak_rating_override(rating);
                ship.set_flak_compensation_override(compensation);
                ship.set_intercept_id(intercept);
                ship
            },
        )
}

/// Generate a planet storable in `version` (3 or later).
///
/// Name, damage, and shield keep their defaults since files do not store
/// them.
pub fn arb_planet(version: u8) -> impl Strategy<Value = Planet> {
    (
        (1i32..=500, 0i32..=12, arb_friendly_code(), 0i32..=4),
        (0i32..=300, 0i32..=200, 0i32..=10, 0i32..=10, 0i32..=60),
        proptest::collection::vec(0i32..=100, NUM_TORPEDO_TYPES),
        (arb_flags(version), arb_overrides(version)),
    )
        .prop_map(
            |(
                (id, owner, fc, experience),
                (defense, base_defense, beam_tech, torpedo_tech, fighters),
                torpedoes,
                (flags, (rating, compensation, _)),
            )| {
                let mut planet = Planet::new();
                planet.set_id(id);
                planet.set_owner(owner);
                planet.set_friendly_code(&fc);
                planet.set_experience_level(experience);
                planet.set_defense(defense);
                planet.set_base_defense(base_defense);
                planet.set_base_beam_tech(beam_tech);
                planet.set_base_torpedo_tech(torpedo_tech);
                planet.set_base_fighters(fighters);
                for (torpedo_type, count) in (1..).zip(torpedoes) {
                    planet.set_num_base_torpedoes(torpedo_type, count);
                }
                planet.set_flags(flags);
                planet.set_flak_rating_override(rating);
                planet.set_flak_compensation_override(compensation);
                planet
            },
        )
}

/// Generate a setup of up to `max_ships` ships and an optional planet.
pub fn arb_setup(version: u8, max_ships: usize) -> impl Strategy<Value = Setup> {
    (
        proptest::collection::vec(arb_ship(version), 0..=max_ships),
        proptest::option::of(arb_planet(version)),
    )
        .prop_map(|(ships, planet)| {
            let mut setup = Setup::new();
            for ship in ships {
                *setup.add_ship() = ship;
            }
            if let Some(planet) = planet {
                *setup.add_planet() = planet;
            }
            setup
        })
}
