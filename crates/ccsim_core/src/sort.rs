//! Ship sort predicates for [`crate::setup::Setup::sort_ships`].

use std::cmp::Ordering;

use crate::battle_order::{HOST_REFERENCE, PHOST_REFERENCE};
use crate::object::SimObject;
use crate::ship::Ship;

/// Compare by id.
#[must_use]
pub fn compare_id(a: &Ship, b: &Ship) -> Ordering {
    a.id().cmp(&b.id())
}

/// Compare by owner.
#[must_use]
pub fn compare_owner(a: &Ship, b: &Ship) -> Ordering {
    a.owner().cmp(&b.owner())
}

/// Compare by hull type.
#[must_use]
pub fn compare_hull(a: &Ship, b: &Ship) -> Ordering {
    a.hull_type().cmp(&b.hull_type())
}

/// Compare by battle order under the reference Host version.
#[must_use]
pub fn compare_battle_order_host(a: &Ship, b: &Ship) -> Ordering {
    HOST_REFERENCE.get_sim_ship(a).cmp(&HOST_REFERENCE.get_sim_ship(b))
}

/// Compare by battle order under the reference `PHost` version.
#[must_use]
pub fn compare_battle_order_phost(a: &Ship, b: &Ship) -> Ordering {
    PHOST_REFERENCE.get_sim_ship(a).cmp(&PHOST_REFERENCE.get_sim_ship(b))
}

/// Compare by name, ignoring case.
#[must_use]
pub fn compare_name(a: &Ship, b: &Ship) -> Ordering {
    a.name().to_uppercase().cmp(&b.name().to_uppercase())
}
