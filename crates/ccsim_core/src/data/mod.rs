//! Reference data for hulls and ship components.
//!
//! All structs are designed to be deserialized from RON files. The
//! simulation core only reads this data; nothing here is mutated once loaded.
//!
//! **Note:** This module contains no IO - it only defines data types and
//! parses text handed to it.

mod component_data;
mod hull_data;
mod ship_list;

pub use component_data::{BeamData, EngineData, TorpedoData};
pub use hull_data::HullData;
pub use ship_list::{ShipList, NUM_TORPEDO_TYPES};
