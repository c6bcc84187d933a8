//! Binary setup files.
//!
//! Setup files come in six versions. All share the same skeleton: a
//! signature, a 16-bit object count (bit 15 flags the planet), the ship
//! records, then the optional planet record. Records grew by appending
//! fields, so every version's record is a prefix of the next one's. Reading
//! zero-pads a short record to full size and decodes fields the version has;
//! writing encodes a full record and cuts it to the version's size.
//!
//! All values are little-endian.

use std::io::{self, Read, Write};

use crate::charset::{decode_fixed, encode_fixed, Charset};
use crate::data::NUM_TORPEDO_TYPES;
use crate::error::{Result, SimError};
use crate::object::{ObjectFlags, SimObject};
use crate::planet::Planet;
use crate::setup::Setup;
use crate::ship::{Ship, AGG_KILL};
use crate::translator::Translator;

/// Signature of version 0 files.
pub const MAGIC_V0: &[u8; 6] = b"CCsim\x1A";
/// Signature prefix of version 1 and later files.
pub const MAGIC_V1: &[u8; 6] = b"CCbsim";
/// Terminator following the version digit.
const MAGIC_TERMINATOR: u8 = 0x1A;

/// Highest version this module reads and writes.
pub const MAX_VERSION: u8 = 5;
/// Lowest version this module writes.
pub const MIN_WRITE_VERSION: u8 = 3;

const PLANET_FLAG: u16 = 0x8000;
const NAME_LEN: usize = 20;
const FC_LEN: usize = 3;
const FULL_SHIP_SIZE: usize = 67;
const FULL_PLANET_SIZE: usize = 51;

// ============================================================================
// Version table
// ============================================================================

/// Record layout of one file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLayout {
    /// Version number.
    pub version: u8,
    /// Size of a ship record in bytes.
    pub ship_size: usize,
    /// Size of a planet record in bytes.
    pub planet_size: usize,
    /// Ships store aggressiveness.
    pub aggressiveness: bool,
    /// Ships store experience next to the launcher count; planets store a
    /// per-type torpedo stock.
    pub experience_and_stock: bool,
    /// Units store the low 16 flag bits; ships store mass; planets store
    /// experience.
    pub flags: bool,
    /// Units store FLAK overrides; ships store the intercept target.
    pub overrides: bool,
    /// Units store the high 16 flag bits.
    pub wide_flags: bool,
}

/// Layout of every known version, indexed by version number.
pub const LAYOUTS: [FormatLayout; 6] = [
    FormatLayout { version: 0, ship_size: 49, planet_size: 19, aggressiveness: false, experience_and_stock: false, flags: false, overrides: false, wide_flags: false },
    FormatLayout { version: 1, ship_size: 51, planet_size: 19, aggressiveness: true, experience_and_stock: false, flags: false, overrides: false, wide_flags: false },
    FormatLayout { version: 2, ship_size: 51, planet_size: 39, aggressiveness: true, experience_and_stock: true, flags: false, overrides: false, wide_flags: false },
    FormatLayout { version: 3, ship_size: 57, planet_size: 43, aggressiveness: true, experience_and_stock: true, flags: true, overrides: false, wide_flags: false },
    FormatLayout { version: 4, ship_size: 65, planet_size: 49, aggressiveness: true, experience_and_stock: true, flags: true, overrides: true, wide_flags: false },
    FormatLayout { version: 5, ship_size: 67, planet_size: 51, aggressiveness: true, experience_and_stock: true, flags: true, overrides: true, wide_flags: true },
];

impl FormatLayout {
    /// Get the layout of a version.
    #[must_use]
    pub fn for_version(version: u8) -> Option<&'static Self> {
        LAYOUTS.get(usize::from(version))
    }
}

// ============================================================================
// Byte helpers
// ============================================================================

fn get_i16(buf: &[u8], pos: usize) -> i32 {
    i32::from(i16::from_le_bytes([buf[pos], buf[pos + 1]]))
}

fn get_u16(buf: &[u8], pos: usize) -> u32 {
    u32::from(u16::from_le_bytes([buf[pos], buf[pos + 1]]))
}

fn get_i32(buf: &[u8], pos: usize) -> i32 {
    i32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

fn put_i16(buf: &mut [u8], pos: usize, value: i32) {
    buf[pos..pos + 2].copy_from_slice(&(value as i16).to_le_bytes());
}

fn put_u16(buf: &mut [u8], pos: usize, value: u32) {
    buf[pos..pos + 2].copy_from_slice(&(value as u16).to_le_bytes());
}

fn put_i32(buf: &mut [u8], pos: usize, value: i32) {
    buf[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}

// ============================================================================
// Loader
// ============================================================================

/// Reads and writes setup files.
pub struct Loader<'a> {
    charset: &'a dyn Charset,
    translator: &'a dyn Translator,
    file_name: String,
}

impl<'a> Loader<'a> {
    /// Create a loader using `charset` for stored strings and `translator`
    /// for error messages.
    #[must_use]
    pub fn new(charset: &'a dyn Charset, translator: &'a dyn Translator) -> Self {
        Self {
            charset,
            translator,
            file_name: "<stream>".to_string(),
        }
    }

    /// Set the file name reported in errors.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    fn format_error(&self, message: &str) -> SimError {
        SimError::file_format(self.file_name.clone(), self.translator.translate(message))
    }

    fn read_exact(&self, stream: &mut dyn Read, buf: &mut [u8]) -> Result<()> {
        stream.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                self.format_error("File is truncated")
            } else {
                SimError::Io(e)
            }
        })
    }

    /// Load a setup file, appending its units to `setup`.
    ///
    /// Returns the file version. On error, `setup` may contain the units
    /// read before the failure.
    pub fn load(&self, stream: &mut dyn Read, setup: &mut Setup) -> Result<u8> {
        let version = self.read_signature(stream)?;
        let layout = &LAYOUTS[usize::from(version)];

        let mut count = [0u8; 2];
        self.read_exact(stream, &mut count)?;
        let count = u16::from_le_bytes(count);
        let has_planet = count & PLANET_FLAG != 0;
        let num_ships = count & !PLANET_FLAG;
        tracing::debug!(file = %self.file_name, version, num_ships, has_planet, "Loading setup");

        for _ in 0..num_ships {
            let mut buf = [0u8; FULL_SHIP_SIZE];
            self.read_exact(stream, &mut buf[..layout.ship_size])?;
            self.decode_ship(&buf, layout, setup.add_ship());
        }
        if has_planet {
            let mut buf = [0u8; FULL_PLANET_SIZE];
            self.read_exact(stream, &mut buf[..layout.planet_size])?;
            self.decode_planet(&buf, layout, setup.add_planet());
        }
        Ok(version)
    }

    fn read_signature(&self, stream: &mut dyn Read) -> Result<u8> {
        let mut magic = [0u8; 6];
        self.read_exact(stream, &mut magic)?;
        if &magic == MAGIC_V0 {
            return Ok(0);
        }
        if &magic != MAGIC_V1 {
            return Err(self.format_error("Invalid file header"));
        }

        let mut tail = [0u8; 2];
        self.read_exact(stream, &mut tail)?;
        let version = tail[0].wrapping_sub(b'0').wrapping_add(1);
        if tail[1] != MAGIC_TERMINATOR || tail[0] < b'0' {
            return Err(self.format_error("Invalid file header"));
        }
        if version == 0 || version > MAX_VERSION {
            return Err(self.format_error("Unsupported file format version"));
        }
        Ok(version)
    }

    fn decode_ship(&self, buf: &[u8], layout: &FormatLayout, ship: &mut Ship) {
        ship.set_name(&decode_fixed(self.charset, &buf[0..NAME_LEN]));
        ship.set_damage(get_i16(buf, 20));
        ship.set_crew(get_i16(buf, 22));
        ship.set_id(get_i16(buf, 24));
        ship.set_owner(get_i16(buf, 26));
        ship.set_beam_type(get_i16(buf, 28));
        ship.set_num_beams(get_i16(buf, 30));
        ship.set_torpedo_type(get_i16(buf, 32));
        if layout.experience_and_stock {
            let packed = get_u16(buf, 34);
            ship.set_num_launchers((packed & 0xFF) as i32);
            ship.set_experience_level((packed >> 8) as i32);
        } else {
            ship.set_num_launchers(get_i16(buf, 34));
            ship.set_experience_level(0);
        }
        ship.set_num_bays(get_i16(buf, 36));
        ship.set_ammo(get_i16(buf, 38));
        ship.set_engine_type(get_i16(buf, 40));
        ship.set_hull_type_only(get_i16(buf, 42));
        ship.set_shield(get_i16(buf, 44));
        ship.set_friendly_code(&decode_fixed(self.charset, &buf[46..46 + FC_LEN]));

        ship.set_aggressiveness(if layout.aggressiveness { get_i16(buf, 49) } else { AGG_KILL });
        ship.set_mass(if layout.flags { get_i16(buf, 53) } else { 100 });
        ship.set_flags(decode_flags(buf, layout, 51, 65));
        if layout.overrides {
            ship.set_flak_rating_override(get_i32(buf, 57));
            ship.set_flak_compensation_override(get_i16(buf, 61));
            ship.set_intercept_id(get_i16(buf, 63));
        } else {
            ship.set_flak_rating_override(0);
            ship.set_flak_compensation_override(0);
            ship.set_intercept_id(0);
        }
    }

    fn decode_planet(&self, buf: &[u8], layout: &FormatLayout, planet: &mut Planet) {
        planet.set_id(get_i16(buf, 0));
        planet.set_owner(get_i16(buf, 2));
        planet.set_friendly_code(&decode_fixed(self.charset, &buf[4..4 + FC_LEN]));
        planet.set_defense(get_i16(buf, 7));
        planet.set_base_defense(get_i16(buf, 9));
        planet.set_base_beam_tech(get_i16(buf, 11));
        planet.set_base_fighters(get_i16(buf, 13));
        planet.set_base_torpedo_tech(get_i16(buf, 15));
        planet.set_shield(100);
        planet.set_damage(0);

        if layout.experience_and_stock {
            for (i, torpedo_type) in (1..=NUM_TORPEDO_TYPES as i32).enumerate() {
                planet.set_num_base_torpedoes(torpedo_type, get_i16(buf, 19 + 2 * i));
            }
        } else {
            for torpedo_type in 1..=NUM_TORPEDO_TYPES as i32 {
                planet.set_num_base_torpedoes(torpedo_type, 0);
            }
            planet.set_num_base_torpedoes(planet.base_torpedo_tech(), get_i16(buf, 17));
        }

        planet.set_flags(decode_flags(buf, layout, 39, 49));
        planet.set_experience_level(if layout.flags { get_i16(buf, 41) } else { 0 });
        if layout.overrides {
            planet.set_flak_rating_override(get_i32(buf, 43));
            planet.set_flak_compensation_override(get_i16(buf, 47));
        } else {
            planet.set_flak_rating_override(0);
            planet.set_flak_compensation_override(0);
        }
    }

    // ------------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------------

    /// Save a setup in the lowest version that represents it completely.
    ///
    /// Returns the version written.
    pub fn save(&self, stream: &mut dyn Write, setup: &Setup) -> Result<u8> {
        let version = required_version(setup);
        self.save_version(stream, setup, version)?;
        Ok(version)
    }

    /// Save a setup in a specific version.
    ///
    /// Only versions [`MIN_WRITE_VERSION`] to [`MAX_VERSION`] can be
    /// written. Data the version cannot represent is dropped.
    pub fn save_version(&self, stream: &mut dyn Write, setup: &Setup, version: u8) -> Result<()> {
        if !(MIN_WRITE_VERSION..=MAX_VERSION).contains(&version) {
            return Err(SimError::InvalidState(format!(
                "setup files cannot be written in version {version}"
            )));
        }
        let layout = &LAYOUTS[usize::from(version)];

        let num_ships = u16::try_from(setup.num_ships())
            .ok()
            .filter(|&n| n & PLANET_FLAG == 0)
            .ok_or_else(|| SimError::InvalidState(format!("too many ships: {}", setup.num_ships())))?;
        tracing::debug!(file = %self.file_name, version, num_ships, has_planet = setup.has_planet(), "Saving setup");

        let mut out = Vec::with_capacity(
            10 + usize::from(num_ships) * layout.ship_size + layout.planet_size,
        );
        out.extend_from_slice(MAGIC_V1);
        out.push(b'0' + version - 1);
        out.push(MAGIC_TERMINATOR);
        let count = num_ships | if setup.has_planet() { PLANET_FLAG } else { 0 };
        out.extend_from_slice(&count.to_le_bytes());

        for ship in setup.ships() {
            let record = self.encode_ship(ship, layout);
            out.extend_from_slice(&record[..layout.ship_size]);
        }
        if let Some(planet) = setup.planet() {
            let record = self.encode_planet(planet, layout);
            out.extend_from_slice(&record[..layout.planet_size]);
        }

        stream.write_all(&out)?;
        Ok(())
    }

    fn encode_ship(&self, ship: &Ship, layout: &FormatLayout) -> [u8; FULL_SHIP_SIZE] {
        let mut buf = [0u8; FULL_SHIP_SIZE];
        buf[0..NAME_LEN].copy_from_slice(&encode_fixed(self.charset, ship.name(), NAME_LEN));
        put_i16(&mut buf, 20, ship.damage());
        put_i16(&mut buf, 22, ship.crew());
        put_i16(&mut buf, 24, ship.id());
        put_i16(&mut buf, 26, ship.owner());
        put_i16(&mut buf, 28, ship.beam_type());
        put_i16(&mut buf, 30, ship.num_beams());
        put_i16(&mut buf, 32, ship.torpedo_type());
        if layout.experience_and_stock {
            let packed = (ship.num_launchers() & 0xFF) | ((ship.experience_level() & 0xFF) << 8);
            put_i16(&mut buf, 34, packed);
        } else {
            put_i16(&mut buf, 34, ship.num_launchers());
        }
        put_i16(&mut buf, 36, ship.num_bays());
        put_i16(&mut buf, 38, ship.ammo());
        put_i16(&mut buf, 40, ship.engine_type());
        put_i16(&mut buf, 42, ship.hull_type());
        put_i16(&mut buf, 44, ship.shield());
        buf[46..46 + FC_LEN].copy_from_slice(&encode_fixed(self.charset, ship.friendly_code(), FC_LEN));
        put_i16(&mut buf, 49, ship.aggressiveness());
        put_u16(&mut buf, 51, ship.flags().bits() & 0xFFFF);
        put_i16(&mut buf, 53, ship.mass());
        put_i32(&mut buf, 57, ship.flak_rating_override());
        put_i16(&mut buf, 61, ship.flak_compensation_override());
        put_i16(&mut buf, 63, ship.intercept_id());
        put_u16(&mut buf, 65, ship.flags().bits() >> 16);
        buf
    }

    fn encode_planet(&self, planet: &Planet, layout: &FormatLayout) -> [u8; FULL_PLANET_SIZE] {
        let mut buf = [0u8; FULL_PLANET_SIZE];
        put_i16(&mut buf, 0, planet.id());
        put_i16(&mut buf, 2, planet.owner());
        buf[4..4 + FC_LEN].copy_from_slice(&encode_fixed(self.charset, planet.friendly_code(), FC_LEN));
        put_i16(&mut buf, 7, planet.defense());
        put_i16(&mut buf, 9, planet.base_defense());
        put_i16(&mut buf, 11, planet.base_beam_tech());
        put_i16(&mut buf, 13, planet.base_fighters());
        put_i16(&mut buf, 15, planet.base_torpedo_tech());
        put_i16(&mut buf, 17, planet.num_base_torpedoes(planet.base_torpedo_tech()));
        if layout.experience_and_stock {
            for (i, torpedo_type) in (1..=NUM_TORPEDO_TYPES as i32).enumerate() {
                put_i16(&mut buf, 19 + 2 * i, planet.num_base_torpedoes(torpedo_type));
            }
        }
        put_u16(&mut buf, 39, planet.flags().bits() & 0xFFFF);
        put_i16(&mut buf, 41, planet.experience_level());
        put_i32(&mut buf, 43, planet.flak_rating_override());
        put_i16(&mut buf, 47, planet.flak_compensation_override());
        put_u16(&mut buf, 49, planet.flags().bits() >> 16);
        buf
    }
}

fn decode_flags(buf: &[u8], layout: &FormatLayout, low: usize, high: usize) -> ObjectFlags {
    let mut bits = 0;
    if layout.flags {
        bits |= get_u16(buf, low);
    }
    if layout.wide_flags {
        bits |= get_u16(buf, high) << 16;
    }
    let mut flags = ObjectFlags::from_bits_retain(bits);
    if !layout.overrides {
        flags.remove(ObjectFlags::RATING_OVERRIDE);
    }
    flags
}

/// Lowest writable version that represents every unit of `setup`.
#[must_use]
pub fn required_version(setup: &Setup) -> u8 {
    let objects = || setup.objects().map(|o| o.common());
    if objects().any(|o| o.flags.needs_wide_storage()) {
        5
    } else if objects().any(|o| o.flags.contains(ObjectFlags::RATING_OVERRIDE))
        || setup.ships().iter().any(|s| s.intercept_id() != 0)
    {
        4
    } else {
        MIN_WRITE_VERSION
    }
}
