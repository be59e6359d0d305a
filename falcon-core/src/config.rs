// Palette, glow and camera defaults shared by every front-end. Part
// dimensions live next to the assembler that uses them.

// =============================================================================
// PALETTE
// =============================================================================

/// Hull plating.
pub const PRIMARY_COLOR: u32 = 0xdddddd;

/// Decks, cockpit and plates.
pub const SECONDARY_COLOR: u32 = 0xcccccc;

/// Pods, gear and gun barrels.
pub const TERTIARY_COLOR: u32 = 0xaaaaaa;

/// Rear vent stubs.
pub const QUATERNARY_COLOR: u32 = 0x888888;

/// Engine blocks and laser cores.
pub const EMISSIVE_COLOR: u32 = 0xffffff;

/// Engine halo.
pub const BOOSTER_GLOW_COLOR: u32 = 0x00e3fc;

/// Laser halo.
pub const BLAST_GLOW_COLOR: u32 = 0xff0000;

// =============================================================================
// GLOW
// =============================================================================

/// Constant term of the rim formula `pow(c - dot(n, v), p)`.
pub const GLOW_C: f32 = 1.0;

/// Exponent of the rim formula.
pub const GLOW_P: f32 = 6.0;

// =============================================================================
// CAMERA
// =============================================================================

/// Default camera position, above and behind the craft.
pub const CAMERA_POSITION: [f32; 3] = [0.0, 250.0, 500.0];

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 60.0;

pub const CAMERA_NEAR: f32 = 1.0;

pub const CAMERA_FAR: f32 = 5000.0;
