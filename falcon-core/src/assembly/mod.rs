/// Part Assembler
///
/// One builder per sub-assembly of the craft. Each returns a self-contained
/// [`Part`](crate::part::Part) subtree in craft-local coordinates; the model
/// composer attaches them under a single root in a fixed order.
///
/// Dimensions are literal and the craft is deterministic: two calls to the
/// same builder return equal trees.
mod armament;
mod blasts;
mod body;
mod boosters;
mod capsules;
mod cockpit;
mod dish;
mod landing_gear;
mod stubs;
mod wings;

pub use armament::armament;
pub use blasts::{blasts, BLAST_LENGTH, BLAST_MUZZLE_OFFSET};
pub use body::{body, HULL_RADIUS};
pub use boosters::{booster_count, boosters};
pub use capsules::{mirror_rescue_capsule, rescue_capsules};
pub use cockpit::cockpit;
pub use dish::dish;
pub use landing_gear::landing_gear;
pub use stubs::rear_stubs;
pub use wings::wings;

use crate::error::GeometryResult;
use crate::geometry::Mesh;
use crate::patch::close_partial_cylinder;
use crate::primitives::{cylinder, CylinderParams};
use crate::sculpt::{sculpt, Sculpt};

/// Node name of the upper turret, read back for muzzle positions
pub const TURRET_TOP: &str = "turret_top";

/// Node name of the lower turret
pub const TURRET_BOTTOM: &str = "turret_bottom";

/// Name prefix shared by every engine halo
pub const BOOSTER_HALO_PREFIX: &str = "booster_halo";

/// Partial cylinder with `edits` applied and its seam closed
fn patched_sweep(params: &CylinderParams, edits: &[Sculpt]) -> GeometryResult<Mesh> {
    let mut mesh = cylinder(params)?;
    sculpt(&mut mesh, edits)?;
    close_partial_cylinder(&mut mesh, params.radial_segments)?;
    Ok(mesh)
}

/// `mesh` with `edits` applied
fn sculpted(mut mesh: Mesh, edits: &[Sculpt]) -> GeometryResult<Mesh> {
    sculpt(&mut mesh, edits)?;
    Ok(mesh)
}
