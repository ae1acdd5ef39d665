//! Per-block machine simulation: state structs plus the tick systems that
//! advance them. The host engine owns the world, the tick loop and the
//! persistence store; everything here is driven through those seams.

mod behavior;
mod composter;
mod cursor;
mod energy;
mod harvester;
mod inventory;
mod snapshot;
mod tuning;

pub use behavior::*;
pub use composter::*;
pub use cursor::*;
pub use energy::*;
pub use harvester::*;
pub use inventory::*;
pub use snapshot::*;
pub use tuning::*;
