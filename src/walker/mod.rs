pub mod helpers;
pub use helpers::*;

pub mod scan_record;
pub use scan_record::*;

pub mod join_record;
pub use join_record::*;

pub mod subplan_record;
pub use subplan_record::*;

pub mod plan_walk;
pub use plan_walk::*;
