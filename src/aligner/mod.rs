pub mod clause;
pub use clause::*;

pub mod annotation;
pub use annotation::*;

pub mod align_error;
pub use align_error::*;

pub mod token_aligner;
pub use token_aligner::*;
