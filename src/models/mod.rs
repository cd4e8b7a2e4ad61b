pub mod impact;

pub use impact::{estimate, sweep, ImpactEstimate, ImpactPoint, SweepDomain};
