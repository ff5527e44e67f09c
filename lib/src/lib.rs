mod ensure;
mod reclaim;
mod space;

pub use ensure::*;
pub use reclaim::*;
pub use space::*;
