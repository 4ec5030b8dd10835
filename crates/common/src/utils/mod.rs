pub mod logging;
pub mod percent;
