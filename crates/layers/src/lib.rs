pub mod descriptor;
pub mod registry;
pub mod symbology;

pub use descriptor::*;
pub use registry::*;
pub use symbology::*;
