pub mod binder;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod fitter;
pub mod geojson;
pub mod resolve;
pub mod surface;

pub use binder::*;
pub use controller::*;
pub use error::*;
pub use fetch::*;
pub use fitter::*;
pub use geojson::*;
pub use resolve::*;
pub use surface::*;
