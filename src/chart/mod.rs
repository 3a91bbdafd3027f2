//! Chart building.
//!
//! - Plotly figure schema as typed records (`figure`)
//! - country curve history -> 3-D surface (`surface`)
//! - (date, term) cross-section -> choropleth map (`choropleth`)
//!
//! Builders here are pure: they never touch the filesystem or the network, and
//! calling them twice with the same inputs yields identical figures.

pub mod choropleth;
pub mod figure;
pub mod surface;

pub use choropleth::*;
pub use figure::*;
pub use surface::*;
