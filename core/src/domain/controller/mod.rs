pub mod entities;
pub mod ports;
pub mod render;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use render::*;
pub use services::*;
pub use value_objects::*;
