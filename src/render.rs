pub mod composite;
pub mod surface;
pub mod text;
