//! algebra - exact polynomial helpers for the collision solver (no floating point)

pub mod bipoly;
pub mod poly;
pub mod roots;

pub use bipoly::BiPoly;
pub use poly::Poly;
pub use roots::integer_roots;
