pub mod compose;
pub mod layer;
pub mod primitives;
pub mod view;
