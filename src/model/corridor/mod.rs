mod corridor;
mod corridor_group;

pub use corridor::Corridor;
pub use corridor_group::CorridorGroup;
