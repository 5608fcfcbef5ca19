pub(crate) mod draw;
pub(crate) mod geometry;
pub(crate) mod group;
pub(crate) mod tracker;
