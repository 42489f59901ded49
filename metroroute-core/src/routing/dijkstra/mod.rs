mod state;
mod weighted;

pub(crate) use weighted::{WeightField, shortest_path};
