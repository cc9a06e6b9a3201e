//! Entity-определения инвентаря топологии: устройства и связи между ними.

pub mod devices;
pub mod links;
