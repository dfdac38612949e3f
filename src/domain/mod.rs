// Domain layer: records, the entity schema table and the ports the controller talks through.

pub mod model;
pub mod ports;
pub mod schema;
