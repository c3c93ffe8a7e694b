// Domain layer: catalog documents, local schema checks and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
