// Domain layer: the course record and the ports the catalog is loaded through.

pub mod model;
pub mod ports;
