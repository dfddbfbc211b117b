// Domain layer: core models and date handling. No I/O here.

pub mod model;
