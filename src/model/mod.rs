pub mod data_core;
pub mod gateway;
pub mod shape;
pub mod transducer;
