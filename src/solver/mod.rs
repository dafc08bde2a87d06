pub mod constraint;
pub mod engine;
pub mod network;
pub mod propagator;
pub mod store;
pub mod trail;
pub mod work_list;
