pub mod aim;
pub mod queue;
