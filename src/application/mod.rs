pub mod agent;
pub mod capability;
pub mod extraction;
