#[cfg(test)]
pub mod capability_test;
#[cfg(test)]
pub mod forward_test;

pub mod capability;
pub mod forward;
pub mod source;
pub mod target;
