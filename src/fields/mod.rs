pub(crate) mod dtype;
pub(crate) mod field;
pub(crate) mod registry;
