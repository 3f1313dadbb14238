pub(crate) mod array;
pub(crate) mod constructors;
pub(crate) mod element;
pub(crate) mod random;
pub(crate) mod storage;
pub(crate) mod vector;
