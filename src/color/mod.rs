pub(crate) mod hex;
pub(crate) mod policy;
