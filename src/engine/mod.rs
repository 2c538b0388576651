pub(crate) mod backend;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod raster;
pub(crate) mod reduce;
