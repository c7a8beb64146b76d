pub(crate) mod chroma;
pub(crate) mod resolve;
