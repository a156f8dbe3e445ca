pub(crate) mod datasets;
pub(crate) mod query;
pub(crate) mod serve;
