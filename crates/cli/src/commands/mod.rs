pub(crate) mod load;
pub(crate) mod schema;
pub(crate) mod serve;
