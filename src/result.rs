use crate::error::ResolverError;

pub type Result<T> = std::result::Result<T, ResolverError>;
