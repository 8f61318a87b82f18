pub(crate) mod git;
pub(crate) mod github;
