mod json;
mod missing_file;
mod summary;
