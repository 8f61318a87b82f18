mod custom;
mod exists;
mod forced;
mod needs_summary;
mod no_project;
mod point_release;
