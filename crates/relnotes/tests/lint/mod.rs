mod clean;
mod configured_levels;
mod errors;
mod fix;
mod invalid_config;
mod link_target;
mod no_matches;
mod unparseable;
mod unreadable;
mod warnings;
