mod config;
mod encodings;
mod ini_editing;
mod list;
mod show;
