pub mod file;
mod png;
mod svg;
