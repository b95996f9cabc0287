// Script input — the line-by-line dialog CSV every transform starts from.

pub mod rows;

pub use rows::{read_script, read_script_from, ScriptRow};
