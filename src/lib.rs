// Ponytalk: character interaction networks and pony-language statistics
//
// This is the library root. Each module corresponds to one batch transform
// (or the shared plumbing those transforms read and write through).

pub mod config;
pub mod network;
pub mod output;
pub mod script;
pub mod stats;
pub mod words;
