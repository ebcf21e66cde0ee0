pub mod install;
pub mod serve;
pub mod stdio;
