// System Layer
pub mod jj;
pub mod runner;
pub mod tasks;

pub use jj::JjCommand;
pub use runner::{CommandRunner, JjRunner};
pub use tasks::{Task, TaskOutcome, TaskQueue, TaskRunner};
