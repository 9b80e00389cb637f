//! Interactive front end: console abstraction and the prompt loop

pub mod console;
pub mod interactive;

pub use console::{Console, StdConsole};
pub use interactive::{
    download_with_fallback, run, run_once, run_once_until, run_until, select_and_download,
};
