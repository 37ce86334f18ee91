pub mod confirmer;
pub mod view_controller;

pub use confirmer::{AutoConfirm, Confirmer};
pub use view_controller::{ActionOutcome, ViewController};
