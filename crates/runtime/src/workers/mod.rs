//! Background workers owned by the runtime.

mod character;

pub(crate) use character::{CharacterWorker, Command};
