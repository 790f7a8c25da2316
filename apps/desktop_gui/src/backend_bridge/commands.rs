//! Backend commands queued from UI to backend worker.

use shared::form::FormInput;

pub enum BackendCommand {
    Submit(FormInput),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit(_) => "submit",
        }
    }
}
