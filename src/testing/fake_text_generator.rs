use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ServiceKind};
use crate::ports::TextGenerator;

/// Scripted text generator that replays responses in order.
#[derive(Clone, Default)]
pub struct FakeTextGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    instructions: Arc<Mutex<Vec<String>>>,
}

impl FakeTextGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect())),
            instructions: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Generator whose first call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let fake = Self::default();
        fake.responses.lock().unwrap().push_back(Err(message.into()));
        fake
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeTextGenerator {
    fn generate_text(&self, instruction: &str) -> Result<String, AppError> {
        self.instructions.lock().unwrap().push(instruction.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AppError::external(ServiceKind::Text, message, Some(500))),
            None => Err(AppError::external(ServiceKind::Text, "no scripted response left", None)),
        }
    }
}
