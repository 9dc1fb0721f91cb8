use std::sync::{Arc, Mutex};

use ytblog::GenerationFailure;
use ytblog::summarize::Generator;

#[derive(Clone)]
pub struct MockGenerator {
    pub response: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with_status: Option<u16>,
}

impl MockGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: Some(status),
        }
    }
}

impl Generator for MockGenerator {
    async fn generate(&self, input: &str) -> Result<String, GenerationFailure> {
        self.calls.lock().unwrap().push(input.to_string());
        if let Some(status) = self.fail_with_status {
            return Err(GenerationFailure::Api {
                status,
                body: "API key not valid".to_string(),
            });
        }
        Ok(self.response.clone())
    }
}
