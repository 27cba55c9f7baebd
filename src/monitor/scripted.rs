use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::device::{DeviceConnector, DeviceLink, PollError};

pub(crate) enum DeviceScript {
    Refuse(String),
    Respond(Result<String, PollError>),
}

/// Replays scripted open/read outcomes and counts closed links.
#[derive(Default)]
pub(crate) struct ScriptedConnector {
    script: Mutex<VecDeque<DeviceScript>>,
    closed: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub(crate) fn new(script: Vec<DeviceScript>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            closed: Arc::default(),
        }
    }

    pub(crate) fn closed_links(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl DeviceConnector for ScriptedConnector {
    fn open(&self, _port: &str, _baud_rate: u32) -> Result<Box<dyn DeviceLink>, PollError> {
        let next = self
            .script
            .lock()
            .expect("script lock should not be poisoned")
            .pop_front();
        match next {
            Some(DeviceScript::Respond(response)) => Ok(Box::new(ScriptedLink {
                response: Some(response),
                closed: Arc::clone(&self.closed),
            })),
            Some(DeviceScript::Refuse(error)) => Err(PollError::Connection(error)),
            None => Err(PollError::Connection("script exhausted".to_string())),
        }
    }
}

struct ScriptedLink {
    response: Option<Result<String, PollError>>,
    closed: Arc<AtomicUsize>,
}

impl DeviceLink for ScriptedLink {
    fn read_line(&mut self) -> Result<String, PollError> {
        self.response.take().unwrap_or_else(|| Ok(String::new()))
    }
}

impl Drop for ScriptedLink {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
