#![allow(dead_code)]

use std::collections::VecDeque;

use lc29::{Transport, TransportError};

/// In-memory transport replaying canned replies and recording every write
#[derive(Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Result<Vec<u8>, TransportError>>,
    written: Vec<Vec<u8>>,
    reads: usize,
    initialized: bool,
    fail_writes: bool,
    settings: Vec<u32>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: &[&str]) -> Self {
        let mut transport = Self::new();
        for reply in replies {
            transport.push_reply(reply);
        }
        transport
    }

    pub fn push_reply(&mut self, reply: &str) {
        self.replies.push_back(Ok(reply.as_bytes().to_vec()));
    }

    pub fn push_error(&mut self, err: TransportError) {
        self.replies.push_back(Err(err));
    }

    pub fn fail_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn written(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn settings(&self) -> &[u32] {
        &self.settings
    }
}

impl Transport for ScriptedTransport {
    type Setting = u32;

    fn initialize(&mut self) -> Result<(), TransportError> {
        self.initialized = true;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::Closed);
        }
        self.written.push(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, buffer: &mut Vec<u8>) -> Result<(), TransportError> {
        self.reads += 1;
        let reply = self.replies.pop_front().unwrap_or(Err(TransportError::Timeout))?;
        buffer.clear();
        buffer.extend_from_slice(&reply);
        Ok(())
    }

    fn configure(&mut self, setting: u32) -> Result<(), TransportError> {
        self.settings.push(setting);
        Ok(())
    }
}
