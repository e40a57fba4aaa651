use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use lc29::{SentenceFramer, Transport, TransportError};
use log::{debug, warn};

pub mod cli;
pub use lc29;

/// [`Transport`] over a serial port, reassembling sentences with a [`SentenceFramer`]
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
    framer: SentenceFramer,
    frames: VecDeque<Vec<u8>>,
    read_timeout: Duration,
}

impl SerialTransport {
    /// `read_timeout` bounds how long [`Transport::read`] waits for a complete sentence
    pub fn new(port: Box<dyn serialport::SerialPort>, read_timeout: Duration) -> Self {
        Self {
            port,
            framer: SentenceFramer::default(),
            frames: VecDeque::new(),
            read_timeout,
        }
    }

    pub fn port_name(&self) -> Option<String> {
        self.port.name()
    }

    /// Reads the serial port, converting timeouts into "no data received"
    fn read_port(&mut self, output: &mut [u8]) -> std::io::Result<usize> {
        match self.port.read(output) {
            Ok(b) => Ok(b),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn fill_frames(&mut self) -> Result<(), TransportError> {
        const CHUNK_LEN: usize = 256;
        let mut local_buf = [0; CHUNK_LEN];
        let nbytes = self.read_port(&mut local_buf)?;
        for frame in self.framer.consume(&local_buf[..nbytes]) {
            match frame {
                Ok(frame) => self.frames.push_back(frame),
                Err(e) => warn!("Malformed sentence, ignore it; cause {e}"),
            }
        }
        Ok(())
    }
}

fn port_error(e: serialport::Error) -> TransportError {
    TransportError::Io(e.into())
}

impl Transport for SerialTransport {
    /// Baud rate
    type Setting = u32;

    fn initialize(&mut self) -> Result<(), TransportError> {
        self.port
            .clear(serialport::ClearBuffer::All)
            .map_err(port_error)?;
        self.framer.clear();
        self.frames.clear();
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read(&mut self, buffer: &mut Vec<u8>) -> Result<(), TransportError> {
        let start = Instant::now();
        loop {
            if let Some(frame) = self.frames.pop_front() {
                buffer.clear();
                buffer.extend_from_slice(&frame);
                return Ok(());
            }
            if start.elapsed() > self.read_timeout {
                debug!(
                    "no sentence within {:?}, {} bytes buffered",
                    self.read_timeout,
                    self.framer.buffered_len()
                );
                return Err(TransportError::Timeout);
            }
            self.fill_frames()?;
        }
    }

    fn configure(&mut self, baud: u32) -> Result<(), TransportError> {
        self.port.set_baud_rate(baud).map_err(port_error)?;
        self.framer.clear();
        self.frames.clear();
        Ok(())
    }
}
