use alloc::vec::Vec;

use crate::error::TransportError;

/// Byte channel to the receiver, supplied by the host application.
///
/// Implementations own framing: [`read`](Transport::read) must deliver exactly
/// one complete `$...\r\n` sentence. [`SentenceFramer`](crate::SentenceFramer)
/// does the reassembly for stream-based channels. A read that cannot
/// complete within the transport's deadline should fail with
/// [`TransportError::Timeout`].
pub trait Transport {
    /// Channel specific setting accepted by [`configure`](Transport::configure)
    type Setting;

    fn initialize(&mut self) -> Result<(), TransportError>;

    /// Transmits one complete sentence
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Replaces the contents of `buffer` with the next received sentence
    fn read(&mut self, buffer: &mut Vec<u8>) -> Result<(), TransportError>;

    fn configure(&mut self, setting: Self::Setting) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Setting = T::Setting;

    fn initialize(&mut self) -> Result<(), TransportError> {
        (**self).initialize()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(bytes)
    }

    fn read(&mut self, buffer: &mut Vec<u8>) -> Result<(), TransportError> {
        (**self).read(buffer)
    }

    fn configure(&mut self, setting: Self::Setting) -> Result<(), TransportError> {
        (**self).configure(setting)
    }
}
