// Buffer transfer primitives supplied by the caller.
//
// The queue never touches a caller's buffer directly; it only asks the
// buffer to copy bytes in or out. Either copy may fail, which the queue
// reports as `FifoError::Fault` after undoing its own bookkeeping.

use crate::error::TransferFault;

/// A caller-owned source of record bytes.
pub trait UserSource {
    /// Fill all of `dst` from the start of this buffer.
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault>;
}

/// A caller-owned destination for record bytes.
pub trait UserSink {
    /// Copy all of `src` to the start of this buffer.
    fn copy_out(&mut self, src: &[u8]) -> Result<(), TransferFault>;
}

impl UserSource for [u8] {
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault> {
        let src = self.get(..dst.len()).ok_or(TransferFault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserSource for [u8; N] {
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault> {
        self.as_slice().copy_in(dst)
    }
}

impl UserSource for Vec<u8> {
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault> {
        self.as_slice().copy_in(dst)
    }
}

impl UserSource for str {
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault> {
        self.as_bytes().copy_in(dst)
    }
}

impl UserSink for [u8] {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        let dst = self.get_mut(..src.len()).ok_or(TransferFault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserSink for [u8; N] {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        self.as_mut_slice().copy_out(src)
    }
}

/// A `Vec` sink is resized to exactly the record and never faults.
impl UserSink for Vec<u8> {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        self.clear();
        self.extend_from_slice(src);
        Ok(())
    }
}
