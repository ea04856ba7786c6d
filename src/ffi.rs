use crate::error::TransferFault;
use crate::trace;
use crate::Core::Signal;
use crate::FIFO::{Fifo, FifoBuilder, UserSink, UserSource};
use std::ptr;

// Control command encoding: type byte in bits 8..16, number in bits 0..8.
pub const SCULL_IOC_MAGIC: u8 = b'k';
pub const SCULL_IOC_MAXNR: u8 = 1;

/// Query the maximum record size.
pub const SCULL_IOCGETELEMSZ: u32 = scull_io(SCULL_IOC_MAGIC, 1);

pub const fn scull_io(ty: u8, nr: u8) -> u32 {
    ((ty as u32) << 8) | nr as u32
}

const fn ioc_type(cmd: u32) -> u8 {
    ((cmd >> 8) & 0xff) as u8
}

const fn ioc_nr(cmd: u32) -> u8 {
    (cmd & 0xff) as u8
}

/// Handle to a queue instance (opaque pointer)
pub struct FifoHandle {
    inner: Fifo,
    /// Used when the caller passes no signal; never raised.
    idle: Signal,
}

/// Handle to an interruption token (opaque pointer)
pub struct SignalHandle {
    inner: Signal,
}

/// Caller memory to copy a record from.
struct UserPtr {
    ptr: *const u8,
    len: usize,
}

impl UserSource for UserPtr {
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), TransferFault> {
        if dst.is_empty() {
            return Ok(());
        }
        if self.ptr.is_null() || dst.len() > self.len {
            return Err(TransferFault);
        }
        unsafe {
            ptr::copy_nonoverlapping(self.ptr, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }
}

/// Caller memory to copy a record into.
struct UserPtrMut {
    ptr: *mut u8,
    len: usize,
}

impl UserSink for UserPtrMut {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        if src.is_empty() {
            return Ok(());
        }
        if self.ptr.is_null() || src.len() > self.len {
            return Err(TransferFault);
        }
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.ptr, src.len());
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Create a queue.
///
/// # Arguments
/// * `capacity` - Number of slots.
/// * `elem_size` - Maximum record size in bytes.
///
/// # Returns
/// * Pointer to `FifoHandle`, or NULL on failure.
#[no_mangle]
pub extern "C" fn scull_fifo_create(capacity: usize, elem_size: usize) -> *mut FifoHandle {
    let built = FifoBuilder::new()
        .with_capacity(capacity)
        .with_elem_size(elem_size)
        .build()
        .map_err(|e| {
            trace::warn!(error = %e, "scull: can't create FIFO");
            e
        });

    match built {
        Ok(fifo) => Box::into_raw(Box::new(FifoHandle {
            inner: fifo,
            idle: Signal::new(),
        })),
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a queue. No thread may be blocked on it.
#[no_mangle]
pub extern "C" fn scull_fifo_destroy(handle: *mut FifoHandle) {
    if !handle.is_null() {
        unsafe {
            let handle = *Box::from_raw(handle);
            handle.inner.destroy();
        }
    }
}

// -----------------------------------------------------------------------------
// File operations
// -----------------------------------------------------------------------------

#[no_mangle]
pub extern "C" fn scull_fifo_open(handle: *const FifoHandle) -> i32 {
    if handle.is_null() {
        return -libc::EINVAL;
    }
    trace::debug!("scull open");
    match unsafe { (*handle).inner.open() } {
        Ok(()) => 0,
        Err(e) => e.errno(),
    }
}

#[no_mangle]
pub extern "C" fn scull_fifo_release(handle: *const FifoHandle) -> i32 {
    if handle.is_null() {
        return -libc::EINVAL;
    }
    trace::debug!("scull close");
    match unsafe { (*handle).inner.close() } {
        Ok(()) => 0,
        Err(e) => e.errno(),
    }
}

/// Read one record.
///
/// # Arguments
/// * `handle` - Pointer to `FifoHandle`.
/// * `signal` - Pointer to `SignalHandle` able to interrupt the wait, or NULL.
/// * `buf` - Buffer to copy the record into.
/// * `count` - Size of `buf`.
///
/// # Returns
/// * Number of bytes copied.
/// * `-EINTR` if the signal was raised while waiting.
/// * `-EFAULT` if `buf` is NULL or too small for the copy.
#[no_mangle]
pub extern "C" fn scull_fifo_read(
    handle: *const FifoHandle,
    signal: *const SignalHandle,
    buf: *mut u8,
    count: usize,
) -> isize {
    if handle.is_null() {
        return -libc::EINVAL as isize;
    }

    let handle = unsafe { &*handle };
    let signal = if signal.is_null() {
        &handle.idle
    } else {
        unsafe { &(*signal).inner }
    };
    let mut dst = UserPtrMut { ptr: buf, len: count };

    match handle.inner.read(&mut dst, count, signal) {
        Ok(n) => n as isize,
        Err(e) => e.errno() as isize,
    }
}

/// Write one record; anything beyond the maximum record size is dropped.
///
/// # Returns
/// * Number of bytes accepted.
/// * `-EINTR` if the signal was raised while waiting.
/// * `-EFAULT` if `buf` is NULL.
#[no_mangle]
pub extern "C" fn scull_fifo_write(
    handle: *const FifoHandle,
    signal: *const SignalHandle,
    buf: *const u8,
    count: usize,
) -> isize {
    if handle.is_null() {
        return -libc::EINVAL as isize;
    }

    let handle = unsafe { &*handle };
    let signal = if signal.is_null() {
        &handle.idle
    } else {
        unsafe { &(*signal).inner }
    };
    let src = UserPtr { ptr: buf, len: count };

    match handle.inner.write(&src, count, signal) {
        Ok(n) => n as isize,
        Err(e) => e.errno() as isize,
    }
}

/// Control query.
///
/// # Returns
/// * `SCULL_IOCGETELEMSZ`: the maximum record size.
/// * `-ENOTTY` for a foreign or unknown command.
///
/// Commands transfer no data, so `_arg` is never dereferenced and may be 0.
#[no_mangle]
pub extern "C" fn scull_fifo_ioctl(handle: *const FifoHandle, cmd: u32, _arg: usize) -> i64 {
    if handle.is_null() {
        return -libc::EINVAL as i64;
    }

    // Foreign commands are rejected before anything else.
    if ioc_type(cmd) != SCULL_IOC_MAGIC || ioc_nr(cmd) > SCULL_IOC_MAXNR {
        return -libc::ENOTTY as i64;
    }
    match cmd {
        SCULL_IOCGETELEMSZ => unsafe { (*handle).inner.max_record_size() as i64 },
        _ => -libc::ENOTTY as i64,
    }
}

// -----------------------------------------------------------------------------
// Signals
// -----------------------------------------------------------------------------

#[no_mangle]
pub extern "C" fn scull_signal_new() -> *mut SignalHandle {
    Box::into_raw(Box::new(SignalHandle {
        inner: Signal::new(),
    }))
}

/// Interrupt every read/write currently waiting with this signal.
#[no_mangle]
pub extern "C" fn scull_signal_raise(signal: *const SignalHandle) {
    if !signal.is_null() {
        unsafe { (*signal).inner.raise() };
    }
}

#[no_mangle]
pub extern "C" fn scull_signal_clear(signal: *const SignalHandle) {
    if !signal.is_null() {
        unsafe { (*signal).inner.clear() };
    }
}

/// Free a signal handle. No call may still be waiting with it.
#[no_mangle]
pub extern "C" fn scull_signal_free(signal: *mut SignalHandle) {
    if !signal.is_null() {
        unsafe {
            let _ = Box::from_raw(signal);
        }
    }
}
