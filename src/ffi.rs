//! C ABI boundary for host bindings.
//!
//! A host runtime (a Ruby or Python extension, for instance) links against the `cdylib`,
//! registers `ed2k_md4` under whatever name its module system expects, and checks
//! `ed2k_capability` to learn which interface revision it is talking to. This is the only place
//! where input still arrives untyped, so it is the only place that validates it.

use std::ffi::{c_char, c_int};

use log::warn;

use crate::cs::security::md4::{md4_digest, MD4_OUTPUT_SIZE};
use crate::error::{Error, Result};

/// Interface revision advertised to host bindings.
pub const C_ED2K: i64 = 1;

pub const ED2K_OK: c_int = 0;
pub const ED2K_ERR_NO_DATA: c_int = -1;
pub const ED2K_ERR_NO_OUTPUT: c_int = -2;
pub const ED2K_ERR_INPUT_TOO_LARGE: c_int = -3;

impl Error {
    /// Status code reported across the C boundary.
    pub fn code(&self) -> c_int {
        match self {
            Error::NoData => ED2K_ERR_NO_DATA,
            Error::NullOutput => ED2K_ERR_NO_OUTPUT,
            Error::InputTooLarge { .. } => ED2K_ERR_INPUT_TOO_LARGE,
        }
    }
}

/// Validating front end shared by the C entry point and Rust callers holding possibly-absent data.
pub fn md4_raw(data: Option<&[u8]>) -> Result<[u8; MD4_OUTPUT_SIZE]> {
    let data = data.ok_or(Error::NoData)?;
    md4_digest(data)
}

/// Returns [`C_ED2K`].
#[no_mangle]
pub extern "C" fn ed2k_capability() -> i64 {
    C_ED2K
}

/// Hashes `len` bytes at `data` and writes the 16-byte MD4 digest to `out`.
///
/// Returns [`ED2K_OK`] on success or a negative status; `ed2k_strerror` describes it. Nothing is
/// written to `out` on failure.
///
/// # Safety
///
/// `data` must be null or valid for reads of `len` bytes, and `out` must be null or valid for
/// writes of 16 bytes. The two regions must not overlap.
#[no_mangle]
pub unsafe extern "C" fn ed2k_md4(out: *mut u8, data: *const u8, len: usize) -> c_int {
    let input = if data.is_null() {
        None
    } else {
        // SAFETY: non-null and readable for `len` bytes per the contract above.
        Some(unsafe { std::slice::from_raw_parts(data, len) })
    };

    let result = if out.is_null() {
        Err(Error::NullOutput)
    } else {
        md4_raw(input)
    };

    match result {
        Ok(digest) => {
            // SAFETY: non-null and writable for 16 bytes per the contract above.
            unsafe { std::ptr::copy_nonoverlapping(digest.as_ptr(), out, MD4_OUTPUT_SIZE) };
            ED2K_OK
        }
        Err(err) => {
            warn!("ed2k_md4 rejected call: {err}");
            err.code()
        }
    }
}

/// Static, NUL-terminated message for a status code returned by `ed2k_md4`.
#[no_mangle]
pub extern "C" fn ed2k_strerror(code: c_int) -> *const c_char {
    message(code).as_ptr()
}

fn message(code: c_int) -> &'static std::ffi::CStr {
    match code {
        ED2K_OK => c"ok",
        ED2K_ERR_NO_DATA => c"No data to hash.",
        ED2K_ERR_NO_OUTPUT => c"no output buffer for digest",
        ED2K_ERR_INPUT_TOO_LARGE => c"input exceeds the 2^64-bit MD4 length field",
        _ => c"unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_md4_raw_rejects_missing_data() {
        let err = md4_raw(None).unwrap_err();
        assert_eq!(err, Error::NoData);
        assert_eq!(err.to_string(), "No data to hash.");
    }

    #[test]
    fn test_md4_raw_hashes_bytes() {
        let digest = md4_raw(Some(b"abc")).unwrap();
        assert_eq!(hex::encode(digest), "a448017aaf21d8525fc10ae87aa6729d");
    }

    #[test]
    fn test_ed2k_md4_writes_digest() {
        let data = b"message digest";
        let mut out = [0u8; MD4_OUTPUT_SIZE];
        let status = unsafe { ed2k_md4(out.as_mut_ptr(), data.as_ptr(), data.len()) };
        assert_eq!(status, ED2K_OK);
        assert_eq!(hex::encode(out), "d9130a8164549fe818874806e1c7014b");
    }

    #[test]
    fn test_ed2k_md4_empty_slice() {
        let data: &[u8] = &[];
        let mut out = [0u8; MD4_OUTPUT_SIZE];
        let status = unsafe { ed2k_md4(out.as_mut_ptr(), data.as_ptr(), 0) };
        assert_eq!(status, ED2K_OK);
        assert_eq!(hex::encode(out), "31d6cfe0d16ae931b73c59d7e0c089c0");
    }

    #[test]
    fn test_ed2k_md4_null_data() {
        let mut out = [0xAAu8; MD4_OUTPUT_SIZE];
        let status = unsafe { ed2k_md4(out.as_mut_ptr(), std::ptr::null(), 0) };
        assert_eq!(status, ED2K_ERR_NO_DATA);
        assert_eq!(out, [0xAAu8; MD4_OUTPUT_SIZE]);

        let msg = unsafe { CStr::from_ptr(ed2k_strerror(status)) };
        assert_eq!(msg.to_str().unwrap(), "No data to hash.");
    }

    #[test]
    fn test_ed2k_md4_null_output() {
        let data = b"abc";
        let status = unsafe { ed2k_md4(std::ptr::null_mut(), data.as_ptr(), data.len()) };
        assert_eq!(status, ED2K_ERR_NO_OUTPUT);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::InputTooLarge { len: 0 }.code(), ED2K_ERR_INPUT_TOO_LARGE);
        assert_eq!(
            message(ED2K_ERR_INPUT_TOO_LARGE).to_str().unwrap(),
            "input exceeds the 2^64-bit MD4 length field"
        );
        assert_eq!(message(42).to_str().unwrap(), "unknown error");
    }

    #[test]
    fn test_capability() {
        assert_eq!(ed2k_capability(), 1);
    }
}
