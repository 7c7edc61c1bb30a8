//! C FFI bindings for dlc-core
//!
//! This crate provides a C-compatible API so a GUI form layer (Qt or similar)
//! can hand over its parameter bundle and receive the table and export files.
//! Sessions cross the boundary as JSON strings; `created` and `custom` may be
//! left out, so a bare `{"parameters": {...}}` object is accepted.

use dlc_core::{CustomDlcForm, ExportFormat, ExportPayload, Session};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Opaque handle to an export payload
pub struct DlcPayload {
    inner: ExportPayload,
}

unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn into_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Assemble the table of a session and export it
///
/// # Safety
/// - `session_json` and `format` must be valid C strings
/// - `format` is one of "excel", "bladed", "flex5"
/// - Returns null on error
/// - Caller must free the result with `dlc_free_payload`
#[no_mangle]
pub unsafe extern "C" fn dlc_export_json(
    session_json: *const c_char,
    format: *const c_char,
) -> *mut DlcPayload {
    let (Some(json), Some(format)) = (read_str(session_json), read_str(format)) else {
        return ptr::null_mut();
    };

    let result = format
        .parse::<ExportFormat>()
        .map_err(dlc_core::Error::from)
        .and_then(|format| {
            let table = Session::from_json(json)?.table()?;
            dlc_core::export(&table, format)
        });

    match result {
        Ok(payload) => Box::into_raw(Box::new(DlcPayload { inner: payload })),
        Err(e) => {
            log::warn!("export failed: {}", e);
            ptr::null_mut()
        }
    }
}

/// Assemble the table of a session as a JSON array of rows
///
/// # Safety
/// - `session_json` must be a valid C string
/// - Returns null on error
/// - Caller must free the returned string with `dlc_free_string`
#[no_mangle]
pub unsafe extern "C" fn dlc_table_json(session_json: *const c_char) -> *mut c_char {
    let Some(json) = read_str(session_json) else {
        return ptr::null_mut();
    };

    let result = Session::from_json(json)
        .and_then(|s| s.table())
        .and_then(|t| serde_json::to_string(&t.rows).map_err(dlc_core::Error::from));

    match result {
        Ok(s) => into_c_string(&s),
        Err(e) => {
            log::warn!("table assembly failed: {}", e);
            ptr::null_mut()
        }
    }
}

/// Submit a custom DLC form and return the updated session
///
/// # Safety
/// - `session_json` and `form_json` must be valid C strings
/// - Returns null on error
/// - Caller must free the returned string with `dlc_free_string`
#[no_mangle]
pub unsafe extern "C" fn dlc_add_custom_json(
    session_json: *const c_char,
    form_json: *const c_char,
) -> *mut c_char {
    let (Some(session_json), Some(form_json)) = (read_str(session_json), read_str(form_json)) else {
        return ptr::null_mut();
    };

    let result = Session::from_json(session_json).and_then(|mut session| {
        let form: CustomDlcForm = serde_json::from_str(form_json)?;
        session.add_custom(&form)?;
        Ok(serde_json::to_string(&session)?)
    });

    match result {
        Ok(s) => into_c_string(&s),
        Err(e) => {
            log::warn!("custom DLC rejected: {}", e);
            ptr::null_mut()
        }
    }
}

/// Free an export payload
///
/// # Safety
/// - `payload` must be a valid pointer returned by `dlc_export_json` or null
#[no_mangle]
pub unsafe extern "C" fn dlc_free_payload(payload: *mut DlcPayload) {
    if !payload.is_null() {
        drop(Box::from_raw(payload));
    }
}

/// Get the byte length of a payload
///
/// # Safety
/// - `payload` must be a valid pointer returned by `dlc_export_json`
#[no_mangle]
pub unsafe extern "C" fn dlc_payload_len(payload: *const DlcPayload) -> usize {
    if payload.is_null() {
        return 0;
    }
    (*payload).inner.bytes.len()
}

/// Get a pointer to the payload bytes
///
/// # Safety
/// - `payload` must be a valid pointer returned by `dlc_export_json`
/// - The pointer is valid until `dlc_free_payload` is called
#[no_mangle]
pub unsafe extern "C" fn dlc_payload_data(payload: *const DlcPayload) -> *const u8 {
    if payload.is_null() {
        return ptr::null();
    }
    (*payload).inner.bytes.as_ptr()
}

/// Get the download filename of a payload
///
/// # Safety
/// - `payload` must be a valid pointer returned by `dlc_export_json`
/// - Caller must free the returned string with `dlc_free_string`
#[no_mangle]
pub unsafe extern "C" fn dlc_payload_filename(payload: *const DlcPayload) -> *mut c_char {
    if payload.is_null() {
        return ptr::null_mut();
    }
    into_c_string((*payload).inner.filename)
}

/// Get the content type of a payload
///
/// # Safety
/// - `payload` must be a valid pointer returned by `dlc_export_json`
/// - Caller must free the returned string with `dlc_free_string`
#[no_mangle]
pub unsafe extern "C" fn dlc_payload_content_type(payload: *const DlcPayload) -> *mut c_char {
    if payload.is_null() {
        return ptr::null_mut();
    }
    into_c_string((*payload).inner.content_type)
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a dlc_* function or null
#[no_mangle]
pub unsafe extern "C" fn dlc_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
