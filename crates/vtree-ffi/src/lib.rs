//! C FFI surface for vtree.
//!
//! Pattern: C strings + JSON serialization, thread-local last error.
//!
//! A media server written in C/C++ hands each imported object over as
//! JSON and either receives the placements back as a JSON array or gets
//! one callback per placement, mirroring its own container-chain hook.

use std::cell::RefCell;
use std::ffi::{c_void, CStr, CString, NulError};
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;

use vtree_core::{classify, LayoutOptions, MediaObject, Placement, PlacementLog};

// ---------------------------------------------------------------------------
// Error handling (thread-local last error)
// ---------------------------------------------------------------------------

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_error(msg: String) {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = Some(msg));
}

fn clear_error() {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = None);
}

/// Returns the last error message (caller frees with `vtree_string_free`).
#[no_mangle]
pub extern "C" fn vtree_last_error() -> *mut c_char {
    LAST_ERROR.with(|cell| {
        cell.borrow_mut()
            .take()
            .and_then(|s| CString::new(s).ok())
            .map(|s| s.into_raw())
            .unwrap_or(ptr::null_mut())
    })
}

/// Frees a string returned from vtree FFI.
///
/// # Safety
/// Must be a pointer returned from this FFI and not already freed.
#[no_mangle]
pub unsafe extern "C" fn vtree_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Per-placement hook: `(user_data, path, title, upnp_class)`.
///
/// `upnp_class` is NULL when the host should use its default class. The
/// strings are only valid for the duration of the call.
pub type PlacementCallback = extern "C" fn(
    user_data: *mut c_void,
    path: *const c_char,
    title: *const c_char,
    upnp_class: *const c_char,
);

/// Classify one object with default layout options.
///
/// Returns a JSON array of placements (caller frees), or NULL on error.
#[no_mangle]
pub extern "C" fn vtree_classify(object_json: *const c_char, root: *const c_char) -> *mut c_char {
    vtree_classify_with_options(object_json, root, ptr::null())
}

/// Classify one object. `options_json` may be NULL for defaults.
///
/// Returns a JSON array of placements (caller frees), or NULL on error.
#[no_mangle]
pub extern "C" fn vtree_classify_with_options(
    object_json: *const c_char,
    root: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    clear_error();
    match run(object_json, root, options_json) {
        Ok(placements) => {
            let rows: Vec<serde_json::Value> = placements.iter().map(placement_json).collect();
            json_to_cstr(&rows)
        }
        Err(e) => err_null(e),
    }
}

/// Classify one object and call `callback` for each placement in order.
///
/// Returns the number of placements, or -1 on error. On a classification
/// error the placements made before it have already been delivered. A
/// placement that cannot be passed as a C string (interior NUL) fails the
/// whole call before any callback runs.
#[no_mangle]
pub extern "C" fn vtree_classify_each(
    object_json: *const c_char,
    root: *const c_char,
    callback: Option<PlacementCallback>,
    user_data: *mut c_void,
) -> i32 {
    clear_error();
    let Some(callback) = callback else {
        set_error("null callback".into());
        return -1;
    };
    let (obj, root) = match read_inputs(object_json, root) {
        Ok(inputs) => inputs,
        Err(e) => {
            set_error(e);
            return -1;
        }
    };

    let log = PlacementLog::default();
    let result = classify(&obj, Path::new(&root), &log);

    let converted: Result<Vec<_>, _> = log.take().iter().map(placement_cstrs).collect();
    let placements = match converted {
        Ok(placements) => placements,
        Err(e) => {
            set_error(format!("placement contains a NUL byte: {}", e));
            return -1;
        }
    };
    for (path, title, class) in &placements {
        callback(
            user_data,
            path.as_ptr(),
            title.as_ptr(),
            class.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
        );
    }

    match result {
        Ok(()) => placements.len() as i32,
        Err(e) => {
            set_error(e.to_string());
            -1
        }
    }
}

/// Returns the FFI version (major * 10000 + minor * 100 + patch).
#[no_mangle]
pub extern "C" fn vtree_version() -> u32 {
    100 // 0.1.0
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run(
    object_json: *const c_char,
    root: *const c_char,
    options_json: *const c_char,
) -> Result<Vec<Placement>, String> {
    let (obj, root) = read_inputs(object_json, root)?;
    let options = if options_json.is_null() {
        LayoutOptions::default()
    } else {
        LayoutOptions::from_json(&read_cstr(options_json)?).map_err(|e| e.to_string())?
    };

    let log = PlacementLog::new(options);
    log.check_options();
    classify(&obj, Path::new(&root), &log).map_err(|e| e.to_string())?;
    Ok(log.take())
}

fn read_inputs(
    object_json: *const c_char,
    root: *const c_char,
) -> Result<(MediaObject, String), String> {
    let json = read_cstr(object_json)?;
    let obj: MediaObject = serde_json::from_str(&json).map_err(|e| e.to_string())?;
    let root = read_cstr(root)?;
    Ok((obj, root))
}

/// C strings for one callback: path, title and optional container class.
fn placement_cstrs(p: &Placement) -> Result<(CString, CString, Option<CString>), NulError> {
    let class = p.container.map(|c| CString::new(c.upnp_class())).transpose()?;
    Ok((CString::new(p.path())?, CString::new(p.title.as_str())?, class))
}

fn placement_json(p: &Placement) -> serde_json::Value {
    serde_json::json!({
        "path": p.path(),
        "chain": p.chain,
        "title": p.title,
        "container": p.container.map(|c| c.upnp_class()),
        "description": p.description,
    })
}

fn read_cstr(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Err("null pointer".into());
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(|s| s.to_string())
        .map_err(|e| e.to_string())
}

fn json_to_cstr<T: serde::Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(s) => to_cstr(s),
        Err(e) => err_null(e.to_string()),
    }
}

fn to_cstr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn err_null(msg: String) -> *mut c_char {
    set_error(msg);
    ptr::null_mut()
}
