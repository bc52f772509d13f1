//! lcms error routing. Kept in its own binary because the handler is global.

use cmm_core::consts::error_code;
use cmm_core::{CmmError, Profile, has_log_error_handler, set_log_error_handler, unset_log_error_handler};
use std::sync::{Arc, Mutex};

#[test]
fn short_buffer_reaches_handler() {
    let seen: Arc<Mutex<Vec<(u32, String)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    set_log_error_handler(move |code, msg| sink.lock().unwrap().push((code, msg.to_string())));
    assert!(has_log_error_handler());

    let err = Profile::from_icc(b"    ").unwrap_err();
    assert!(matches!(err, CmmError::ProfileFailed(_)));
    assert!(err.is_native());

    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, error_code::READ);
        assert!(seen[0].1.starts_with("Read from memory error"), "got {:?}", seen[0].1);
    }

    unset_log_error_handler();
    assert!(!has_log_error_handler());
    assert!(Profile::from_icc(b"    ").is_err());
    assert_eq!(seen.lock().unwrap().len(), 1, "unset handler must not be called");
}
