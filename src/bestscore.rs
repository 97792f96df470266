//! Best-score persistence
//!
//! A single integer in LocalStorage, written as a plain decimal string so
//! the value stays readable and editable in browser dev tools.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "dazed_bird_best";

/// Encode a best score for storage
pub fn encode(best: u32) -> String {
    best.to_string()
}

/// Decode a stored best score. Hand-edited or corrupt values yield None so
/// the caller can fall back to 0 instead of blocking startup.
pub fn decode(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Load the best score from LocalStorage (WASM only).
///
/// A missing or unparsable value falls back to 0; persistence failures never
/// block a run from starting.
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            if let Some(best) = decode(&raw) {
                log::info!("Loaded best score: {}", best);
                return best;
            }
            log::warn!("Ignoring unparsable best score {:?}", raw);
        }
    }

    log::info!("No best score found, starting fresh");
    0
}

/// Save the best score to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(best: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &encode(best));
        log::info!("Best score saved: {}", best);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_best: u32) {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for best in [0, 1, 42, u32::MAX] {
            assert_eq!(decode(&encode(best)), Some(best));
        }
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(decode(" 17\n"), Some(17));
    }

    #[test]
    fn test_corrupt_values_are_rejected() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("best"), None);
        assert_eq!(decode("-3"), None);
        assert_eq!(decode("1.5"), None);
        assert_eq!(decode("99999999999999999999"), None);
    }
}
