use core::fmt::{Debug, Display, Formatter};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

type TextIndex = u32;

/// An interned string. Two `Text`s are equal iff their strings are equal.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct Text(TextIndex);

#[derive(Default)]
pub struct TextMap {
    val_to_idx: HashMap<String, TextIndex>,
    idx_to_val: Vec<String>,
}

impl TextMap {
    fn insert_str(&mut self, val: &str) -> TextIndex {
        if let Some(&idx) = self.val_to_idx.get(val) {
            idx
        } else {
            let idx = self.idx_to_val.len() as TextIndex;
            self.val_to_idx.insert(val.to_string(), idx);
            self.idx_to_val.push(val.to_string());
            idx
        }
    }
    fn get_str(&self, idx: TextIndex) -> &str {
        &self.idx_to_val[idx as usize]
    }
}

static TEXT_MAP: OnceLock<RwLock<TextMap>> = OnceLock::new();

fn text_map() -> &'static RwLock<TextMap> {
    TEXT_MAP.get_or_init(Default::default)
}

impl Text {
    pub fn intern(s: &str) -> Self {
        {
            // fast path: already interned
            let map = text_map().read().unwrap_or_else(|e| e.into_inner());
            if let Some(&idx) = map.val_to_idx.get(s) {
                return Self(idx);
            }
        }
        let mut map = text_map().write().unwrap_or_else(|e| e.into_inner());
        Self(map.insert_str(s))
    }
    pub fn with_str<R>(self, func: impl FnOnce(&str) -> R) -> R {
        let map = text_map().read().unwrap_or_else(|e| e.into_inner());
        func(map.get_str(self.0))
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}

impl Debug for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.with_str(|s| write!(f, "{}", s))
    }
}

#[test]
fn interning_is_stable() {
    let a = Text::intern("likes");
    let b = Text::from("likes");
    assert_eq!(a, b);
    assert_ne!(a, Text::intern("Likes"));
    assert_eq!(a.to_string(), "likes");
}
