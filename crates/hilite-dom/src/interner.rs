//! Tag and attribute names
//!
//! Element and attribute names are ASCII case-insensitive in HTML. They are
//! folded to lower case once, stored in a table and compared by index.

use std::borrow::Cow;
use std::collections::HashMap;

/// Index of a name in a [`StringInterner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// The empty name, present in every table
    pub const EMPTY: InternedString = InternedString(0);
}

/// Names the highlighter reads or writes on almost every pass
const SEEDED: &[&str] = &[
    "",
    // document skeleton and sentence containers
    "html", "head", "body", "p", "div", "span", "li", "td", "h1", "h2", "h3",
    // regions the walker leaves alone
    "script", "style", "noscript", "textarea", "input", "select", "template",
    // frames
    "iframe", "frame",
    // attributes
    "id", "class", "style", "contenteditable", "src", "srcdoc", "shadowrootmode",
    "data-highlight-color", "data-highlight-index",
];

/// Case-folding name table
#[derive(Debug)]
pub struct StringInterner {
    names: Vec<Box<str>>,
    index: HashMap<Box<str>, InternedString>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut table = Self {
            names: Vec::with_capacity(SEEDED.len() * 2),
            index: HashMap::with_capacity(SEEDED.len() * 2),
        };
        for name in SEEDED {
            table.intern(name);
        }
        table
    }

    /// Index of `name`, adding it on first sight
    pub fn intern(&mut self, name: &str) -> InternedString {
        let folded = fold(name);
        if let Some(&id) = self.index.get(&*folded) {
            return id;
        }
        let id = InternedString(self.names.len() as u32);
        let boxed: Box<str> = folded.into();
        self.names.push(boxed.clone());
        self.index.insert(boxed, id);
        id
    }

    /// Index of `name` if it was ever interned
    pub fn lookup(&self, name: &str) -> Option<InternedString> {
        self.index.get(&*fold(name)).copied()
    }

    /// The folded name behind `id`; unknown ids read as empty
    pub fn get(&self, id: InternedString) -> &str {
        self.names.get(id.0 as usize).map_or("", |n| &**n)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

fn fold(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}
