//! Option values and the per-dependency option bag.
//!
//! All accumulation goes through [`OptionValue::merge`]:
//! * `List a + List b` is `a` followed by `b`
//! * `Text a + Text b` joins both with a single space
//! * a `Text` merged with a `List` is split like a shell would and spliced in place
//! * anything merged with a `Flag` takes the newer value
use indexmap::IndexMap;
use std::fmt;

/// A single option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    List(Vec<String>),
    Text(String),
    Flag(bool),
}

impl OptionValue {
    /// Builds a list value from anything yielding strings
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn text(text: impl Into<String>) -> Self {
        OptionValue::Text(text.into())
    }

    /// Empty strings, empty lists and `false` count as unset
    pub fn is_falsy(&self) -> bool {
        match self {
            OptionValue::List(items) => items.is_empty(),
            OptionValue::Text(text) => text.trim().is_empty(),
            OptionValue::Flag(flag) => !flag,
        }
    }

    /// Accumulates `other` after `self`
    pub fn merge(self, other: OptionValue) -> OptionValue {
        match (self, other) {
            (OptionValue::List(mut a), OptionValue::List(b)) => {
                a.extend(b);
                OptionValue::List(a)
            }
            (OptionValue::Text(a), OptionValue::Text(b)) => {
                if a.is_empty() {
                    OptionValue::Text(b)
                } else if b.is_empty() {
                    OptionValue::Text(a)
                } else {
                    OptionValue::Text(format!("{} {}", a, b))
                }
            }
            (OptionValue::List(mut a), OptionValue::Text(b)) => {
                a.extend(split_text(&b));
                OptionValue::List(a)
            }
            (OptionValue::Text(a), OptionValue::List(b)) => {
                let mut items = split_text(&a);
                items.extend(b);
                OptionValue::List(items)
            }
            (_, newer) => newer,
        }
    }
}

/// Splits a flags string the way a shell would
///
/// Text that is not valid shell words is kept as one word. The manager refuses
/// such text, so this only happens for bags built by hand.
pub fn split_text(text: &str) -> Vec<String> {
    shell_words::split(text).unwrap_or_else(|_| vec![text.to_string()])
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::List(items) => write!(f, "{:?}", items),
            OptionValue::Text(text) => write!(f, "{:?}", text),
            OptionValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Options of one dependency, in the order their keys were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionBag {
    entries: IndexMap<String, OptionValue>,
}

impl OptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `value` onto whatever is stored under `key`, or sets it
    pub fn merge_into(&mut self, key: &str, value: OptionValue) {
        match self.entries.get_mut(key) {
            Some(existing) => {
                let current = std::mem::replace(existing, OptionValue::Flag(false));
                *existing = current.merge(value);
            }
            None => {
                self.entries.insert(key.to_string(), value);
            }
        }
    }

    /// Merges every entry of `other` into this bag
    pub fn extend(&mut self, other: &OptionBag) {
        for (key, value) in other.iter() {
            self.merge_into(key, value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for OptionBag {
    fn from_iter<T: IntoIterator<Item = (K, OptionValue)>>(iter: T) -> Self {
        let mut bag = OptionBag::new();
        for (key, value) in iter {
            let key: String = key.into();
            bag.merge_into(&key, value);
        }
        bag
    }
}

impl fmt::Display for OptionBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{} = {}", key, value)?;
        }
        Ok(())
    }
}
