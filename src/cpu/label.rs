use std::collections::HashMap;

use crate::config::DEFAULT_LABEL_PREFIX;

#[cfg(test)]
#[path = "./label_test.rs"]
mod label_test;

/// branch targets discovered while decoding, numbered in order of discovery.
/// targets are absolute byte offsets, and may fall outside the stream
#[derive(Clone, Debug)]
pub struct Labels {
    prefix: String,
    by_offset: HashMap<isize, String>,

    /// targets in discovery order
    order: Vec<isize>,
}

impl Default for Labels {
    fn default() -> Self {
        Labels::new(DEFAULT_LABEL_PREFIX)
    }
}

impl Labels {
    pub fn new(prefix: &str) -> Self {
        Labels {
            prefix: prefix.to_owned(),
            by_offset: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// returns the label of `target`, creating the next numbered one on first request
    pub fn get_or_insert(&mut self, target: isize) -> String {
        if let Some(name) = self.by_offset.get(&target) {
            return name.clone();
        }
        let name = format!("{}{}", self.prefix, self.order.len() + 1);
        self.by_offset.insert(target, name.clone());
        self.order.push(target);
        name
    }

    /// label placed at `offset`, if any branch targets it
    pub fn get(&self, offset: usize) -> Option<&str> {
        self.by_offset.get(&(offset as isize)).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (target, name) pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (isize, &str)> {
        self.order.iter().map(move |t| (*t, self.by_offset[t].as_str()))
    }
}
